//! Environment-backed process configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation

use anyhow::{Context, Result};
use serenity::model::id::ChannelId;
use std::env;

/// Category that holds all CTF text channels when `CTF_CATEGORY_ID` is unset.
pub const DEFAULT_CTF_CATEGORY_ID: ChannelId = ChannelId(801259574317416479);

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Discord bot token used for the gateway session
    pub discord_token: String,
    /// Optional development guild. When set, slash commands are registered
    /// per-guild (instant) instead of globally.
    pub discord_guild_id: Option<String>,
    /// Category channel under which all CTF channels are filed
    pub ctf_category_id: ChannelId,
    /// Default `env_logger` filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `DISCORD_TOKEN` is required; everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        let discord_token =
            env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;

        let discord_guild_id = env::var("DISCORD_GUILD_ID")
            .ok()
            .filter(|id| !id.is_empty());

        let ctf_category_id = match env::var("CTF_CATEGORY_ID") {
            Ok(raw) => ChannelId(
                raw.parse()
                    .context("CTF_CATEGORY_ID must be a numeric channel id")?,
            ),
            Err(_) => DEFAULT_CTF_CATEGORY_ID,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            discord_token,
            discord_guild_id,
            ctf_category_id,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations stay sequential
    #[test]
    fn test_from_env() {
        env::remove_var("DISCORD_TOKEN");
        assert!(Config::from_env().is_err());

        env::set_var("DISCORD_TOKEN", "token");
        env::remove_var("DISCORD_GUILD_ID");
        env::remove_var("CTF_CATEGORY_ID");
        env::remove_var("LOG_LEVEL");

        let config = Config::from_env().unwrap();
        assert_eq!(config.discord_token, "token");
        assert!(config.discord_guild_id.is_none());
        assert_eq!(config.ctf_category_id, DEFAULT_CTF_CATEGORY_ID);
        assert_eq!(config.log_level, "info");

        env::set_var("DISCORD_GUILD_ID", "801259574317416476");
        env::set_var("CTF_CATEGORY_ID", "42");
        let config = Config::from_env().unwrap();
        assert_eq!(
            config.discord_guild_id.as_deref(),
            Some("801259574317416476")
        );
        assert_eq!(config.ctf_category_id, ChannelId(42));

        env::set_var("CTF_CATEGORY_ID", "not-a-number");
        assert!(Config::from_env().is_err());
        env::remove_var("CTF_CATEGORY_ID");
    }
}
