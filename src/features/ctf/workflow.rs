//! Create and join workflows for CTF groups
//!
//! Both workflows issue their remote calls sequentially and leave all state
//! with Discord; the only cleanup performed here is removing a freshly
//! created role when the rest of the create sequence fails.

use anyhow::{bail, Context as _, Result};
use log::warn;
use serenity::http::Http;
use serenity::model::channel::{
    ChannelType, GuildChannel, PermissionOverwrite, PermissionOverwriteType,
};
use serenity::model::guild::{Member, Role};
use serenity::model::id::{ChannelId, GuildId, RoleId};
use serenity::model::permissions::Permissions;

/// Role and channel provisioned for a new CTF
pub struct CreatedCtf {
    pub role: Role,
    pub channel: GuildChannel,
}

/// Result of a join attempt that completed without a remote-call error
pub enum JoinOutcome {
    /// Member was added to the CTF role
    Joined { user_name: String, role_name: String },
    /// No role in the guild carries the requested name
    RoleMissing,
    /// The calling guild could not be fetched
    GuildUnavailable,
}

/// Provision a role and a restricted text channel for a new CTF.
///
/// Fails without touching the guild when a role named `ctf_name` already
/// exists. The role is created first and deleted again if any later step
/// fails, so a failed run leaves no orphan role behind.
pub async fn create_ctf(
    http: &Http,
    guild_id: GuildId,
    category_id: ChannelId,
    ctf_name: &str,
) -> Result<CreatedCtf> {
    let guild = http
        .get_guild(guild_id.0)
        .await
        .context("could not fetch the calling guild")?;

    if guild.roles.values().any(|role| role.name == ctf_name) {
        bail!("a role named {ctf_name} already exists; pick another name or join it instead");
    }

    let role = guild_id
        .create_role(http, |role| role)
        .await
        .context("could not create new guild role")?;

    let role = match guild_id
        .edit_role(http, role.id, |edit| edit.name(ctf_name).hoist(true))
        .await
    {
        Ok(role) => role,
        Err(e) => {
            remove_role_best_effort(http, guild_id, role.id).await;
            return Err(e).context("could not name the new guild role");
        }
    };

    // The guild's default role shares the guild's own id.
    let everyone = RoleId(guild_id.0);

    let channel = match guild_id
        .create_channel(http, |channel| {
            channel
                .name(ctf_name)
                .kind(ChannelType::Text)
                .topic(channel_topic(ctf_name))
                .category(category_id)
                .permissions(channel_overwrites(everyone, role.id))
        })
        .await
    {
        Ok(channel) => channel,
        Err(e) => {
            remove_role_best_effort(http, guild_id, role.id).await;
            return Err(e).context("could not create the CTF channel");
        }
    };

    Ok(CreatedCtf { role, channel })
}

/// Add `member` to the role named `ctf_name`.
///
/// Shared by the `ctf join` sub-command and the join button so both paths
/// behave identically.
pub async fn join_ctf(
    http: &Http,
    guild_id: GuildId,
    member: &Member,
    ctf_name: &str,
) -> Result<JoinOutcome> {
    let guild = match http.get_guild(guild_id.0).await {
        Ok(guild) => guild,
        Err(e) => {
            warn!("Could not fetch guild {guild_id} for a join request: {e}");
            return Ok(JoinOutcome::GuildUnavailable);
        }
    };

    let role = match guild.roles.values().find(|role| role.name == ctf_name) {
        Some(role) => role,
        None => return Ok(JoinOutcome::RoleMissing),
    };

    let user_name = member.user.name.clone();
    let role_name = role.name.clone();
    let role_id = role.id;

    let mut member = member.clone();
    member
        .add_role(http, role_id)
        .await
        .with_context(|| format!("could not add {user_name} to role {role_name}"))?;

    Ok(JoinOutcome::Joined {
        user_name,
        role_name,
    })
}

/// Topic line for a CTF channel
pub fn channel_topic(ctf_name: &str) -> String {
    format!("Channel for {ctf_name}")
}

/// Overwrites hiding the channel from everyone but the CTF role
fn channel_overwrites(everyone: RoleId, ctf_role: RoleId) -> Vec<PermissionOverwrite> {
    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(everyone),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(ctf_role),
        },
    ]
}

async fn remove_role_best_effort(http: &Http, guild_id: GuildId, role_id: RoleId) {
    if let Err(e) = guild_id.delete_role(http, role_id).await {
        warn!("Could not remove role {role_id} after aborted CTF creation: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_topic() {
        assert_eq!(channel_topic("picoctf-2023"), "Channel for picoctf-2023");
    }

    #[test]
    fn test_channel_overwrites_hide_from_everyone() {
        let overwrites = channel_overwrites(RoleId(1), RoleId(2));
        assert_eq!(overwrites.len(), 2);

        assert!(overwrites[0].allow.is_empty());
        assert_eq!(overwrites[0].deny, Permissions::VIEW_CHANNEL);
        assert!(matches!(
            overwrites[0].kind,
            PermissionOverwriteType::Role(RoleId(1))
        ));
    }

    #[test]
    fn test_channel_overwrites_admit_ctf_role() {
        let overwrites = channel_overwrites(RoleId(1), RoleId(2));

        assert_eq!(
            overwrites[1].allow,
            Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES
        );
        assert!(overwrites[1].deny.is_empty());
        assert!(matches!(
            overwrites[1].kind,
            PermissionOverwriteType::Role(RoleId(2))
        ));
    }
}
