//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::Config;

/// Shared state handed to every command handler.
///
/// The bot keeps no state of its own beyond the startup configuration, so
/// this is just the parsed [`Config`].
#[derive(Clone)]
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    /// Create a new CommandContext from the loaded configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}
