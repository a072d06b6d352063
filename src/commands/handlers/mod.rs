//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial handlers (utility, ctf)

pub mod ctf;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(ctf::CtfHandler),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_handlers_cover_registered_commands() {
        let handlers = create_all_handlers();
        let names: Vec<&str> = handlers
            .iter()
            .flat_map(|handler| handler.command_names().iter().copied())
            .collect();

        // Every declared slash command has a handler
        assert!(names.contains(&"ping"));
        assert!(names.contains(&"ctf"));
        assert_eq!(names.len(), 2);
    }
}
