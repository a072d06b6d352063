//! Utility slash commands: /ping

use serenity::builder::CreateApplicationCommand;

/// Creates utility commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_ping_command()]
}

/// Creates the ping command
fn create_ping_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ping")
        .description("Test bot responsiveness")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_has_no_options() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let ping = &commands[0];
        assert_eq!(ping.0.get("name").unwrap().as_str(), Some("ping"));
        assert!(ping.0.get("options").is_none());
    }
}
