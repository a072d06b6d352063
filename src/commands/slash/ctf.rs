//! CTF slash commands: /ctf create, /ctf join

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates the ctf command group
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_ctf_command()]
}

fn create_ctf_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ctf")
        .description("Parent command for the CTF group")
        .create_option(|option| {
            option
                .name("create")
                .description("Create a CTF")
                .kind(CommandOptionType::SubCommand)
                .create_sub_option(|sub| {
                    sub.name("ctf-name")
                        .description("CTF name")
                        .kind(CommandOptionType::String)
                        .required(true)
                })
        })
        .create_option(|option| {
            option
                .name("join")
                .description("Join a CTF")
                .kind(CommandOptionType::SubCommand)
        })
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctf_command_subcommands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let ctf = &commands[0];
        assert_eq!(ctf.0.get("name").unwrap().as_str(), Some("ctf"));

        let options = ctf.0.get("options").unwrap().as_array().unwrap();
        let subcommands: Vec<&str> = options
            .iter()
            .map(|opt| opt.get("name").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(subcommands, vec!["create", "join"]);
    }

    #[test]
    fn test_create_requires_ctf_name() {
        let commands = create_commands();
        let ctf = &commands[0];

        let options = ctf.0.get("options").unwrap().as_array().unwrap();
        let create = &options[0];
        let create_options = create.get("options").unwrap().as_array().unwrap();

        assert_eq!(create_options.len(), 1);
        let ctf_name = &create_options[0];
        assert_eq!(ctf_name.get("name").unwrap().as_str(), Some("ctf-name"));
        assert_eq!(ctf_name.get("required").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn test_join_has_no_options() {
        let commands = create_commands();
        let ctf = &commands[0];

        let options = ctf.0.get("options").unwrap().as_array().unwrap();
        let join = &options[1];
        assert!(join
            .get("options")
            .map(|opts| opts.as_array().unwrap().is_empty())
            .unwrap_or(true));
    }
}
