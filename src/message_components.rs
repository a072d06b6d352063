use anyhow::Result;
use log::{error, info, warn};
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use uuid::Uuid;

use crate::features::ctf::{join_ctf, JoinOutcome};

/// Handler for all message component interactions
pub struct MessageComponentHandler;

impl MessageComponentHandler {
    /// Handle all types of component interactions
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        let user_id = interaction.user.id.to_string();

        info!("Processing component interaction: {custom_id} from user: {user_id}");

        match custom_id.as_str() {
            "ctf_join" => {
                self.handle_join_button(ctx, interaction).await?;
            }
            _ => {
                warn!("No handler registered for component: {custom_id}");
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content("Unknown component interaction.")
                            })
                    })
                    .await?;
            }
        }

        Ok(())
    }

    /// Create the join button attached to a CTF announcement
    pub fn create_join_button(ctf_name: &str) -> CreateComponents {
        CreateComponents::default()
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("ctf_join")
                        .label(format!("Join {ctf_name}"))
                        .style(ButtonStyle::Success)
                })
            })
            .to_owned()
    }

    /// Handle a click on the join button of a CTF announcement
    ///
    /// The CTF name is the content of the announcement message the button is
    /// attached to. All replies are ephemeral.
    async fn handle_join_button(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let ctf_name = interaction.message.content.clone();

        let (guild_id, member) = match (interaction.guild_id, interaction.member.as_ref()) {
            (Some(guild_id), Some(member)) => (guild_id, member),
            _ => {
                warn!("[{request_id}] Join button clicked outside a guild");
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message
                                    .content("Couldn't find the calling Guild")
                                    .ephemeral(true)
                            })
                    })
                    .await?;
                return Ok(());
            }
        };

        info!(
            "[{request_id}] Adding user {} to CTF {ctf_name}",
            member.user.name
        );

        let reply = match join_ctf(&ctx.http, guild_id, member, &ctf_name).await {
            Ok(JoinOutcome::Joined {
                user_name,
                role_name,
            }) => format!("Added user {user_name} to role {role_name}"),
            Ok(JoinOutcome::RoleMissing) => {
                format!("Role {ctf_name} does not exist. Try creating it, first!")
            }
            Ok(JoinOutcome::GuildUnavailable) => "Couldn't find the calling Guild".to_string(),
            Err(e) => {
                error!("[{request_id}] Join failed: {e:#}");
                format!("Could not join the CTF: {e:#}")
            }
        };

        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(reply).ephemeral(true))
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_join_button() {
        let components = MessageComponentHandler::create_join_button("picoctf-2023");
        assert_eq!(components.0.len(), 1);

        let button = &components.0[0]["components"][0];
        assert_eq!(button["custom_id"], "ctf_join");
        assert_eq!(button["label"], "Join picoctf-2023");
        // Success style
        assert_eq!(button["style"], 3);
    }
}
