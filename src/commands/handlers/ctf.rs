//! CTF command handlers
//!
//! Handles: ctf create, ctf join

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use log::{error, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::features::ctf::create_ctf;
use crate::message_components::MessageComponentHandler;

/// Handler for the ctf command group: create, join
pub struct CtfHandler;

#[async_trait]
impl SlashCommandHandler for CtfHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ctf"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        // The platform validates sub-commands against the registered
        // definitions, so anything else here is a stale registration.
        match command.data.options.first().map(|opt| opt.name.as_str()) {
            Some("create") => self.handle_create(&ctx, serenity_ctx, command).await,
            Some("join") => self.handle_join(serenity_ctx, command).await,
            other => {
                warn!("Unknown ctf subcommand: {other:?}");
                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content("Unknown ctf subcommand.").ephemeral(true)
                            })
                    })
                    .await?;
                Ok(())
            }
        }
    }
}

impl CtfHandler {
    /// Handle /ctf create
    ///
    /// Provisions the role and channel, then sends the announcement the join
    /// button hangs off. The announcement content is the bare CTF name; the
    /// join flow reads it back from that message.
    async fn handle_create(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();

        let guild_id = match command.guild_id {
            Some(guild_id) => guild_id,
            None => {
                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message
                                    .content("This command can only be used in a server, not in DMs.")
                                    .ephemeral(true)
                            })
                    })
                    .await?;
                return Ok(());
            }
        };

        let subcommand_options = command
            .data
            .options
            .first()
            .map(|sub| sub.options.as_slice())
            .unwrap_or(&[]);
        let ctf_name = get_string_option(subcommand_options, "ctf-name")
            .context("ctf create invoked without the required ctf-name option")?;

        info!("[{request_id}] New CTF name given: {ctf_name}");

        match create_ctf(
            &serenity_ctx.http,
            guild_id,
            ctx.config.ctf_category_id,
            &ctf_name,
        )
        .await
        {
            Ok(created) => {
                info!(
                    "[{request_id}] Provisioned role {} and channel {} for CTF {ctf_name}",
                    created.role.id, created.channel.id
                );

                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(&ctf_name).set_components(
                                    MessageComponentHandler::create_join_button(&ctf_name),
                                )
                            })
                    })
                    .await?;
            }
            Err(e) => {
                error!("[{request_id}] CTF creation failed: {e:#}");

                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(format!("Could not create the CTF: {e:#}"))
                            })
                    })
                    .await?;
            }
        }

        Ok(())
    }

    /// Handle /ctf join
    ///
    /// A slash invocation carries no originating message, so there is no CTF
    /// announcement to read a name from. Point the user at the join button,
    /// which does.
    async fn handle_join(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        info!(
            "Join subcommand from user {} redirected to the join button",
            command.user.id
        );

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message
                            .content("Use the Join button on a CTF announcement to join its role.")
                            .ephemeral(true)
                    })
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctf_handler_commands() {
        let handler = CtfHandler;
        assert_eq!(handler.command_names(), &["ctf"]);
    }
}
