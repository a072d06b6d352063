use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use ctfbot::commands::handlers::create_all_handlers;
use ctfbot::commands::{
    register_global_commands, register_guild_commands, CommandContext, CommandRegistry,
};
use ctfbot::core::Config;
use ctfbot::message_components::MessageComponentHandler;

struct Handler {
    registry: CommandRegistry,
    component_handler: MessageComponentHandler,
    context: Arc<CommandContext>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Register slash commands - use guild commands for development (instant), global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands for guild {guild_id} (instant update)");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands globally (may take up to 1 hour to propagate)");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                let name = command.data.name.clone();
                match self.registry.get(&name) {
                    Some(handler) => {
                        if let Err(e) = handler
                            .handle(Arc::clone(&self.context), &ctx, &command)
                            .await
                        {
                            error!("Error handling slash command '{name}': {e:#}");

                            let error_message = "❌ Sorry, I encountered an error processing your command. Please try again.";
                            // One response per interaction; if this send fails the
                            // response window is gone and logging is all that is left.
                            if let Err(send_err) = command
                                .create_interaction_response(&ctx.http, |response| {
                                    response
                                        .kind(InteractionResponseType::ChannelMessageWithSource)
                                        .interaction_response_data(|message| {
                                            message.content(error_message)
                                        })
                                })
                                .await
                            {
                                error!("Failed to send error response for '{name}': {send_err}");
                            }
                        }
                    }
                    None => {
                        warn!("No handler registered for slash command: {name}");
                        if let Err(e) = command
                            .create_interaction_response(&ctx.http, |response| {
                                response
                                    .kind(InteractionResponseType::ChannelMessageWithSource)
                                    .interaction_response_data(|message| {
                                        message.content("Unknown command.")
                                    })
                            })
                            .await
                        {
                            error!("Failed to send unknown-command response: {e}");
                        }
                    }
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self
                    .component_handler
                    .handle_component_interaction(&ctx, &component)
                    .await
                {
                    error!(
                        "Error handling component interaction '{}': {:#}",
                        component.data.custom_id, e
                    );

                    let error_message = "❌ Sorry, I encountered an error processing your interaction. Please try again.";
                    if let Err(send_err) = component
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| message.content(error_message))
                        })
                        .await
                    {
                        error!("Failed to send error response for component: {send_err}");
                    }
                }
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            Interaction::Autocomplete(autocomplete) => {
                warn!(
                    "Ignoring autocomplete interaction for command: {}",
                    autocomplete.data.name
                );
            }
            Interaction::ModalSubmit(modal) => {
                warn!("Ignoring modal submit interaction: {}", modal.data.custom_id);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting CTF Discord Bot...");

    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers() {
        registry.register(handler);
    }
    info!("Registered handlers for {} commands", registry.len());

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let context = Arc::new(CommandContext::new(config.clone()));

    let handler = Handler {
        registry,
        component_handler: MessageComponentHandler,
        context,
        guild_id,
    };

    // Interactions arrive over the gateway; no message intents needed
    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
