//! Discord Integration
//!
//! Connects to the Discord gateway with serenity and forwards every
//! message event to the [`Dispatcher`]. Connection, handshake and rate
//! limiting all stay inside serenity.

mod handler;
mod message;

pub use handler::DiscordHandler;
pub use message::DiscordMessage;

use anyhow::Context as _;
use serenity::Client;
use serenity::model::gateway::GatewayIntents;

use crate::dispatch::Dispatcher;

/// Gateway intents needed to read prefixed messages in guilds and DMs.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Log in and serve until the gateway connection ends or Ctrl-C is pressed.
pub async fn start(dispatcher: Dispatcher) -> anyhow::Result<()> {
    let token = dispatcher.config().token().to_string();
    let handler = DiscordHandler::new(dispatcher);

    tracing::info!("Attempting to start the bot...");
    let mut client = Client::builder(&token, intents())
        .event_handler(handler)
        .await
        .context("Failed to create the Discord client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    client
        .start()
        .await
        .context("Failed to log in; double-check BOT_TOKEN")?;

    tracing::info!("Discord connection closed");
    Ok(())
}
