//! Serenity event handler.

use async_trait::async_trait;
use serenity::gateway::ActivityData;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::{Context, EventHandler};
use std::sync::Arc;

use super::message::DiscordMessage;
use crate::dispatch::{Author, Dispatcher};

/// Forwards gateway events to the [`Dispatcher`].
pub struct DiscordHandler {
    dispatcher: Dispatcher,
}

impl DiscordHandler {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("Logged in as {}! The modular bot is ready", ready.user.tag());

        let me = Author::bot(ready.user.id.to_string(), ready.user.tag());
        if !self.dispatcher.session().set_identity(me) {
            tracing::debug!("Identity already known; ignoring repeated ready event");
        }

        ctx.set_activity(Some(ActivityData::playing(
            self.dispatcher.config().activity.clone(),
        )));
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let event = Arc::new(DiscordMessage::new(ctx, msg));
        if let Err(e) = self.dispatcher.spawn(event).await {
            tracing::error!("Unhandled failure in message task: {}", e);
        }
    }
}
