//! Discord message adapter.

use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::Context;

use crate::dispatch::{Author, IncomingMessage, ReplyError};

/// A serenity message together with the context needed to answer it.
pub struct DiscordMessage {
    ctx: Context,
    msg: Message,
    author: Author,
}

impl DiscordMessage {
    pub fn new(ctx: Context, msg: Message) -> Self {
        let author = Author {
            id: msg.author.id.to_string(),
            tag: msg.author.tag(),
            bot: msg.author.bot,
        };
        Self { ctx, msg, author }
    }
}

#[async_trait]
impl IncomingMessage for DiscordMessage {
    fn author(&self) -> &Author {
        &self.author
    }

    fn content(&self) -> &str {
        &self.msg.content
    }

    async fn reply(&self, text: &str) -> Result<(), ReplyError> {
        self.msg
            .reply(&self.ctx, text)
            .await
            .map(|_| ())
            .map_err(|e| ReplyError::Delivery(e.to_string()))
    }
}
