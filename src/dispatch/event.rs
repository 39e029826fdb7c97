//! Platform-neutral view of an inbound message.

use async_trait::async_trait;
use thiserror::Error;

/// Who sent a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Stable platform id, compared for the self-message guard.
    pub id: String,
    /// Display tag for logs and templates.
    pub tag: String,
    /// Whether the account is a bot.
    pub bot: bool,
}

impl Author {
    pub fn user(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            bot: false,
        }
    }

    pub fn bot(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            bot: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("failed to deliver reply: {0}")]
    Delivery(String),
}

/// An inbound text event the dispatcher can route and answer.
#[async_trait]
pub trait IncomingMessage: Send + Sync {
    fn author(&self) -> &Author;

    fn content(&self) -> &str;

    /// Reply in the conversation the message came from.
    async fn reply(&self, text: &str) -> Result<(), ReplyError>;
}
