//! Command model and the handler trait every command implements.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::config::BotConfig;
use crate::dispatch::{IncomingMessage, Session};

/// Something a command runs when invoked.
///
/// Handlers receive the triggering event, the argument tokens that followed
/// the command name, the shared session handle and the read-only
/// configuration. Any error is caught by the dispatcher, logged and reported
/// to the user; it never reaches other invocations.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        event: &dyn IncomingMessage,
        args: &[String],
        session: &Session,
        config: &BotConfig,
    ) -> anyhow::Result<()>;
}

/// A validated, registered command. Immutable once built.
#[derive(Clone)]
pub struct Command {
    name: String,
    aliases: Vec<String>,
    description: Option<String>,
    origin: String,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub(crate) fn new(
        name: String,
        aliases: Vec<String>,
        description: Option<String>,
        origin: String,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name,
            aliases,
            description,
            origin,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Where the command was loaded from (a file path, or a label for
    /// programmatic registration).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn has_alias(&self, token: &str) -> bool {
        self.aliases.iter().any(|a| a == token)
    }

    pub async fn execute(
        &self,
        event: &dyn IncomingMessage,
        args: &[String],
        session: &Session,
        config: &BotConfig,
    ) -> anyhow::Result<()> {
        self.handler.execute(event, args, session, config).await
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// An unvalidated command candidate, as produced by a
/// [`CommandSource`](super::CommandSource).
///
/// The registry only accepts modules with a non-empty name and a handler.
#[derive(Clone)]
pub struct CommandModule {
    pub origin: String,
    pub name: Option<String>,
    pub aliases: Vec<String>,
    pub description: Option<String>,
    pub handler: Option<Arc<dyn CommandHandler>>,
}

impl CommandModule {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            name: None,
            aliases: Vec::new(),
            description: None,
            handler: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn handler(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.handler = Some(handler);
        self
    }
}

impl fmt::Debug for CommandModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandModule")
            .field("origin", &self.origin)
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}
