//! Message dispatcher.
//!
//! Every inbound event is handled on its own task. Handlers share nothing
//! mutable: the registry and configuration are read-only behind `Arc`, so
//! events are processed concurrently without locks. A failing (or
//! panicking) handler is logged and reported to the user; it never reaches
//! the caller.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::event::IncomingMessage;
use super::parser::parse_invocation;
use super::session::Session;
use crate::commands::Registry;
use crate::config::BotConfig;
use crate::logging::panic_message;
use crate::utils::truncate_str;

/// Longest command name echoed into log lines.
const MAX_LOGGED_NAME: usize = 64;

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Sent by the bot itself.
    OwnMessage,
    /// Sent by another bot while `ignore_bots` is on.
    OtherBot,
    /// No prefix, or nothing after it.
    NotACommand,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored(IgnoreReason),
    /// No command or alias matched; a notice was (attempted to be) sent.
    NotFound { name: String },
    Executed { command: String },
    /// The handler failed; a notice was (attempted to be) sent.
    Failed { command: String, error: String },
}

#[derive(Debug)]
struct Inner {
    session: Session,
    config: BotConfig,
}

/// Routes inbound messages to registered commands. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    pub fn new(registry: Registry, config: BotConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                session: Session::new(Arc::new(registry)),
                config,
            }),
        }
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn config(&self) -> &BotConfig {
        &self.inner.config
    }

    /// Handle `event` on a new task and return its handle.
    ///
    /// Nothing is serialized: concurrent events run concurrently.
    pub fn spawn(&self, event: Arc<dyn IncomingMessage>) -> JoinHandle<DispatchOutcome> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.on_message(event.as_ref()).await })
    }

    /// Handle one event to completion.
    pub async fn on_message(&self, event: &dyn IncomingMessage) -> DispatchOutcome {
        let session = &self.inner.session;
        let config = &self.inner.config;
        let author = event.author();

        if session.is_self(author) {
            return DispatchOutcome::Ignored(IgnoreReason::OwnMessage);
        }
        if config.ignore_bots && author.bot {
            return DispatchOutcome::Ignored(IgnoreReason::OtherBot);
        }

        let Some(invocation) = parse_invocation(event.content(), config.prefix()) else {
            return DispatchOutcome::Ignored(IgnoreReason::NotACommand);
        };

        let Some(command) = session.registry().resolve(&invocation.name) else {
            tracing::info!(
                "Command not found: {}",
                truncate_str(&invocation.name, MAX_LOGGED_NAME)
            );
            if let Err(e) = event.reply(&config.messages.not_found).await {
                tracing::warn!("Failed to send not-found notice: {}", e);
            }
            return DispatchOutcome::NotFound {
                name: invocation.name,
            };
        };

        let run = command.execute(event, &invocation.args, session, config);
        let result = match AssertUnwindSafe(run).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(anyhow::anyhow!(
                "handler panicked: {}",
                panic_message(payload.as_ref())
            )),
        };

        match result {
            Ok(()) => {
                tracing::info!("Executed command '{}' for {}", command.name(), author.tag);
                DispatchOutcome::Executed {
                    command: command.name().to_string(),
                }
            }
            Err(error) => {
                tracing::error!(
                    command = %command.name(),
                    author = %author.tag,
                    "Error executing command '{}': {:#}",
                    command.name(),
                    error
                );
                if let Err(e) = event.reply(&config.messages.handler_failed).await {
                    tracing::warn!(
                        "Failed to notify {} about the '{}' failure: {}",
                        author.tag,
                        command.name(),
                        e
                    );
                }
                DispatchOutcome::Failed {
                    command: command.name().to_string(),
                    error: format!("{:#}", error),
                }
            }
        }
    }
}
