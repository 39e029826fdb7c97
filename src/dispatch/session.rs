//! Shared session handle passed to every handler.

use chrono::{DateTime, TimeDelta, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::event::Author;
use crate::commands::Registry;

/// Read-only state shared by all invocations: the registry, the bot's own
/// identity (set once, when the platform reports it) and the start time.
#[derive(Debug)]
pub struct Session {
    registry: Arc<Registry>,
    identity: OnceCell<Author>,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            identity: OnceCell::new(),
            started_at: Utc::now(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record who we are. Only the first call has an effect; returns
    /// whether this call set it.
    pub fn set_identity(&self, me: Author) -> bool {
        self.identity.set(me).is_ok()
    }

    pub fn identity(&self) -> Option<&Author> {
        self.identity.get()
    }

    /// True if `author` is the bot itself.
    pub fn is_self(&self, author: &Author) -> bool {
        self.identity().is_some_and(|me| me.id == author.id)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime(&self) -> TimeDelta {
        Utc::now() - self.started_at
    }
}
