//! Configuration types.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Prefix used when the configuration leaves it unset or empty.
pub const DEFAULT_PREFIX: &str = "!";

/// Presence text shown once the bot is connected.
pub const DEFAULT_ACTIVITY: &str = "managing modular commands";

/// Bot configuration, loaded once at startup and shared read-only with
/// every command handler. Field names are lower case; the loader folds
/// `BOT_TOKEN`-style file keys before deserializing.
#[derive(Clone, Deserialize)]
pub struct BotConfig {
    /// Platform secret. Empty means "missing" and fails validation.
    #[serde(default)]
    pub(crate) bot_token: String,

    #[serde(default)]
    prefix: String,

    /// Directory holding command manifests.
    #[serde(default)]
    pub commands_dir: Option<PathBuf>,

    /// Ignore messages from every bot account, not only our own.
    #[serde(default = "default_ignore_bots")]
    pub ignore_bots: bool,

    #[serde(default = "default_activity")]
    pub activity: String,

    #[serde(default)]
    pub messages: ReplyMessages,

    /// Keys this crate does not interpret; available to handlers.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_ignore_bots() -> bool {
    true
}

fn default_activity() -> String {
    DEFAULT_ACTIVITY.to_string()
}

impl BotConfig {
    /// Build a configuration in code with defaults for everything but the token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot_token: token.into(),
            prefix: String::new(),
            commands_dir: None,
            ignore_bots: default_ignore_bots(),
            activity: default_activity(),
            messages: ReplyMessages::default(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn token(&self) -> &str {
        &self.bot_token
    }

    /// The command prefix, falling back to [`DEFAULT_PREFIX`] when unset.
    pub fn prefix(&self) -> &str {
        if self.prefix.is_empty() {
            DEFAULT_PREFIX
        } else {
            &self.prefix
        }
    }

    /// Look up an uninterpreted key.
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("prefix", &self.prefix())
            .field("commands_dir", &self.commands_dir)
            .field("ignore_bots", &self.ignore_bots)
            .field("activity", &self.activity)
            .field("messages", &self.messages)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// User-facing notices sent by the dispatcher itself.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyMessages {
    #[serde(default = "default_not_found")]
    pub not_found: String,

    #[serde(default = "default_handler_failed")]
    pub handler_failed: String,
}

fn default_not_found() -> String {
    "Hmm, I don't know that command!".to_string()
}

fn default_handler_failed() -> String {
    "There was an error trying to execute that command!".to_string()
}

impl Default for ReplyMessages {
    fn default() -> Self {
        Self {
            not_found: default_not_found(),
            handler_failed: default_handler_failed(),
        }
    }
}
