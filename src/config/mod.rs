//! Configuration Module
//!
//! Loads the bot configuration from a file (format picked from the
//! extension: JSON, TOML or YAML) overlaid with `MODBOT_*` environment
//! variables. A missing file, a malformed file or a missing token are all
//! startup-fatal; the caller is expected to exit non-zero on any error here.

mod types;

pub use types::{BotConfig, DEFAULT_ACTIVITY, DEFAULT_PREFIX, ReplyMessages};

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment prefix for overrides, e.g. `MODBOT_BOT_TOKEN`.
pub const ENV_PREFIX: &str = "MODBOT";

/// Errors that prevent the bot from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("config file {} is missing or malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("BOT_TOKEN is missing from {}; can't start without it", path.display())]
    MissingToken { path: PathBuf },
}

impl BotConfig {
    /// Load and validate the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`BotConfig::load`], reading overrides from `env` instead of
    /// the process environment when it is given.
    pub fn load_with_env(
        path: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let malformed = |source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        };

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(malformed)?;

        // Environment keys arrive lower-cased, file keys keep their case
        let raw: Map<String, Value> = settings.try_deserialize().map_err(malformed)?;
        let mut loaded: BotConfig = config::Config::try_from(&Value::Object(fold_keys(raw)))
            .and_then(|folded| folded.try_deserialize())
            .map_err(malformed)?;
        loaded.validate(path)?;
        loaded.resolve_commands_dir(path);

        tracing::debug!("Loaded configuration from {}: {:?}", path.display(), loaded);
        Ok(loaded)
    }

    fn validate(&mut self, path: &Path) -> Result<(), ConfigError> {
        let trimmed = self.bot_token.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingToken {
                path: path.to_path_buf(),
            });
        }
        if trimmed.len() != self.bot_token.len() {
            self.bot_token = trimmed.to_string();
        }
        Ok(())
    }

    /// Relative command directories are taken relative to the config file,
    /// and an unset one defaults to `commands/` beside it.
    fn resolve_commands_dir(&mut self, path: &Path) {
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let dir = match self.commands_dir.take() {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => base.join(dir),
            None => base.join("commands"),
        };
        self.commands_dir = Some(dir);
    }
}

/// Lower-case every key, recursing into tables. When two keys fold to the
/// same name, the one already in lower case wins and tables are merged.
fn fold_keys(map: Map<String, Value>) -> Map<String, Value> {
    let (exact, mixed): (Vec<_>, Vec<_>) = map
        .into_iter()
        .partition(|(key, _)| !key.chars().any(char::is_uppercase));

    let mut folded = Map::new();
    for (key, value) in exact.into_iter().chain(mixed) {
        let value = match value {
            Value::Object(table) => Value::Object(fold_keys(table)),
            other => other,
        };
        let key = key.to_lowercase();
        match (folded.get_mut(&key), value) {
            (Some(Value::Object(kept)), Value::Object(table)) => {
                for (k, v) in table {
                    kept.entry(k).or_insert(v);
                }
            }
            (Some(_), _) => {}
            (None, value) => {
                folded.insert(key, value);
            }
        }
    }
    folded
}

/// Default configuration path: `./config.json` if it exists, otherwise
/// `<config dir>/modbot/config.json`.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("modbot").join(CONFIG_FILE_NAME))
        .filter(|p| p.is_file())
        .unwrap_or(local)
}
