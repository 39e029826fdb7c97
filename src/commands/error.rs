//! Command loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// The command source as a whole could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read the commands directory at {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single module was rejected. The module is skipped; loading continues.
#[derive(Debug, Error)]
pub enum LoadWarning {
    #[error("the command at {origin} could not be read: {source}")]
    Unreadable {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("the command at {origin} is malformed: {reason}")]
    Malformed { origin: String, reason: String },

    #[error("the command at {origin} is missing a required \"name\" property")]
    MissingName { origin: String },

    #[error("the command at {origin} is missing a required \"handler\" property")]
    MissingHandler { origin: String },

    #[error("the command at {origin} names unknown handler kind '{kind}'")]
    UnknownHandler { origin: String, kind: String },

    #[error("the command at {origin} has an invalid '{kind}' handler: {reason}")]
    InvalidHandler {
        origin: String,
        kind: String,
        reason: String,
    },
}

impl LoadWarning {
    pub fn origin(&self) -> &str {
        match self {
            Self::Unreadable { origin, .. }
            | Self::Malformed { origin, .. }
            | Self::MissingName { origin }
            | Self::MissingHandler { origin }
            | Self::UnknownHandler { origin, .. }
            | Self::InvalidHandler { origin, .. } => origin,
        }
    }
}
