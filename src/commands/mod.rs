//! Commands Module
//!
//! The command model, the handler catalog with the built-in handler kinds,
//! command sources (manifest directory or in-memory list) and the registry
//! the dispatcher resolves against.

pub mod builtin;
pub mod catalog;
mod command;
mod error;
pub mod loader;
mod registry;

pub use catalog::{HandlerCatalog, HandlerFactory, Instantiate};
pub use command::{Command, CommandHandler, CommandModule};
pub use error::{LoadError, LoadWarning};
pub use loader::{CommandManifest, CommandSource, DirectorySource, Discovered, StaticSource};
pub use registry::{AliasConflict, LoadReport, Registry};
