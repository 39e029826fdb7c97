//! Handler catalog.
//!
//! Manifests name a handler *kind*; the catalog maps each kind to a factory
//! that builds the handler from the manifest. Embedders can register their
//! own kinds next to the built-in ones.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::builtin;
use super::command::CommandHandler;
use super::loader::CommandManifest;

/// Builds a handler from a manifest, or explains why the manifest is unusable.
pub type HandlerFactory =
    Box<dyn Fn(&CommandManifest) -> Result<Arc<dyn CommandHandler>, String> + Send + Sync>;

/// Outcome of looking a kind up in the catalog.
pub enum Instantiate {
    Built(Arc<dyn CommandHandler>),
    UnknownKind,
    Rejected(String),
}

pub struct HandlerCatalog {
    factories: BTreeMap<String, HandlerFactory>,
}

impl HandlerCatalog {
    /// A catalog with no kinds at all.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A catalog with every built-in kind (`ping`, `echo`, `reply`, `help`, `uptime`).
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        builtin::register_all(&mut catalog);
        catalog
    }

    /// Register (or replace) the factory for `kind`. Kinds are case-insensitive.
    pub fn register<F>(&mut self, kind: &str, factory: F)
    where
        F: Fn(&CommandManifest) -> Result<Arc<dyn CommandHandler>, String> + Send + Sync + 'static,
    {
        self.factories
            .insert(kind.trim().to_lowercase(), Box::new(factory));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(&kind.trim().to_lowercase())
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn instantiate(&self, kind: &str, manifest: &CommandManifest) -> Instantiate {
        match self.factories.get(&kind.trim().to_lowercase()) {
            Some(factory) => match factory(manifest) {
                Ok(handler) => Instantiate::Built(handler),
                Err(reason) => Instantiate::Rejected(reason),
            },
            None => Instantiate::UnknownKind,
        }
    }
}

impl Default for HandlerCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
