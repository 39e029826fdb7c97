//! Command sources.
//!
//! A [`CommandSource`] enumerates command modules for the registry. The
//! default [`DirectorySource`] reads one manifest per file from a directory;
//! [`StaticSource`] hands over modules built in code.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::catalog::{HandlerCatalog, Instantiate};
use super::command::CommandModule;
use super::error::{LoadError, LoadWarning};

/// One discovered module, or the reason it could not even be turned into one.
pub type Discovered = Result<CommandModule, LoadWarning>;

/// Enumerates command modules. Validation happens in the registry.
pub trait CommandSource {
    /// Human-readable description for log lines.
    fn describe(&self) -> String;

    /// Enumerate modules in a stable order. Fails only when the source as a
    /// whole is unavailable; per-module problems are returned inline.
    fn discover(&self) -> Result<Vec<Discovered>, LoadError>;
}

/// On-disk command description.
///
/// ```toml
/// name = "hello"
/// aliases = ["hi"]
/// description = "Say hello"
/// handler = "reply"
/// response = "Hello, {author}!"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Handler kind from the [`HandlerCatalog`].
    #[serde(default)]
    pub handler: Option<String>,
    /// Response template for the `reply` kind.
    #[serde(default)]
    pub response: Option<String>,
    /// Anything else, for custom handler kinds.
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_json::Value>,
}

/// Manifest file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(self, body: &str) -> Result<CommandManifest, String> {
        match self {
            Self::Toml => toml::from_str(body).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(body).map_err(|e| e.to_string()),
        }
    }
}

/// Loads `*.toml` and `*.json` manifests from a directory, in file-name order.
pub struct DirectorySource {
    dir: PathBuf,
    catalog: HandlerCatalog,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, catalog: HandlerCatalog) -> Self {
        Self {
            dir: dir.into(),
            catalog,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_file(&self, path: &Path, format: ManifestFormat) -> Discovered {
        let origin = path.display().to_string();
        let body = std::fs::read_to_string(path).map_err(|source| LoadWarning::Unreadable {
            origin: origin.clone(),
            source,
        })?;
        let manifest = format.parse(&body).map_err(|reason| LoadWarning::Malformed {
            origin: origin.clone(),
            reason,
        })?;
        manifest_to_module(origin, manifest, &self.catalog)
    }
}

impl CommandSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }

    fn discover(&self) -> Result<Vec<Discovered>, LoadError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| LoadError::ReadDir {
            path: self.dir.clone(),
            source,
        })?;

        let mut files: Vec<(PathBuf, ManifestFormat)> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| ManifestFormat::from_path(&path).map(|f| (path, f)))
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));

        tracing::debug!(
            "Found {} manifest file(s) in {}",
            files.len(),
            self.dir.display()
        );

        Ok(files
            .iter()
            .map(|(path, format)| self.load_file(path, *format))
            .collect())
    }
}

/// Turn a parsed manifest into a module, resolving its handler kind.
pub fn manifest_to_module(
    origin: String,
    manifest: CommandManifest,
    catalog: &HandlerCatalog,
) -> Discovered {
    let handler = match manifest.handler.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(kind) => match catalog.instantiate(kind, &manifest) {
            Instantiate::Built(handler) => Some(handler),
            Instantiate::UnknownKind => {
                return Err(LoadWarning::UnknownHandler {
                    origin,
                    kind: kind.to_string(),
                });
            }
            Instantiate::Rejected(reason) => {
                return Err(LoadWarning::InvalidHandler {
                    origin,
                    kind: kind.to_string(),
                    reason,
                });
            }
        },
    };

    Ok(CommandModule {
        origin,
        name: manifest.name,
        aliases: manifest.aliases,
        description: manifest.description,
        handler,
    })
}

/// Modules registered in code, handed over as-is and in order.
pub struct StaticSource {
    label: String,
    modules: Vec<CommandModule>,
}

impl StaticSource {
    pub fn new(modules: Vec<CommandModule>) -> Self {
        Self {
            label: "static".to_string(),
            modules,
        }
    }

    pub fn labelled(label: impl Into<String>, modules: Vec<CommandModule>) -> Self {
        Self {
            label: label.into(),
            modules,
        }
    }
}

impl CommandSource for StaticSource {
    fn describe(&self) -> String {
        format!("{} source ({} modules)", self.label, self.modules.len())
    }

    fn discover(&self) -> Result<Vec<Discovered>, LoadError> {
        Ok(self.modules.iter().cloned().map(Ok).collect())
    }
}
