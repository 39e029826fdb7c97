//! Command registry.
//!
//! Built once at startup from a [`CommandSource`] and read-only afterwards.
//! Commands are kept in registration order so alias resolution is
//! deterministic: the first command declaring an alias wins.

use std::collections::HashMap;

use super::command::{Command, CommandModule};
use super::error::{LoadError, LoadWarning};
use super::loader::CommandSource;

/// An alias declared by more than one command. `kept` wins lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    pub alias: String,
    pub kept: String,
    pub shadowed: String,
}

/// What happened while building a registry.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names registered, in order of first registration.
    pub registered: Vec<String>,
    /// Modules skipped because they failed to load or validate.
    pub skipped: Vec<LoadWarning>,
    /// Names registered more than once; the later module replaced the earlier.
    pub replaced: Vec<String>,
    pub alias_conflicts: Vec<AliasConflict>,
}

#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    /// An empty registry, e.g. when the command directory was unreadable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `source`, logging every load success and failure.
    pub fn build(source: &dyn CommandSource) -> Result<Self, LoadError> {
        Self::build_with_report(source).map(|(registry, _)| registry)
    }

    /// Like [`Registry::build`] but also returns the [`LoadReport`].
    pub fn build_with_report(source: &dyn CommandSource) -> Result<(Self, LoadReport), LoadError> {
        tracing::info!("Loading commands from {}", source.describe());
        let discovered = source.discover()?;

        let mut registry = Self::empty();
        let mut report = LoadReport::default();

        for item in discovered {
            let outcome = item.and_then(|module| registry.insert(module, &mut report));
            if let Err(warning) = outcome {
                tracing::warn!("{}. Skipping it!", warning);
                report.skipped.push(warning);
            }
        }

        registry.check_aliases(&mut report);

        tracing::info!(
            "Registered {} command(s), skipped {}",
            registry.len(),
            report.skipped.len()
        );
        Ok((registry, report))
    }

    /// Validate and insert one module.
    fn insert(&mut self, module: CommandModule, report: &mut LoadReport) -> Result<(), LoadWarning> {
        let CommandModule {
            origin,
            name,
            aliases,
            description,
            handler,
        } = module;

        let name = match name.map(|n| normalize(&n)) {
            Some(n) if !n.is_empty() => n,
            _ => return Err(LoadWarning::MissingName { origin }),
        };
        let Some(handler) = handler else {
            return Err(LoadWarning::MissingHandler { origin });
        };

        let mut normalized: Vec<String> = Vec::with_capacity(aliases.len());
        for alias in aliases.iter().map(|a| normalize(a)) {
            if !alias.is_empty() && alias != name && !normalized.contains(&alias) {
                normalized.push(alias);
            }
        }

        let command = Command::new(name.clone(), normalized, description, origin, handler);

        match self.by_name.get(&name) {
            Some(&index) => {
                tracing::warn!(
                    "Command '{}' from {} replaces the one from {}",
                    name,
                    command.origin(),
                    self.commands[index].origin()
                );
                self.commands[index] = command;
                report.replaced.push(name.clone());
            }
            None => {
                self.by_name.insert(name.clone(), self.commands.len());
                tracing::info!("Command loaded: {} from {}", name, command.origin());
                self.commands.push(command);
                report.registered.push(name);
            }
        }
        Ok(())
    }

    /// Report aliases that are shadowed by an earlier alias or by a name.
    fn check_aliases(&self, report: &mut LoadReport) {
        let mut first_owner: HashMap<&str, &str> = HashMap::new();
        for command in &self.commands {
            for alias in command.aliases() {
                if let Some(owner) = self.get(alias).map(Command::name) {
                    tracing::warn!(
                        "Alias '{}' of command '{}' is shadowed by the command named '{}'",
                        alias,
                        command.name(),
                        owner
                    );
                    report.alias_conflicts.push(AliasConflict {
                        alias: alias.clone(),
                        kept: owner.to_string(),
                        shadowed: command.name().to_string(),
                    });
                    continue;
                }
                match first_owner.get(alias.as_str()) {
                    Some(&owner) => {
                        tracing::warn!(
                            "Alias '{}' is declared by both '{}' and '{}'; '{}' wins",
                            alias,
                            owner,
                            command.name(),
                            owner
                        );
                        report.alias_conflicts.push(AliasConflict {
                            alias: alias.clone(),
                            kept: owner.to_string(),
                            shadowed: command.name().to_string(),
                        });
                    }
                    None => {
                        first_owner.insert(alias.as_str(), command.name());
                    }
                }
            }
        }
    }

    /// Resolve `token` by exact name, then by alias in registration order.
    ///
    /// `token` is compared as given; the dispatcher case-folds it first.
    pub fn resolve(&self, token: &str) -> Option<&Command> {
        if let Some(&index) = self.by_name.get(token) {
            return self.commands.get(index);
        }
        self.commands.iter().find(|c| c.has_alias(token))
    }

    /// Exact name lookup, ignoring aliases.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.by_name.get(name).and_then(|&i| self.commands.get(i))
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(Command::name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
