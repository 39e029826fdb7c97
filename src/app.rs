//! Bot startup.
//!
//! Startup is split in two so the fatal checks can be exercised without a
//! network: [`prepare`] loads configuration and commands, [`run`] connects.
//! Nothing in [`prepare`] touches the platform.

use anyhow::Context;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::commands::{DirectorySource, HandlerCatalog, Registry};
use crate::config::{self, BotConfig};
use crate::dispatch::Dispatcher;

/// Load configuration (fatal on error) and the command registry (non-fatal:
/// an unreadable directory leaves the registry empty).
pub fn prepare(cli: &Cli) -> anyhow::Result<Dispatcher> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut config = BotConfig::load(&config_path)
        .with_context(|| format!("cannot start with configuration {}", config_path.display()))?;

    if let Some(dir) = &cli.commands_dir {
        config.commands_dir = Some(dir.clone());
    }
    let commands_dir = config
        .commands_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("commands"));

    let source = DirectorySource::new(&commands_dir, HandlerCatalog::builtin());
    let registry = match Registry::build(&source) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::error!("Make sure the commands directory exists and holds your command manifests.");
            Registry::empty()
        }
    };
    if registry.is_empty() {
        tracing::warn!("No commands registered; every prefixed message will be answered as unknown");
    }

    Ok(Dispatcher::new(registry, config))
}

/// Print what `--check` found.
pub fn report(dispatcher: &Dispatcher) {
    let registry = dispatcher.session().registry();
    println!(
        "Configuration OK (prefix '{}'), {} command(s):",
        dispatcher.config().prefix(),
        registry.len()
    );
    for command in registry.iter() {
        if command.aliases().is_empty() {
            println!("  {}", command.name());
        } else {
            println!("  {} ({})", command.name(), command.aliases().join(", "));
        }
    }
}

/// Prepare, then either report (`--check`) or connect and serve until the
/// connection ends.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("modbot v{} starting", crate::VERSION);
    let dispatcher = prepare(&cli)?;

    if cli.check {
        report(&dispatcher);
        return Ok(());
    }

    connect(dispatcher).await
}

#[cfg(feature = "discord")]
async fn connect(dispatcher: Dispatcher) -> anyhow::Result<()> {
    crate::discord::start(dispatcher).await
}

#[cfg(not(feature = "discord"))]
async fn connect(_dispatcher: Dispatcher) -> anyhow::Result<()> {
    anyhow::bail!("modbot was built without a messaging platform; enable the `discord` feature")
}
