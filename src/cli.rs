//! Command-line interface for the `modbot` binary.

use clap::{Args, Parser};
use std::path::PathBuf;

use crate::logging::LogOptions;

#[derive(Parser, Debug, Clone)]
#[command(name = "modbot", version, about = "Modular prefix-command chat bot")]
pub struct Cli {
    /// Configuration file (JSON, TOML or YAML). Defaults to ./config.json,
    /// then <config dir>/modbot/config.json.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory of command manifests; overrides `commands_dir` from the config.
    #[arg(long, value_name = "DIR")]
    pub commands_dir: Option<PathBuf>,

    /// Load configuration and commands, list them, and exit without connecting.
    #[arg(long)]
    pub check: bool,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Log filter used when RUST_LOG is unset.
    #[arg(long = "log-level", default_value = "info", value_name = "FILTER")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[arg(long = "log-json")]
    pub json: bool,

    /// Also write a daily-rolling log file into this directory.
    #[arg(long = "log-dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl From<&LogArgs> for LogOptions {
    fn from(args: &LogArgs) -> Self {
        Self {
            level: args.level.clone(),
            json: args.json,
            dir: args.dir.clone(),
        }
    }
}
