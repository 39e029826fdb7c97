//! modbot
//!
//! A modular prefix-command chat bot and a small terminal countdown timer.
//!
//! The bot side is split into a command [`commands::Registry`] built once at
//! startup from a [`commands::CommandSource`], and a [`dispatch::Dispatcher`]
//! that routes every inbound message on its own task. The platform adapter
//! (Discord, behind the `discord` feature) only translates events.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod timer;
pub mod utils;

#[cfg(feature = "discord")]
pub mod discord;

#[cfg(test)]
mod tests;

/// Crate version, reported in logs and by the `uptime` command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
