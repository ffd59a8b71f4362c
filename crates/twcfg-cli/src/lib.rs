//! twcfg CLI - check and normalize Tailwind configuration files.
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - `check` and `print`
//! - [`error`] - CLI errors and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`settings`] - Layered settings (flags, environment, twcfg.toml)
//! - [`ui`] - Terminal status messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod settings;
pub mod ui;

pub use error::{CliError, Result};
