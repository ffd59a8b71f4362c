//! Error handling for the twcfg CLI.
//!
//! Commands return [`CliError`]; `main` converts it into a `miette::Report`
//! so library diagnostics (codes, help, sources) render intact.

use miette::{Diagnostic, Report};
use thiserror::Error;
use twcfg_config::ConfigError;

pub type Result<T> = std::result::Result<T, CliError>;

/// Top-level CLI error type.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Config discovery or parsing failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// The config loaded but broke validation rules (already printed)
    #[error("check failed with {count} violation(s)")]
    #[diagnostic(code(twcfg::cli::check_failed))]
    CheckFailed { count: usize },

    /// Settings layers could not be merged into valid settings
    #[error("invalid twcfg settings: {0}")]
    #[diagnostic(
        code(twcfg::cli::settings),
        help("Check twcfg.toml and TWCFG_* environment variables")
    )]
    Settings(Box<figment::Error>),

    /// The document could not be written in the requested format
    #[error("failed to serialize config as {format}: {message}")]
    #[diagnostic(code(twcfg::cli::serialize))]
    Serialize {
        format: &'static str,
        message: String,
    },
}

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    Report::new(err)
}
