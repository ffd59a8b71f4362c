//! Command-line interface definition for twcfg.
//!
//! - `twcfg check` - Load a config and report every violation
//! - `twcfg print` - Print the normalized config document

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::settings::SettingsOverrides;

/// twcfg - check Tailwind configuration files without running Tailwind
#[derive(Parser, Debug)]
#[command(
    name = "twcfg",
    version,
    about = "Check and normalize Tailwind configuration files",
    long_about = "twcfg loads tailwind.config.{js,ts,json,toml} without executing it,\n\
                  validates content globs, plugin settings and the dark-mode strategy,\n\
                  and reports every problem at once."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a config file
    ///
    /// Exits non-zero when the config cannot be parsed or breaks any rule.
    Check(CheckArgs),

    /// Print the normalized config
    ///
    /// Top-level plugin settings are moved under `themeConfig`.
    Print(PrintArgs),
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Config file to check (default: discover in --root)
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root used for discovery and content path checks
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Fail on plugins that are neither built in nor registered
    #[arg(long)]
    pub strict_plugins: bool,

    /// Check that content glob base directories exist
    #[arg(long)]
    pub check_paths: bool,

    /// Register an extra plugin name for --strict-plugins (repeatable)
    #[arg(long = "known-plugin", value_name = "NAME")]
    pub known_plugins: Vec<String>,

    /// Print violations as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// Only flags the user actually passed override lower settings layers.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            root: self.root.clone(),
            strict_plugins: self.strict_plugins.then_some(true),
            check_paths: self.check_paths.then_some(true),
            known_plugins: self.known_plugins.clone(),
        }
    }
}

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Config file to print (default: discover in --root)
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root used for discovery
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Toml,
}
