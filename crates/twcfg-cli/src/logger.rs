//! Logging infrastructure for the twcfg CLI.
//!
//! Structured logging on top of `tracing`. The level is chosen from the global
//! flags, falling back to `RUST_LOG` and then to info.

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ui;

const VERBOSE_FILTER: &str = "twcfg=debug,twcfg_config=debug,twcfg_cli=debug";
const QUIET_FILTER: &str = "twcfg=error,twcfg_config=error,twcfg_cli=error";
const DEFAULT_FILTER: &str = "twcfg=info,twcfg_config=info,twcfg_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at startup, before any logging occurs.
///
/// 1. `--verbose`: DEBUG for twcfg crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`: custom filter
/// 4. Default: INFO for twcfg crates
///
/// Colors follow `--no-color`, then `NO_COLOR` / `FORCE_COLOR`, then the terminal.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    subscriber(filter, use_ansi(no_color)).init();
}

fn subscriber(filter: EnvFilter, ansi: bool) -> impl Subscriber + Send + Sync {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

fn use_ansi(no_color: bool) -> bool {
    !no_color && ui::should_use_color()
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
