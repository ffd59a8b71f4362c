//! Status messages for terminal output.
//!
//! All messages go to stderr so stdout stays clean for `print` and `--json`.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;

static COLOR: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Initialize color support. `--no-color` always wins.
pub fn init_colors(no_color: bool) {
    COLOR.store(!no_color && should_use_color(), Ordering::Relaxed);
}

fn colored() -> bool {
    COLOR.load(Ordering::Relaxed)
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    if colored() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {message}");
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if colored() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if colored() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    if colored() {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    } else {
        eprintln!("✗ {message}");
    }
}
