//! Error types for configuration loading and validation.
//!
//! Loading fails fast with a [`ParseError`]; validation collects every problem
//! into a [`ValidationError`]. File-based entry points wrap both in
//! [`ConfigError`].

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::format::SourceFormat;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while turning raw source text into a [`crate::ConfigDocument`].
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// The source is not syntactically valid for its format
    #[error("invalid {format} syntax: {message}")]
    #[diagnostic(
        code(twcfg::parse::syntax),
        help("Fix the syntax error and try again")
    )]
    Syntax {
        format: SourceFormat,
        message: String,
    },

    /// The source parsed, but a field has the wrong type or shape
    #[error("invalid config shape: {message}")]
    #[diagnostic(code(twcfg::parse::shape))]
    Shape {
        message: String,
        #[help]
        hint: Option<String>,
    },

    /// A JS/TS config uses an expression that cannot be evaluated without running it
    #[error("cannot statically evaluate {expression} at line {line}, column {column}")]
    #[diagnostic(
        code(twcfg::parse::unsupported_expression),
        help("Only literals, arrays, objects and require()/import references are supported")
    )]
    UnsupportedExpression {
        expression: String,
        line: usize,
        column: usize,
    },

    /// A JS/TS config has no `module.exports =` or `export default`
    #[error("no exported configuration object found")]
    #[diagnostic(
        code(twcfg::parse::missing_export),
        help("Export the config with `module.exports = {{ ... }}` or `export default {{ ... }}`")
    )]
    MissingExport,
}

impl ParseError {
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
            hint: None,
        }
    }

    pub fn syntax(format: SourceFormat, message: impl Into<String>) -> Self {
        Self::Syntax {
            format,
            message: message.into(),
        }
    }
}

/// What kind of rule a [`Violation`] broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    UnrecognizedDarkMode,
    DanglingThemeConfig,
    InvalidGlob,
    InvalidSafelistPattern,
    UnknownPlugin,
    UnknownTheme,
    InvalidPluginSettings,
    MissingContentBase,
}

impl ViolationKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::UnrecognizedDarkMode => "twcfg::validation::unrecognized_dark_mode",
            Self::DanglingThemeConfig => "twcfg::validation::dangling_theme_config",
            Self::InvalidGlob => "twcfg::validation::invalid_glob",
            Self::InvalidSafelistPattern => "twcfg::validation::invalid_safelist_pattern",
            Self::UnknownPlugin => "twcfg::validation::unknown_plugin",
            Self::UnknownTheme => "twcfg::validation::unknown_theme",
            Self::InvalidPluginSettings => "twcfg::validation::invalid_plugin_settings",
            Self::MissingContentBase => "twcfg::validation::missing_content_base",
        }
    }

    fn help(self) -> Option<&'static str> {
        match self {
            Self::UnrecognizedDarkMode => Some("Use \"media\" or \"class\""),
            Self::DanglingThemeConfig => {
                Some("Add the plugin to `plugins` or remove its settings block")
            }
            Self::InvalidGlob => Some("Check brackets and braces in the pattern"),
            Self::InvalidSafelistPattern => Some("Safelist patterns must be valid regular expressions"),
            Self::UnknownPlugin => Some("Register the plugin name or check the spelling"),
            Self::UnknownTheme => Some("Use a built-in theme name or define a custom theme object"),
            Self::InvalidPluginSettings => None,
            Self::MissingContentBase => Some("Create the directory or fix the content path"),
        }
    }
}

/// A single rule violation found by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct Violation {
    /// Path of the offending field, using serialized key names (e.g. `themeConfig.pluginX`)
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

impl Diagnostic for Violation {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }
}

/// Every violation found in a structurally valid document.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("configuration has {} violation(s)", .violations.len())]
#[diagnostic(code(twcfg::validation::failed))]
pub struct ValidationError {
    #[related]
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Turn a collected list into a result: empty means valid.
    pub fn from_violations(violations: Vec<Violation>) -> std::result::Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }
}

/// File-level errors for discovery and loading from disk.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("no Tailwind config found in {}", .root.display())]
    #[diagnostic(
        code(twcfg::config::not_found),
        help("Create tailwind.config.js (or .json/.toml) or pass an explicit path")
    )]
    NotFound { root: PathBuf },

    #[error("unsupported configuration format: {}", .path.display())]
    #[diagnostic(
        code(twcfg::config::unsupported_format),
        help("Supported extensions: js, cjs, mjs, ts, cts, mts, json, toml")
    )]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse {}", .path.display())]
    #[diagnostic(code(twcfg::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        #[diagnostic_source]
        source: ParseError,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to read {}: {source}", .path.display())]
    #[diagnostic(code(twcfg::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
