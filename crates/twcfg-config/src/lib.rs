//! Typed loading and validation of Tailwind-style configuration documents.
//!
//! A config declares which files the CSS tool scans, which classes are always
//! kept, which plugins load (and their settings), and the dark-mode strategy.
//! This crate reads that document from JSON, TOML, or a statically evaluated
//! `tailwind.config.{js,ts}`, and checks it without running the tool.
//!
//! ```
//! use twcfg_config::{load, validate, SourceFormat};
//!
//! let doc = load(
//!     r#"{
//!         "content": ["./**/*.html"],
//!         "plugins": ["daisyui"],
//!         "daisyui": { "themes": ["business"] },
//!         "darkMode": "media"
//!     }"#,
//!     SourceFormat::Json,
//! )
//! .unwrap();
//!
//! validate(&doc).unwrap();
//! ```

pub mod discovery;
pub mod document;
pub mod error;
pub mod format;
pub mod registry;
mod script;
pub mod validation;

pub use discovery::{discover, load_file, ConfigDiscovery, CONFIG_FILE_NAMES};
pub use document::{ConfigDocument, DarkMode, PluginRef, SafelistEntry};
pub use error::{ConfigError, ParseError, Result, ValidationError, Violation, ViolationKind};
pub use format::SourceFormat;
pub use registry::{KnownPlugin, PluginRegistry, Resolution, DAISYUI_THEMES};
pub use validation::{
    validate, validate_all, validate_fs, validate_with_registry, ConfigValidator, FsValidator,
    RegistryValidator, SchemaValidator,
};

/// Parse a config document from source text.
pub fn load(source: &str, format: SourceFormat) -> std::result::Result<ConfigDocument, ParseError> {
    ConfigDocument::parse(source, format)
}
