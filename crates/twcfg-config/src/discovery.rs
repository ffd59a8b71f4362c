//! File-based config discovery for CLI use
//!
//! Handles finding and loading Tailwind configuration files from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::ConfigDocument;
use crate::error::{ConfigError, Result};
use crate::format::SourceFormat;

/// File names searched by [`ConfigDiscovery::find`], in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.ts",
    "tailwind.config.cts",
    "tailwind.config.mts",
    "tailwind.config.json",
    "tailwind.config.toml",
];

/// File-based configuration discovery
///
/// Searches for Tailwind configuration files in conventional locations and loads them.
/// Library users holding the source text should use [`ConfigDocument::parse`] directly.
///
/// # Example
///
/// ```no_run
/// use twcfg_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    pub fn find(&self) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<ConfigDocument> {
        let path = self.find().ok_or_else(|| ConfigError::NotFound {
            root: self.root.clone(),
        })?;
        self.load_from(&path)
    }

    /// Load config from a specific file path, picking the format by extension
    pub fn load_from(&self, path: &Path) -> Result<ConfigDocument> {
        let format = SourceFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        debug!(path = %path.display(), %format, "loading config");

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        ConfigDocument::parse(&content, format).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load a config file from an explicit path (convenience function)
pub fn load_file(path: impl AsRef<Path>) -> Result<ConfigDocument> {
    let path = path.as_ref();
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    ConfigDiscovery::new(root).load_from(path)
}

/// Discover and load config from current directory (convenience function)
///
/// # Example
///
/// ```no_run
/// use twcfg_config::discover;
///
/// let config = discover().unwrap();
/// ```
pub fn discover() -> Result<ConfigDocument> {
    let root = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    ConfigDiscovery::new(&root).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn find_prefers_javascript_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tailwind.config.json"), "{}").unwrap();
        fs::write(dir.path().join("tailwind.config.js"), "module.exports = {}").unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(
            discovery.find().unwrap(),
            dir.path().join("tailwind.config.js")
        );
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.root(), dir.path());
        match discovery.load().unwrap_err() {
            ConfigError::NotFound { root } => assert_eq!(root, dir.path()),
            other => panic!("expected NotFound error, got {other:?}"),
        }
    }

    #[test]
    fn load_from_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tailwind.config.yaml");
        fs::write(&path, "content: []").unwrap();

        let result = ConfigDiscovery::new(dir.path()).load_from(&path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::UnsupportedFormat { .. }
        ));
    }

    #[test]
    fn load_wraps_parse_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tailwind.config.json");
        fs::write(&path, "{ \"content\": ").unwrap();

        match ConfigDiscovery::new(dir.path()).load().unwrap_err() {
            ConfigError::Parse { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
