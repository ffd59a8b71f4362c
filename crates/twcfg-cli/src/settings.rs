//! Layered settings for the check command.
//!
//! Priority: CLI flags > `TWCFG_*` environment variables > `twcfg.toml` > defaults

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Settings file searched for in the working directory and its parents.
pub const SETTINGS_FILE: &str = "twcfg.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSettings {
    /// Directory used for discovery and content path checks
    pub root: PathBuf,

    /// Resolve plugins against the registry
    pub strict_plugins: bool,

    /// Check content glob base directories on disk
    pub check_paths: bool,

    /// Extra plugin names accepted by the registry
    pub known_plugins: Vec<String>,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            strict_plugins: false,
            check_paths: false,
            known_plugins: Vec::new(),
        }
    }
}

/// Values taken from command-line flags. `None`/empty means "not given".
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_plugins: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_paths: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub known_plugins: Vec<String>,
}

impl CheckSettings {
    /// Load settings from all sources.
    pub fn load(overrides: &SettingsOverrides) -> Result<Self> {
        Self::figment(Path::new(SETTINGS_FILE), overrides)
            .extract()
            .map_err(|err| CliError::Settings(Box::new(err)))
    }

    pub fn figment(settings_file: &Path, overrides: &SettingsOverrides) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(settings_file))
            .merge(Env::prefixed("TWCFG_"))
            .merge(Serialized::defaults(overrides))
    }
}
