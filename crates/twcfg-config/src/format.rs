//! Source formats a config document can be read from.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Toml,
    /// JavaScript module, read by static evaluation
    JavaScript,
    /// TypeScript module, read by static evaluation
    TypeScript,
}

impl SourceFormat {
    /// Pick a format from a file extension.
    ///
    /// Returns `None` for extensions that no loader understands.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "js" | "cjs" | "mjs" => Some(Self::JavaScript),
            "ts" | "cts" | "mts" => Some(Self::TypeScript),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
        };
        f.write_str(name)
    }
}
