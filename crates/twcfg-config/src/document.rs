//! The configuration document model.
//!
//! This mirrors the shape of a `tailwind.config.js` export in Rust types. Values
//! that only a plugin understands stay as opaque [`serde_json::Value`]s.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::format::SourceFormat;
use crate::script;

/// Keys that map onto [`ConfigDocument`] fields. Everything else at the top
/// level is treated as a plugin settings block.
const DOCUMENT_KEYS: &[&str] = &[
    "content",
    "safelist",
    "plugins",
    "themeConfig",
    "theme-config",
    "theme_config",
    "darkMode",
    "dark-mode-strategy",
    "dark_mode",
    "prefix",
    "important",
    "theme",
    "presets",
    "corePlugins",
    "blocklist",
    "separator",
    "future",
    "experimental",
];

const THEME_CONFIG_KEYS: &[&str] = &["themeConfig", "theme-config", "theme_config"];

/// Build inputs for a Tailwind-style CSS tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    /// Glob patterns for files the tool scans for class names
    #[serde(default)]
    pub content: Vec<String>,

    /// Classes (or class patterns) that are always generated
    #[serde(default)]
    pub safelist: Vec<SafelistEntry>,

    /// Plugins in load order
    #[serde(default)]
    pub plugins: Vec<PluginRef>,

    /// Plugin-specific settings keyed by plugin name
    #[serde(
        default,
        alias = "theme-config",
        alias = "theme_config",
        deserialize_with = "null_as_empty",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub theme_config: IndexMap<String, Value>,

    #[serde(
        default,
        alias = "dark-mode-strategy",
        alias = "dark_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub dark_mode: Option<DarkMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub important: Option<Value>,

    /// Theme overrides, interpreted only by the external tool
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub presets: Option<Value>,

    /// Core plugins to enable or disable (`{ "preflight": false }` or a list)
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub core_plugins: Option<Value>,

    /// Classes that are never generated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocklist: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub future: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub experimental: Option<Value>,
}

/// An opaque key that is present is `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// `themeConfig: null` reads as no settings at all.
fn null_as_empty<'de, D>(deserializer: D) -> Result<IndexMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IndexMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ConfigDocument {
    /// Parse a document from source text in the given format.
    ///
    /// ```
    /// use twcfg_config::{ConfigDocument, DarkMode, SourceFormat};
    ///
    /// let doc = ConfigDocument::parse(
    ///     r#"{ "content": ["./**/*.html"], "darkMode": "class" }"#,
    ///     SourceFormat::Json,
    /// )
    /// .unwrap();
    /// assert_eq!(doc.dark_mode, Some(DarkMode::Class));
    /// ```
    pub fn parse(source: &str, format: SourceFormat) -> Result<Self, ParseError> {
        debug!(%format, bytes = source.len(), "parsing config document");
        let value = match format {
            SourceFormat::Json => serde_json::from_str::<Value>(source)
                .map_err(|e| ParseError::syntax(format, e.to_string()))?,
            SourceFormat::Toml => {
                let table: toml::Table = toml::from_str(source)
                    .map_err(|e| ParseError::syntax(format, e.to_string()))?;
                serde_json::to_value(table).map_err(|e| ParseError::Shape {
                    message: e.to_string(),
                    hint: Some("TOML to JSON conversion failed".to_string()),
                })?
            }
            SourceFormat::JavaScript | SourceFormat::TypeScript => {
                script::evaluate(source, format)?
            }
        };
        Self::from_value(value)
    }

    /// Create from an already parsed value (for programmatic config).
    ///
    /// Top-level keys that are not document fields are moved into
    /// `themeConfig`, so `{ "daisyui": { ... } }` and
    /// `{ "themeConfig": { "daisyui": { ... } } }` load identically.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        let Value::Object(mut object) = value else {
            return Err(ParseError::Shape {
                message: format!("expected an object at the top level, found {}", kind_of(&value)),
                hint: Some("A config document is a single object".to_string()),
            });
        };

        promote_plugin_settings(&mut object)?;

        serde_json::from_value(Value::Object(object)).map_err(|e| ParseError::Shape {
            message: e.to_string(),
            hint: None,
        })
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize as TOML. Fails if an opaque value contains `null`.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Dark-mode strategy the tool applies; `media` when unset.
    pub fn effective_dark_mode(&self) -> DarkMode {
        self.dark_mode.clone().unwrap_or(DarkMode::Media)
    }

    /// The plugin a `themeConfig` key belongs to, if any.
    pub fn plugin_for_key(&self, key: &str) -> Option<&PluginRef> {
        self.plugins.iter().find(|plugin| plugin.matches_key(key))
    }

    /// Settings block for a plugin and the key it is stored under, looked up
    /// by specifier first, then by package name.
    pub fn settings_for(&self, plugin: &PluginRef) -> Option<(&str, &Value)> {
        self.theme_config
            .get_key_value(plugin.as_str())
            .or_else(|| self.theme_config.get_key_value(plugin.package_name()))
            .map(|(key, settings)| (key.as_str(), settings))
    }
}

fn promote_plugin_settings(object: &mut Map<String, Value>) -> Result<(), ParseError> {
    let extra: Vec<String> = object
        .keys()
        .filter(|key| !DOCUMENT_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();
    if extra.is_empty() {
        return Ok(());
    }

    let target = THEME_CONFIG_KEYS
        .iter()
        .find(|key| object.contains_key(**key))
        .copied()
        .unwrap_or("themeConfig");

    let mut settings = match object.remove(target) {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            return Err(ParseError::Shape {
                message: format!("`{target}` must be an object, found {}", kind_of(&other)),
                hint: Some("Map plugin names to their settings".to_string()),
            });
        }
    };

    for key in extra {
        let Some(value) = object.remove(&key) else {
            continue;
        };
        if settings.contains_key(&key) {
            warn!(key = %key, "top-level plugin settings shadowed by `{target}` entry, ignoring");
            continue;
        }
        debug!(key = %key, "promoting top-level plugin settings");
        settings.insert(key, value);
    }

    object.insert(target.to_string(), Value::Object(settings));
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// How dark-mode variants are triggered.
///
/// Any string is accepted when loading; unrecognized strategies are kept so
/// validation can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DarkMode {
    /// Follow the `prefers-color-scheme` media query
    Media,
    /// Toggle on an explicit `dark` class
    Class,
    Unrecognized(String),
}

impl DarkMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Media => "media",
            Self::Class => "class",
            Self::Unrecognized(other) => other,
        }
    }
}

impl From<String> for DarkMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "media" => Self::Media,
            "class" => Self::Class,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for DarkMode {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<DarkMode> for String {
    fn from(mode: DarkMode) -> Self {
        match mode {
            DarkMode::Unrecognized(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A safelist entry: a literal class name or a regex with optional variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SafelistEntry {
    Class(String),
    Pattern {
        pattern: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        variants: Vec<String>,
    },
}

impl From<&str> for SafelistEntry {
    fn from(class: &str) -> Self {
        Self::Class(class.to_string())
    }
}

/// A plugin as the tool would `require` it, e.g. `flowbite/plugin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginRef(String);

impl PluginRef {
    pub fn new(specifier: impl Into<String>) -> Self {
        Self(specifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The specifier without any subpath.
    ///
    /// ```
    /// use twcfg_config::PluginRef;
    ///
    /// assert_eq!(PluginRef::new("flowbite/plugin").package_name(), "flowbite");
    /// assert_eq!(PluginRef::new("@tailwindcss/forms").package_name(), "@tailwindcss/forms");
    /// ```
    pub fn package_name(&self) -> &str {
        let spec = self.0.as_str();
        let mut segments = spec.split('/');
        if spec.starts_with('@') {
            match (segments.next(), segments.next()) {
                (Some(scope), Some(name)) => &spec[..scope.len() + 1 + name.len()],
                _ => spec,
            }
        } else {
            segments.next().unwrap_or(spec)
        }
    }

    /// Whether a settings key names this plugin, by full specifier or package name.
    pub fn matches_key(&self, key: &str) -> bool {
        key == self.as_str() || key == self.package_name()
    }
}

impl From<&str> for PluginRef {
    fn from(specifier: &str) -> Self {
        Self::new(specifier)
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
