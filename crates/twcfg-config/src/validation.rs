//! Pluggable config validation strategies
//!
//! Validators never stop at the first problem: each one appends to a shared
//! list of [`Violation`]s so callers can report everything at once.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use regex::Regex;
use tracing::debug;

use crate::document::{ConfigDocument, DarkMode, SafelistEntry};
use crate::error::{ValidationError, Violation, ViolationKind};
use crate::registry::{PluginRegistry, Resolution};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Append every violation found in `doc` to `out`
    fn collect(&self, doc: &ConfigDocument, out: &mut Vec<Violation>);

    /// Run this validator alone
    fn validate(&self, doc: &ConfigDocument) -> Result<(), ValidationError> {
        let mut out = Vec::new();
        self.collect(doc, &mut out);
        ValidationError::from_violations(out)
    }
}

/// Structural and cross-field checks (no filesystem, no plugin registry).
///
/// - `darkMode` is `media` or `class`
/// - every `themeConfig` key names an entry in `plugins`
/// - every `content` entry is valid glob syntax
/// - every safelist pattern is a valid regular expression
///
/// # Example
///
/// ```
/// use twcfg_config::{ConfigDocument, ConfigValidator, SchemaValidator};
///
/// let mut doc = ConfigDocument::default();
/// doc.content = vec!["./src/**/*.html".into()];
///
/// SchemaValidator.validate(&doc).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn collect(&self, doc: &ConfigDocument, out: &mut Vec<Violation>) {
        if let Some(DarkMode::Unrecognized(value)) = &doc.dark_mode {
            out.push(Violation::new(
                "darkMode",
                ViolationKind::UnrecognizedDarkMode,
                format!("`{value}` is not a dark-mode strategy (expected \"media\" or \"class\")"),
            ));
        }

        for key in doc.theme_config.keys() {
            if doc.plugin_for_key(key).is_none() {
                out.push(Violation::new(
                    format!("themeConfig.{key}"),
                    ViolationKind::DanglingThemeConfig,
                    format!("settings for `{key}` have no matching entry in `plugins`"),
                ));
            }
        }

        for (index, pattern) in doc.content.iter().enumerate() {
            if let Err(message) = check_glob(pattern) {
                out.push(Violation::new(
                    format!("content[{index}]"),
                    ViolationKind::InvalidGlob,
                    message,
                ));
            }
        }

        for (index, entry) in doc.safelist.iter().enumerate() {
            if let SafelistEntry::Pattern { pattern, .. } = entry {
                if let Err(err) = Regex::new(pattern) {
                    out.push(Violation::new(
                        format!("safelist[{index}].pattern"),
                        ViolationKind::InvalidSafelistPattern,
                        err.to_string(),
                    ));
                }
            }
        }
    }
}

fn check_glob(pattern: &str) -> Result<(), String> {
    let body = pattern.strip_prefix('!').unwrap_or(pattern);
    if body.trim().is_empty() {
        return Err("glob pattern is empty".to_string());
    }
    OverrideBuilder::new(".")
        .add(pattern)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

/// Resolves every plugin against a [`PluginRegistry`] and checks settings of
/// plugins with a known schema.
///
/// # Example
///
/// ```
/// use twcfg_config::{ConfigDocument, ConfigValidator, PluginRegistry, RegistryValidator};
///
/// let mut doc = ConfigDocument::default();
/// doc.plugins = vec!["daisyui".into(), "./plugins/brand.js".into()];
///
/// let registry = PluginRegistry::with_plugins(["./plugins/brand.js"]);
/// RegistryValidator::new(registry).validate(&doc).unwrap();
/// ```
pub struct RegistryValidator {
    registry: PluginRegistry,
}

impl RegistryValidator {
    pub fn new(registry: PluginRegistry) -> Self {
        Self { registry }
    }
}

impl Default for RegistryValidator {
    fn default() -> Self {
        Self::new(PluginRegistry::new())
    }
}

impl ConfigValidator for RegistryValidator {
    fn collect(&self, doc: &ConfigDocument, out: &mut Vec<Violation>) {
        // several references can share one settings block
        let mut checked = HashSet::new();
        for (index, plugin) in doc.plugins.iter().enumerate() {
            match self.registry.resolve(plugin) {
                None => out.push(Violation::new(
                    format!("plugins[{index}]"),
                    ViolationKind::UnknownPlugin,
                    format!("`{plugin}` is not a known or registered plugin"),
                )),
                Some(Resolution::Known(known)) => {
                    if let Some((key, settings)) = doc.settings_for(plugin) {
                        if checked.insert(key) {
                            known.check_settings(key, settings, out);
                        }
                    }
                }
                Some(Resolution::Registered(_)) => {}
            }
        }
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs [`SchemaValidator`], then checks that the literal base directory of
/// every content glob exists under `root`. Files are never walked.
///
/// # Example
///
/// ```no_run
/// use twcfg_config::{ConfigDocument, ConfigValidator, FsValidator};
///
/// let mut doc = ConfigDocument::default();
/// doc.content = vec!["./src/**/*.html".into()];
///
/// FsValidator::new(".").validate(&doc).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn collect(&self, doc: &ConfigDocument, out: &mut Vec<Violation>) {
        SchemaValidator.collect(doc, out);

        for (index, pattern) in doc.content.iter().enumerate() {
            if pattern.starts_with('!') {
                continue;
            }
            let base = literal_base(pattern);
            let path = self.root.join(&base);
            if !path.exists() {
                out.push(Violation::new(
                    format!("content[{index}]"),
                    ViolationKind::MissingContentBase,
                    format!("`{}` does not exist", path.display()),
                ));
            }
        }
    }
}

/// Leading path segments without glob syntax: `./src/**/*.ts` → `./src`.
fn literal_base(pattern: &str) -> PathBuf {
    pattern
        .split('/')
        .take_while(|segment| !segment.contains(['*', '?', '[', '{']))
        .collect::<Vec<_>>()
        .join("/")
        .into()
}

/// Run several validators and merge their violations.
pub fn validate_all(
    doc: &ConfigDocument,
    validators: &[&dyn ConfigValidator],
) -> Result<(), ValidationError> {
    let mut out = Vec::new();
    for validator in validators {
        validator.collect(doc, &mut out);
    }
    debug!(
        validators = validators.len(),
        violations = out.len(),
        "validation finished"
    );
    ValidationError::from_violations(out)
}

/// Schema-only validation.
///
/// # Example
///
/// ```
/// use twcfg_config::{validate, ConfigDocument, DarkMode};
///
/// let mut doc = ConfigDocument::default();
/// doc.dark_mode = Some(DarkMode::from("auto"));
///
/// let err = validate(&doc).unwrap_err();
/// assert_eq!(err.violations()[0].field, "darkMode");
/// ```
pub fn validate(doc: &ConfigDocument) -> Result<(), ValidationError> {
    SchemaValidator.validate(doc)
}

/// Schema validation plus plugin resolution against `registry`.
pub fn validate_with_registry(
    doc: &ConfigDocument,
    registry: PluginRegistry,
) -> Result<(), ValidationError> {
    validate_all(doc, &[&SchemaValidator, &RegistryValidator::new(registry)])
}

/// Schema validation plus content path checks relative to `root`.
pub fn validate_fs(doc: &ConfigDocument, root: impl AsRef<Path>) -> Result<(), ValidationError> {
    FsValidator::new(root).validate(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PluginRef;
    use serde_json::json;

    fn doc_with_plugins(plugins: &[&str]) -> ConfigDocument {
        ConfigDocument {
            plugins: plugins.iter().map(|p| PluginRef::new(*p)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn schema_validator_accepts_empty_document() {
        assert!(SchemaValidator.validate(&ConfigDocument::default()).is_ok());
    }

    #[test]
    fn schema_validator_rejects_unknown_dark_mode() {
        let doc = ConfigDocument {
            dark_mode: Some(DarkMode::from("selector")),
            ..Default::default()
        };
        let err = SchemaValidator.validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].kind, ViolationKind::UnrecognizedDarkMode);
    }

    #[test]
    fn schema_validator_matches_settings_by_package_name() {
        let mut doc = doc_with_plugins(&["flowbite/plugin"]);
        doc.theme_config.insert("flowbite".into(), json!({ "charts": true }));
        assert!(SchemaValidator.validate(&doc).is_ok());
    }

    #[test]
    fn schema_validator_rejects_invalid_globs() {
        let doc = ConfigDocument {
            content: vec![
                "./src/**/*.html".into(),
                "./src/[abc.html".into(),
                "".into(),
                "!./src/vendor/**".into(),
            ],
            ..Default::default()
        };
        let err = SchemaValidator.validate(&doc).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["content[1]", "content[2]"]);
        assert!(err
            .violations()
            .iter()
            .all(|v| v.kind == ViolationKind::InvalidGlob));
    }

    #[test]
    fn schema_validator_rejects_bad_safelist_patterns() {
        let doc = ConfigDocument {
            safelist: vec![
                SafelistEntry::from("text-center"),
                SafelistEntry::Pattern {
                    pattern: "bg-(red|green".into(),
                    variants: vec![],
                },
            ],
            ..Default::default()
        };
        let err = SchemaValidator.validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "safelist[1].pattern");
    }

    #[test]
    fn schema_validator_collects_every_violation() {
        let mut doc = doc_with_plugins(&["daisyui"]);
        doc.dark_mode = Some(DarkMode::from("auto"));
        doc.theme_config.insert("pluginX".into(), json!({}));
        doc.theme_config.insert("pluginY".into(), json!({}));
        let err = SchemaValidator.validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn registry_validator_flags_unknown_plugins() {
        let doc = doc_with_plugins(&["daisyui", "pluginA"]);
        let err = RegistryValidator::default().validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "plugins[1]");
        assert_eq!(err.violations()[0].kind, ViolationKind::UnknownPlugin);
    }

    #[test]
    fn registry_validator_checks_daisyui_themes() {
        let mut doc = doc_with_plugins(&["daisyui"]);
        doc.theme_config
            .insert("daisyui".into(), json!({ "themes": ["business", "neon"] }));
        let err = RegistryValidator::default().validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].kind, ViolationKind::UnknownTheme);
    }

    #[test]
    fn registry_validator_checks_shared_settings_once() {
        let mut doc = doc_with_plugins(&["daisyui", "daisyui"]);
        doc.theme_config
            .insert("daisyui".into(), json!({ "themes": ["neon"] }));
        let err = RegistryValidator::default().validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "themeConfig.daisyui.themes[0]");

        let mut doc = doc_with_plugins(&["daisyui/src/index.js", "daisyui"]);
        doc.theme_config.insert("daisyui".into(), json!({ "themes": 3 }));
        let err = RegistryValidator::default().validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].kind, ViolationKind::InvalidPluginSettings);
    }

    #[test]
    fn validate_with_registry_merges_both_validators() {
        let mut doc = doc_with_plugins(&["pluginA"]);
        doc.dark_mode = Some(DarkMode::from("auto"));
        let err = validate_with_registry(&doc, PluginRegistry::new()).unwrap_err();
        assert_eq!(err.violations().len(), 2);

        assert!(validate_with_registry(
            &ConfigDocument {
                dark_mode: None,
                ..doc
            },
            PluginRegistry::with_plugins(["pluginA"])
        )
        .is_ok());
    }

    #[test]
    fn literal_base_stops_at_glob_segments() {
        assert_eq!(literal_base("./src/**/*.ts"), PathBuf::from("./src"));
        assert_eq!(literal_base("./index.html"), PathBuf::from("./index.html"));
        assert_eq!(literal_base("**/*.html"), PathBuf::from(""));
        assert_eq!(
            literal_base("./node_modules/flowbite/**/*.js"),
            PathBuf::from("./node_modules/flowbite")
        );
    }
}
