//! Tests for loading and validating config documents.

use serde_json::json;
use twcfg_config::{
    load, validate, ConfigDocument, DarkMode, ParseError, SourceFormat, ViolationKind,
};

fn load_json(value: serde_json::Value) -> ConfigDocument {
    load(&value.to_string(), SourceFormat::Json).expect("document should load")
}

#[test]
fn reference_document_is_valid() {
    let doc = load_json(json!({
        "content": ["./**/*.html"],
        "safelist": [],
        "plugins": ["pluginA"],
        "theme-config": { "pluginA": { "themes": ["business"] } },
        "dark-mode-strategy": "media"
    }));

    assert_eq!(doc.dark_mode, Some(DarkMode::Media));
    assert!(validate(&doc).is_ok());
}

#[test]
fn auto_dark_mode_yields_one_violation() {
    let doc = load_json(json!({
        "content": ["./**/*.html"],
        "plugins": [],
        "dark-mode-strategy": "auto"
    }));

    let err = validate(&doc).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].field, "darkMode");
    assert_eq!(err.violations()[0].kind, ViolationKind::UnrecognizedDarkMode);
    assert!(err.violations()[0].message.contains("auto"));
}

#[test]
fn dangling_theme_config_key_yields_one_violation() {
    let doc = load_json(json!({
        "plugins": ["pluginA"],
        "theme-config": { "pluginX": {} }
    }));

    let err = validate(&doc).unwrap_err();
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].field, "themeConfig.pluginX");
    assert_eq!(err.violations()[0].kind, ViolationKind::DanglingThemeConfig);
}

#[test]
fn empty_content_is_permitted() {
    let doc = load_json(json!({ "content": [] }));
    assert!(doc.content.is_empty());
    assert!(validate(&doc).is_ok());
}

#[test]
fn core_tailwind_keys_validate_cleanly() {
    let doc = load_json(json!({
        "content": ["./src/**/*.html"],
        "presets": [{ "theme": { "extend": {} } }],
        "corePlugins": { "preflight": false },
        "blocklist": ["container"],
        "separator": "_",
        "future": { "hoverOnlyWhenSupported": true },
        "experimental": { "optimizeUniversalDefaults": true },
        "plugins": ["daisyui"],
        "daisyui": { "themes": ["nord"] }
    }));

    assert_eq!(doc.theme_config.keys().collect::<Vec<_>>(), vec!["daisyui"]);
    assert!(validate(&doc).is_ok());
}

#[test]
fn core_plugins_in_a_script_config_validate_cleanly() {
    let doc = load(
        r#"
export default {
  content: ["./src/**/*.tsx"],
  presets: [require("./brand-preset")],
  corePlugins: { preflight: false },
}
"#,
        SourceFormat::JavaScript,
    )
    .expect("document should load");

    assert_eq!(doc.presets, Some(json!(["./brand-preset"])));
    assert!(validate(&doc).is_ok());
}

#[test]
fn empty_object_loads_with_defaults() {
    let doc = load("{}", SourceFormat::Json).unwrap();
    assert_eq!(doc, ConfigDocument::default());
    assert!(validate(&doc).is_ok());
}

#[test]
fn every_recognized_dark_mode_passes() {
    for mode in ["media", "class"] {
        let doc = load_json(json!({ "darkMode": mode }));
        assert!(validate(&doc).is_ok(), "{mode} should be accepted");
    }
}

#[test]
fn other_dark_modes_are_rejected() {
    for mode in ["auto", "Media", "selector", ""] {
        let doc = load_json(json!({ "darkMode": mode }));
        let err = validate(&doc).unwrap_err();
        assert_eq!(err.violations().len(), 1, "{mode} should be rejected");
    }
}

#[test]
fn violations_are_all_reported_together() {
    let doc = load_json(json!({
        "content": ["./src/[oops"],
        "plugins": ["daisyui"],
        "daisyui": { "themes": ["nord"] },
        "flowbite": {},
        "darkMode": "auto"
    }));

    let err = validate(&doc).unwrap_err();
    let kinds: Vec<_> = err.violations().iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ViolationKind::UnrecognizedDarkMode,
            ViolationKind::DanglingThemeConfig,
            ViolationKind::InvalidGlob,
        ]
    );
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = load("{ \"content\": [\"a\", }", SourceFormat::Json).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn wrong_shapes_are_parse_errors() {
    for source in [
        r#"{ "content": "./**/*.html" }"#,
        r#"{ "plugins": [1, 2] }"#,
        r#"{ "darkMode": false }"#,
        r#"{ "themeConfig": [] }"#,
        r#"[]"#,
    ] {
        let err = load(source, SourceFormat::Json).unwrap_err();
        assert!(
            matches!(err, ParseError::Shape { .. }),
            "{source} should be a shape error, got {err:?}"
        );
    }
}
