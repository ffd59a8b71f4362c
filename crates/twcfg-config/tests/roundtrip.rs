//! Property tests: serializing a document and loading it back is lossless.

use indexmap::IndexMap;
use proptest::prelude::*;
use serde_json::{json, Value};
use twcfg_config::{load, ConfigDocument, DarkMode, PluginRef, SafelistEntry, SourceFormat};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 #-]{0,10}".prop_map(Value::String),
        prop::collection::vec("[a-z]{1,8}", 0..4).prop_map(|names| json!(names)),
    ]
}

fn settings() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,8}", scalar(), 0..4)
        .prop_map(|map| Value::Object(map.into_iter().collect()))
}

fn safelist_entry() -> impl Strategy<Value = SafelistEntry> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,12}".prop_map(SafelistEntry::Class),
        (
            "[a-z(|)-]{1,12}",
            prop::collection::vec("[a-z]{1,6}", 0..3)
        )
            .prop_map(|(pattern, variants)| SafelistEntry::Pattern { pattern, variants }),
    ]
}

fn document() -> impl Strategy<Value = ConfigDocument> {
    let core = (
        prop::collection::vec("[./a-z*{},]{1,20}", 0..5),
        prop::collection::vec(safelist_entry(), 0..4),
        prop::collection::vec("[@a-z/-]{1,16}", 0..4),
        prop::collection::vec(("[a-z]{1,8}", settings()), 0..3),
        prop::option::of("[a-z]{0,8}"),
    );
    let extras = (
        prop::option::of("[a-z]{1,4}-"),
        prop::option::of(any::<bool>()),
        prop::option::of(settings()),
        prop::option::of(settings()),
        prop::collection::vec("[a-z-]{1,10}", 0..3),
        prop::option::of("[_:-]"),
    );
    (core, extras).prop_map(
        |(
            (content, safelist, plugins, theme_config, dark_mode),
            (prefix, important, theme, core_plugins, blocklist, separator),
        )| ConfigDocument {
            content,
            safelist,
            plugins: plugins.into_iter().map(PluginRef::new).collect(),
            theme_config: theme_config.into_iter().collect::<IndexMap<_, _>>(),
            dark_mode: dark_mode.map(DarkMode::from),
            prefix,
            important: important.map(Value::Bool),
            theme,
            core_plugins,
            blocklist,
            separator,
            ..Default::default()
        },
    )
}

proptest! {
    #[test]
    fn json_round_trip(doc in document()) {
        let text = doc.to_json_string().unwrap();
        let loaded = load(&text, SourceFormat::Json).unwrap();
        prop_assert_eq!(loaded, doc);
    }

    #[test]
    fn toml_round_trip(doc in document()) {
        let text = doc.to_toml_string().unwrap();
        let loaded = load(&text, SourceFormat::Toml).unwrap();
        prop_assert_eq!(loaded, doc);
    }
}
