//! Known plugins and name resolution.
//!
//! Plugin references are plain module specifiers. [`KnownPlugin`] is the closed
//! set this crate understands; [`PluginRegistry`] adds names registered at
//! runtime so project-local plugins can pass the registry check too.

use std::fmt;

use indexmap::IndexSet;
use serde_json::Value;

use crate::document::PluginRef;
use crate::error::{Violation, ViolationKind};

/// Themes bundled with daisyUI.
pub const DAISYUI_THEMES: &[&str] = &[
    "light",
    "dark",
    "cupcake",
    "bumblebee",
    "emerald",
    "corporate",
    "synthwave",
    "retro",
    "cyberpunk",
    "valentine",
    "halloween",
    "garden",
    "forest",
    "aqua",
    "lofi",
    "pastel",
    "fantasy",
    "wireframe",
    "black",
    "luxury",
    "dracula",
    "cmyk",
    "autumn",
    "business",
    "acid",
    "lemonade",
    "night",
    "coffee",
    "winter",
    "dim",
    "nord",
    "sunset",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownPlugin {
    DaisyUi,
    Flowbite,
    Typography,
    Forms,
    AspectRatio,
    ContainerQueries,
    Animate,
    Preline,
}

impl KnownPlugin {
    pub const ALL: &'static [KnownPlugin] = &[
        Self::DaisyUi,
        Self::Flowbite,
        Self::Typography,
        Self::Forms,
        Self::AspectRatio,
        Self::ContainerQueries,
        Self::Animate,
        Self::Preline,
    ];

    /// Package name the plugin is published under.
    pub fn package(self) -> &'static str {
        match self {
            Self::DaisyUi => "daisyui",
            Self::Flowbite => "flowbite",
            Self::Typography => "@tailwindcss/typography",
            Self::Forms => "@tailwindcss/forms",
            Self::AspectRatio => "@tailwindcss/aspect-ratio",
            Self::ContainerQueries => "@tailwindcss/container-queries",
            Self::Animate => "tailwindcss-animate",
            Self::Preline => "preline",
        }
    }

    /// Resolve a reference by its package name (`flowbite/plugin` → `Flowbite`).
    pub fn resolve(plugin: &PluginRef) -> Option<Self> {
        let package = plugin.package_name();
        Self::ALL.iter().copied().find(|known| known.package() == package)
    }

    /// Check the plugin's settings block, if this plugin has a known schema.
    pub fn check_settings(self, key: &str, settings: &Value, out: &mut Vec<Violation>) {
        if self == Self::DaisyUi {
            check_daisyui_settings(key, settings, out);
        }
    }
}

impl fmt::Display for KnownPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package())
    }
}

/// `themes` is `true`, `false`, or a list of theme names and custom theme objects.
fn check_daisyui_settings(key: &str, settings: &Value, out: &mut Vec<Violation>) {
    let Value::Object(settings) = settings else {
        out.push(Violation::new(
            format!("themeConfig.{key}"),
            ViolationKind::InvalidPluginSettings,
            "daisyUI settings must be an object",
        ));
        return;
    };

    let Some(themes) = settings.get("themes") else {
        return;
    };
    let field = format!("themeConfig.{key}.themes");
    match themes {
        Value::Bool(_) => {}
        Value::Array(entries) => {
            for (index, entry) in entries.iter().enumerate() {
                match entry {
                    Value::String(name) => {
                        // `--default` / `--prefersdark` flags are daisyUI v5 syntax
                        let base = name.split_whitespace().next().unwrap_or(name.as_str());
                        if !DAISYUI_THEMES.contains(&base) {
                            out.push(Violation::new(
                                format!("{field}[{index}]"),
                                ViolationKind::UnknownTheme,
                                format!("`{name}` is not a built-in daisyUI theme"),
                            ));
                        }
                    }
                    Value::Object(_) => {}
                    _ => out.push(Violation::new(
                        format!("{field}[{index}]"),
                        ViolationKind::InvalidPluginSettings,
                        "theme entries must be a name or a custom theme object",
                    )),
                }
            }
        }
        _ => out.push(Violation::new(
            field,
            ViolationKind::InvalidPluginSettings,
            "`themes` must be true, false, or a list of themes",
        )),
    }
}

/// Built-in plugins plus names registered at runtime.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    extra: IndexSet<String>,
}

/// How a reference resolved against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'r> {
    Known(KnownPlugin),
    Registered(&'r str),
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an additional plugin specifier or package name.
    pub fn register(&mut self, name: impl Into<String>) -> &mut Self {
        self.extra.insert(name.into());
        self
    }

    pub fn with_plugins<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.register(name);
        }
        registry
    }

    pub fn resolve(&self, plugin: &PluginRef) -> Option<Resolution<'_>> {
        if let Some(known) = KnownPlugin::resolve(plugin) {
            return Some(Resolution::Known(known));
        }
        self.extra
            .iter()
            .find(|name| plugin.matches_key(name))
            .map(|name| Resolution::Registered(name.as_str()))
    }
}
