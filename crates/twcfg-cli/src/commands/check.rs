//! Check command implementation.
//!
//! Loads the config and runs the validators selected by the settings layers.

use tracing::debug;
use twcfg_config::{
    validate_all, ConfigValidator, FsValidator, PluginRegistry, RegistryValidator,
    SchemaValidator,
};

use crate::cli::CheckArgs;
use crate::commands::load_document;
use crate::error::{CliError, Result};
use crate::settings::CheckSettings;
use crate::ui;

/// Execute the check command.
///
/// 1. Merge settings (flags, environment, twcfg.toml)
/// 2. Load the config, explicit or discovered
/// 3. Run schema checks, plus filesystem and registry checks when enabled
/// 4. Report every violation
///
/// Without `--strict-plugins`, unknown plugins are printed as warnings only.
pub fn execute(args: CheckArgs) -> Result<()> {
    let settings = CheckSettings::load(&args.overrides())?;
    debug!(?settings, "check settings");

    let (path, doc) = load_document(args.config.as_deref(), &settings.root)?;
    ui::info(&format!("Checking {}", path.display()));

    let registry = RegistryValidator::new(PluginRegistry::with_plugins(
        settings.known_plugins.iter().cloned(),
    ));
    let fs = FsValidator::new(&settings.root);

    let base: &dyn ConfigValidator = if settings.check_paths {
        &fs
    } else {
        &SchemaValidator
    };
    let mut validators = vec![base];
    if settings.strict_plugins {
        validators.push(&registry);
    } else if let Err(unresolved) = registry.validate(&doc) {
        for violation in unresolved.violations() {
            ui::warning(&violation.to_string());
        }
    }

    match validate_all(&doc, &validators) {
        Ok(()) => {
            if args.json {
                println!("[]");
            }
            ui::success("Configuration is valid!");
            Ok(())
        }
        Err(err) => {
            if args.json {
                let report = serde_json::to_string_pretty(err.violations()).map_err(|e| {
                    CliError::Serialize {
                        format: "JSON",
                        message: e.to_string(),
                    }
                })?;
                println!("{report}");
            } else {
                for violation in err.violations() {
                    ui::error(&violation.to_string());
                }
            }
            Err(CliError::CheckFailed {
                count: err.violations().len(),
            })
        }
    }
}
