//! Print command implementation.

use crate::cli::{OutputFormat, PrintArgs};
use crate::commands::load_document;
use crate::error::{CliError, Result};
use std::path::Path;

/// Execute the print command: load, normalize, write to stdout.
pub fn execute(args: PrintArgs) -> Result<()> {
    let root = args.root.as_deref().unwrap_or(Path::new("."));
    let (_, doc) = load_document(args.config.as_deref(), root)?;

    let rendered = match args.format {
        OutputFormat::Json => doc.to_json_string().map_err(|e| CliError::Serialize {
            format: "JSON",
            message: e.to_string(),
        })?,
        OutputFormat::Toml => doc.to_toml_string().map_err(|e| CliError::Serialize {
            format: "TOML",
            message: e.to_string(),
        })?,
    };

    println!("{}", rendered.trim_end());
    Ok(())
}
