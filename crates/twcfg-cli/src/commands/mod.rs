//! Command implementations.

pub mod check;
pub mod print;

use std::path::{Path, PathBuf};

use tracing::debug;
use twcfg_config::{ConfigDiscovery, ConfigDocument, ConfigError};

pub use check::execute as check_execute;
pub use print::execute as print_execute;

/// Load an explicit config path, or discover one under `root`.
pub(crate) fn load_document(
    config: Option<&Path>,
    root: &Path,
) -> Result<(PathBuf, ConfigDocument), ConfigError> {
    let discovery = ConfigDiscovery::new(root);
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => discovery.find().ok_or_else(|| ConfigError::NotFound {
            root: discovery.root().to_path_buf(),
        })?,
    };
    debug!(path = %path.display(), "using config file");
    let doc = discovery.load_from(&path)?;
    Ok((path, doc))
}
