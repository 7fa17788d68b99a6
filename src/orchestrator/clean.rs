//! Removal of classic docs build products.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{DocsError, Result};
use crate::stage::GENERATED_SUBDIRS;

/// Directories owned by the docs build: the isolated arch tree in the build
/// root and the generated pages in the docs directory.
pub fn clean_targets(config: &Config) -> Vec<PathBuf> {
    let mut targets = vec![config.arch_dir()];
    targets.extend(GENERATED_SUBDIRS.iter().map(|d| config.docs_dir.join(d)));
    targets
}

/// Remove every existing clean target and return the ones removed.
pub fn clean(config: &Config) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for path in clean_targets(config) {
        if !path.is_dir() {
            debug!(path = %path.display(), "Nothing to remove");
            continue;
        }
        std::fs::remove_dir_all(&path).map_err(|source| DocsError::Clean {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Removed");
        removed.push(path);
    }
    Ok(removed)
}
