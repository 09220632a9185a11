//! Shared CLI utilities.

use anyhow::{Context, Result};
use std::path::Path;
use taglog::ConfigStore;

/// Load the store for a command.
///
/// An explicitly named file must load cleanly; otherwise the config is discovered
/// and any failure degrades to an empty store, as it would inside an application.
pub fn load_store(config: Option<&Path>) -> Result<ConfigStore> {
    match config {
        Some(path) => ConfigStore::try_load(path)
            .with_context(|| format!("Failed loading config file: {}", path.display())),
        None => Ok(ConfigStore::discover()),
    }
}
