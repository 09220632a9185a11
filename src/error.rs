//! Error types for loading configuration sources

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a properties source.
///
/// Only the strict `try_*` constructors of [`crate::ConfigStore`] surface these;
/// the regular loaders log them and fall back to an empty store.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed reading properties stream: {0}")]
    Stream(#[from] io::Error),

    #[error("malformed \\uxxxx escape on line {line}")]
    MalformedEscape { line: usize },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
