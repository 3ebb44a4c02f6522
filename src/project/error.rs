//! Source loading errors

use std::path::PathBuf;

use thiserror::Error;

/// A source that could not be read at all. Problems inside a source that was
/// read are diagnostics, not errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory not found: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedExtension(PathBuf),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
