//! Error types for archgen

use std::path::PathBuf;

/// Errors raised while loading the manifest or materializing it on disk
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("{marker} not found in {}", root.display())]
    Precondition { marker: String, root: PathBuf },

    #[error("Failed to create {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

impl ScaffoldError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, ScaffoldError::Precondition { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
