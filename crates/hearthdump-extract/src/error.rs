//! Error types for extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during extraction.
#[derive(Debug, Error)]
pub enum Error {
    /// Image option name is not `normal` or `signature`.
    #[error("unknown image option: {0}")]
    UnknownImageOption(String),

    /// Audio option name is not one of the sound categories.
    #[error("unknown audio option: {0}")]
    UnknownAudioOption(String),

    /// Invalid locale or other shared-type error.
    #[error("{0}")]
    Common(#[from] hearthdump_common::Error),

    /// Manifest or gameplay audio error.
    #[error("{0}")]
    Catalog(#[from] hearthdump_catalog::Error),

    /// Graph resolution error.
    #[error("{0}")]
    Graph(#[from] hearthdump_graph::Error),

    /// Output file error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structure serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Worker pool could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Check if the error comes from the request itself rather than one card.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::UnknownImageOption(_) | Self::UnknownAudioOption(_) | Self::Common(_) | Self::ThreadPool(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
