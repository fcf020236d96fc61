//! Error types for hearthdump-common.

use thiserror::Error;

/// Common error type for Hearthdump operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Locale code is not one the client ships.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
