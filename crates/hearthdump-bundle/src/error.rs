//! Error types for bundle access.

use std::path::PathBuf;

use hearthdump_common::AssetGuid;
use thiserror::Error;

/// Errors that can occur when loading bundles or decoding their objects.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Typetree dump is not valid JSON or has the wrong shape.
    #[error("malformed typetree dump: {0}")]
    Json(#[from] serde_json::Error),

    /// Bundle file is missing or could not be parsed.
    #[error("failed to load bundle {}: {reason}", path.display())]
    BundleLoad { path: PathBuf, reason: String },

    /// GUID has no entry in the bundle's container table.
    #[error("asset {guid} not found in bundle {bundle}")]
    AssetNotFound { guid: AssetGuid, bundle: String },

    /// Object is not of the class the caller expected.
    #[error("expected {expected} object, got {actual}")]
    UnexpectedClass { expected: &'static str, actual: String },

    /// Required typetree field is absent or has the wrong type.
    #[error("missing or invalid field: {0}")]
    MissingField(&'static str),

    /// Texture format has no decoder.
    #[error("unsupported texture format: {0}")]
    UnsupportedTextureFormat(i64),

    /// Payload decoding failed.
    #[error("decode error: {0}")]
    Decode(String),

    /// Base64 payload is invalid.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Image encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for bundle operations.
pub type Result<T> = std::result::Result<T, Error>;
