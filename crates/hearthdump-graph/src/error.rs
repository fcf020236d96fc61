//! Error types for graph resolution.

use hearthdump_common::AssetGuid;
use thiserror::Error;

/// Errors that can occur while resolving a card's object graph.
///
/// Routine gaps in the graph (null pointers, missing overrides, absent
/// bundles for one locale) are not errors; they surface as `None` in the
/// resolved records.
#[derive(Debug, Error)]
pub enum Error {
    /// Bundle access error.
    #[error("{0}")]
    Bundle(#[from] hearthdump_bundle::Error),

    /// GUID is not in the base asset catalog.
    #[error("asset {0} is not in the base asset catalog")]
    UnknownAsset(AssetGuid),

    /// Root object has no component in the expected slot.
    #[error("asset {guid} in {bundle} has no {component} component")]
    MissingComponent {
        guid: AssetGuid,
        bundle: String,
        component: &'static str,
    },

    /// Component fields do not have the expected shape.
    #[error("malformed {component} in {bundle}: {reason}")]
    Malformed {
        component: &'static str,
        bundle: String,
        reason: String,
    },
}

impl Error {
    /// Check if a bundle file could not be opened or decoded.
    pub fn is_bundle_load(&self) -> bool {
        matches!(self, Self::Bundle(hearthdump_bundle::Error::BundleLoad { .. }))
    }
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;
