//! Asset GUID - the catalog identifier of a Unity addressable asset.
//!
//! Card data never stores a bare GUID. References are written as asset paths of
//! the form `<prefix>:<guid>`, e.g. `Assets/Game/Cards/CS2_033.prefab:3c2b...`.
//! The helpers here extract the GUID part from both reference styles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A catalog identifier used to locate an asset and its owning bundle.
///
/// Unlike [`PathId`](crate::PathId), a GUID is meaningful across the whole asset
/// set: the asset manifest maps it to a bundle filename, and the bundle's
/// container table maps it to the object inside.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetGuid(String);

impl AssetGuid {
    /// Create a GUID from its string form.
    #[inline]
    pub fn new(guid: impl Into<String>) -> Self {
        Self(guid.into())
    }

    /// Extract the GUID from a `<prefix>:<guid>` asset path.
    ///
    /// Used for texture and sound-spell paths. The GUID is the segment
    /// following the first colon; a path without one, or with an empty
    /// segment there, has no GUID.
    ///
    /// ```
    /// use hearthdump_common::AssetGuid;
    ///
    /// let guid = AssetGuid::from_asset_path("CS2_033.psd:a1b2c3").unwrap();
    /// assert_eq!(guid.as_str(), "a1b2c3");
    /// assert!(AssetGuid::from_asset_path("CS2_033.psd").is_none());
    /// ```
    pub fn from_asset_path(path: &str) -> Option<Self> {
        let segment = path.split(':').nth(1)?;
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    /// Extract the GUID from an audio clip reference.
    ///
    /// Clip references take the text after the last colon, and a reference
    /// with no colon at all is already a bare GUID.
    pub fn from_clip_ref(reference: &str) -> Option<Self> {
        let segment = reference.rsplit(':').next()?;
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    /// Get the GUID string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AssetGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetGuid({})", self.0)
    }
}

impl fmt::Display for AssetGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AssetGuid {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for AssetGuid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AssetGuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for AssetGuid {
    fn borrow(&self) -> &str {
        &self.0
    }
}
