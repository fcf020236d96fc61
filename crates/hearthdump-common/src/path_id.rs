//! Path identifiers - object keys local to one bundle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier of an object within a single bundle.
///
/// A zero path id is Unity's null pointer. Use [`PathId::non_null`] when
/// reading ids out of typetree fields so a null reference never reaches a
/// lookup.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(i64);

impl PathId {
    /// The null path id.
    pub const NULL: Self = Self(0);

    /// Create a path id from its raw value.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Create a path id, mapping the null value to `None`.
    #[inline]
    pub const fn non_null(raw: i64) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Check if this is the null path id.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathId({})", self.0)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
