//! Raw bundle objects and their decoded typetrees.
//!
//! A typetree is the field mapping the external decoder produces for one
//! object. Fields are loosely typed: any of them may be absent, empty, or a
//! null pointer, so every accessor here returns an `Option`.

use hearthdump_common::PathId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::Result;

/// The decoded field mapping of one object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Typetree(Map<String, Value>);

impl Typetree {
    /// Wrap a JSON value. Anything other than an object becomes an empty typetree.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Get a field by name.
    #[inline]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Check if a field is present (even if null).
    #[inline]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Get a string field.
    #[inline]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Get an integer field.
    #[inline]
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    /// Get a pointer field, resolving it to a non-null path id.
    #[inline]
    pub fn pptr(&self, field: &str) -> Option<PathId> {
        self.get(field).and_then(pptr_path_id)
    }

    /// Deserialize the typetree into a typed view.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    /// Borrow the underlying field map.
    #[inline]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Typetree {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Read the `m_PathID` of a serialized pointer (`{m_FileID, m_PathID}`).
///
/// Returns `None` when the value is not a pointer or the pointer is null.
pub fn pptr_path_id(value: &Value) -> Option<PathId> {
    value.get("m_PathID").and_then(Value::as_i64).and_then(PathId::non_null)
}

/// One object inside a bundle.
#[derive(Debug, Clone)]
pub struct RawObject {
    path_id: PathId,
    class_name: String,
    typetree: Typetree,
}

impl RawObject {
    /// Create an object from its decoded parts.
    pub fn new(path_id: PathId, class_name: impl Into<String>, typetree: Typetree) -> Self {
        Self {
            path_id,
            class_name: class_name.into(),
            typetree,
        }
    }

    /// Get the object's path id.
    #[inline]
    pub fn path_id(&self) -> PathId {
        self.path_id
    }

    /// Get the Unity class name, e.g. `GameObject` or `Texture2D`.
    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Get the decoded field mapping.
    #[inline]
    pub fn read_typetree(&self) -> &Typetree {
        &self.typetree
    }
}
