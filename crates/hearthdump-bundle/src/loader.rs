//! Bundle loaders - the seam to the external typetree decoder.
//!
//! Hearthdump never parses the Unity serialized format itself. A
//! [`BundleLoader`] turns one bundle file into an [`ObjectTable`]; the
//! default [`JsonDumpLoader`] reads the JSON documents a typetree exporter
//! writes in place of each bundle.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use hearthdump_common::{AssetGuid, PathId};
use memmap2::Mmap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::object::{RawObject, Typetree};
use crate::table::ObjectTable;
use crate::{Error, Result};

/// Decodes a bundle file into its object table.
pub trait BundleLoader: Send + Sync {
    /// Load the bundle at `path`.
    fn load(&self, path: &Path) -> Result<ObjectTable>;
}

/// On-disk layout of a typetree dump.
#[derive(Debug, Deserialize)]
struct DumpDocument {
    #[serde(default)]
    container: HashMap<AssetGuid, PathId>,
    #[serde(default)]
    objects: Vec<DumpObject>,
}

#[derive(Debug, Deserialize)]
struct DumpObject {
    path_id: PathId,
    #[serde(rename = "type")]
    class_name: String,
    #[serde(default)]
    typetree: Map<String, Value>,
}

/// Loads typetree dumps written as JSON.
///
/// ```json
/// {
///   "container": { "<guid>": 1234 },
///   "objects": [ { "path_id": 1234, "type": "GameObject", "typetree": { } } ]
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDumpLoader;

impl JsonDumpLoader {
    /// Parse a dump from bytes.
    pub fn parse(data: &[u8]) -> Result<ObjectTable> {
        let document: DumpDocument = serde_json::from_slice(data)?;
        let objects = document
            .objects
            .into_iter()
            .map(|o| RawObject::new(o.path_id, o.class_name, Typetree::from(o.typetree)))
            .collect();
        Ok(ObjectTable::new(document.container, objects))
    }
}

impl BundleLoader for JsonDumpLoader {
    fn load(&self, path: &Path) -> Result<ObjectTable> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(Error::Decode("empty bundle file".into()));
        }
        let mmap = unsafe { Mmap::map(&file)? };
        Self::parse(&mmap)
    }
}

/// Serves pre-built tables keyed by bundle file name.
///
/// Useful when bundles are decoded up front by an embedding application, and
/// for tests. Every successful load is counted.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    tables: HashMap<String, ObjectTable>,
    loads: AtomicUsize,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under a bundle file name.
    pub fn with_bundle(mut self, filename: impl Into<String>, table: ObjectTable) -> Self {
        self.tables.insert(filename.into(), table);
        self
    }

    /// Number of loads served so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl BundleLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<ObjectTable> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let table = self.tables.get(filename).cloned().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no bundle named {filename}"),
            ))
        })?;
        self.loads.fetch_add(1, Ordering::Relaxed);
        Ok(table)
    }
}

impl<L: BundleLoader + ?Sized> BundleLoader for std::sync::Arc<L> {
    fn load(&self, path: &Path) -> Result<ObjectTable> {
        (**self).load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DUMP: &str = r#"{
        "container": { "guid-a": 5 },
        "objects": [
            { "path_id": 5, "type": "GameObject", "typetree": { "m_Name": "root" } },
            { "path_id": 6, "type": "MonoBehaviour" }
        ]
    }"#;

    #[test]
    fn test_parse_dump() {
        let table = JsonDumpLoader::parse(DUMP.as_bytes()).unwrap();
        assert_eq!(table.object_count(), 2);
        let root = table.container_object(&AssetGuid::new("guid-a")).unwrap();
        assert_eq!(root.read_typetree().get_str("m_Name"), Some("root"));
        assert!(table.lookup(PathId::new(6)).unwrap().read_typetree().as_map().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DUMP.as_bytes()).unwrap();
        let table = JsonDumpLoader.load(file.path()).unwrap();
        assert_eq!(table.object_count(), 2);
    }

    #[test]
    fn test_load_corrupt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"UnityFS\0\x00\x00\x00\x07").unwrap();
        assert!(matches!(JsonDumpLoader.load(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.unity3d");
        assert!(matches!(JsonDumpLoader.load(&missing), Err(Error::Io(_))));
    }

    #[test]
    fn test_memory_loader_counts() {
        let loader = MemoryLoader::new().with_bundle("a.unity3d", ObjectTable::default());
        loader.load(Path::new("/x/a.unity3d")).unwrap();
        assert!(loader.load(Path::new("/x/b.unity3d")).is_err());
        assert_eq!(loader.load_count(), 1);
    }
}
