//! Parsed object tables and the path id index.

use std::sync::OnceLock;

use hashbrown::HashMap as FastHashMap;
use hearthdump_common::{AssetGuid, PathId};
use rustc_hash::FxHasher;

use crate::object::RawObject;

type FxHashMap<K, V> = FastHashMap<K, V, std::hash::BuildHasherDefault<FxHasher>>;

/// Map from path id to object position, for O(1) hops during traversal.
#[derive(Debug, Clone, Default)]
pub struct PathIdIndex {
    positions: FxHashMap<PathId, usize>,
}

impl PathIdIndex {
    /// Index every object by its path id. Later duplicates win.
    pub fn build(objects: &[RawObject]) -> Self {
        let mut positions = FxHashMap::default();
        positions.reserve(objects.len());
        for (position, object) in objects.iter().enumerate() {
            positions.insert(object.path_id(), position);
        }
        Self { positions }
    }

    /// Get the position of an object. The null path id is never indexed.
    #[inline]
    pub fn position(&self, path_id: PathId) -> Option<usize> {
        if path_id.is_null() {
            return None;
        }
        self.positions.get(&path_id).copied()
    }

    /// Number of indexed objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Every object of one bundle plus its container table.
///
/// The container maps asset GUIDs to the path id of the object they name;
/// this is the only way into a bundle from outside it.
#[derive(Debug, Clone, Default)]
pub struct ObjectTable {
    container: FxHashMap<AssetGuid, PathId>,
    objects: Vec<RawObject>,
    index: OnceLock<PathIdIndex>,
}

impl ObjectTable {
    /// Create a table from a container mapping and the bundle's objects.
    pub fn new<I>(container: I, objects: Vec<RawObject>) -> Self
    where
        I: IntoIterator<Item = (AssetGuid, PathId)>,
    {
        Self {
            container: container.into_iter().collect(),
            objects,
            index: OnceLock::new(),
        }
    }

    /// Get the path id index, building it on first use.
    pub fn path_ids(&self) -> &PathIdIndex {
        self.index.get_or_init(|| PathIdIndex::build(&self.objects))
    }

    /// Look up an object by path id.
    ///
    /// The null path id and unknown ids both yield `None`.
    pub fn lookup(&self, path_id: PathId) -> Option<&RawObject> {
        self.path_ids()
            .position(path_id)
            .and_then(|position| self.objects.get(position))
    }

    /// Get the path id a container entry points at, if it is non-null.
    pub fn container_path_id(&self, guid: &AssetGuid) -> Option<PathId> {
        self.container.get(guid).copied().filter(|id| !id.is_null())
    }

    /// Look up the object a container entry points at.
    pub fn container_object(&self, guid: &AssetGuid) -> Option<&RawObject> {
        self.container_path_id(guid).and_then(|id| self.lookup(id))
    }

    /// Check if the container has an entry for a GUID.
    #[inline]
    pub fn has_asset(&self, guid: &AssetGuid) -> bool {
        self.container.contains_key(guid)
    }

    /// Number of objects in the table.
    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Typetree;
    use serde_json::json;

    fn sample_table() -> ObjectTable {
        let objects = vec![
            RawObject::new(PathId::new(10), "GameObject", Typetree::from_value(json!({"m_Name": "a"}))),
            RawObject::new(PathId::new(-20), "AudioSource", Typetree::default()),
        ];
        ObjectTable::new(
            [
                (AssetGuid::new("root"), PathId::new(10)),
                (AssetGuid::new("deleted"), PathId::NULL),
            ],
            objects,
        )
    }

    #[test]
    fn test_lookup() {
        let table = sample_table();
        assert_eq!(table.lookup(PathId::new(10)).unwrap().class_name(), "GameObject");
        assert_eq!(table.lookup(PathId::new(-20)).unwrap().class_name(), "AudioSource");
        assert_eq!(table.path_ids().len(), 2);
    }

    #[test]
    fn test_lookup_absent() {
        let table = sample_table();
        assert!(table.lookup(PathId::NULL).is_none());
        assert!(table.lookup(PathId::new(999)).is_none());
    }

    #[test]
    fn test_container_null_entry() {
        let table = sample_table();
        assert!(table.has_asset(&AssetGuid::new("deleted")));
        assert!(table.container_object(&AssetGuid::new("deleted")).is_none());
        assert!(table.container_object(&AssetGuid::new("missing")).is_none());
        assert_eq!(
            table.container_object(&AssetGuid::new("root")).unwrap().path_id(),
            PathId::new(10)
        );
    }

    #[test]
    fn test_index_is_built_once() {
        let table = sample_table();
        let first = table.path_ids() as *const PathIdIndex;
        let second = table.path_ids() as *const PathIdIndex;
        assert_eq!(first, second);
    }
}
