//! Bundle store - opens and memoizes bundles by canonical path.
//!
//! One [`BundleStore`] is constructed per run and shared by reference with
//! everything that resolves assets. Handles are created on first reference
//! and live as long as the store; bundles are read-only, so nothing is ever
//! closed early.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::HashMap as FastHashMap;
use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};
use rustc_hash::FxHasher;

use crate::loader::{BundleLoader, JsonDumpLoader};
use crate::table::ObjectTable;
use crate::{Error, Result};

type FxHashMap<K, V> = FastHashMap<K, V, std::hash::BuildHasherDefault<FxHasher>>;

/// Directory under the game root that holds the client's bundles.
pub const BUNDLE_DIR: &str = "Data/Win";

/// One opened bundle.
///
/// The object table is decoded on first access, not when the handle is
/// created. Concurrent first accesses parse exactly once.
pub struct BundleHandle {
    path: PathBuf,
    filename: String,
    loader: Arc<dyn BundleLoader>,
    table: RwLock<Option<Arc<ObjectTable>>>,
}

impl BundleHandle {
    fn new(path: PathBuf, filename: String, loader: Arc<dyn BundleLoader>) -> Self {
        Self {
            path,
            filename,
            loader,
            table: RwLock::new(None),
        }
    }

    /// Canonical path of the bundle file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bundle file name as the catalog spells it.
    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Check if the object table has been decoded yet.
    pub fn is_loaded(&self) -> bool {
        self.table.read().is_some()
    }

    /// Get the object table, decoding the bundle on first access.
    ///
    /// A failed load is not cached; the next access retries.
    pub fn table(&self) -> Result<Arc<ObjectTable>> {
        if let Some(table) = self.table.read().as_ref() {
            return Ok(Arc::clone(table));
        }

        let guard = self.table.upgradable_read();
        if let Some(table) = guard.as_ref() {
            return Ok(Arc::clone(table));
        }

        log::debug!("Loading bundle {}", self.path.display());
        let table = self.loader.load(&self.path).map_err(|e| Error::BundleLoad {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let table = Arc::new(table);

        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        *guard = Some(Arc::clone(&table));
        Ok(table)
    }
}

impl std::fmt::Debug for BundleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BundleHandle(path=\"{}\")", self.path.display())
    }
}

/// Memoizing store of bundle handles.
pub struct BundleStore {
    bundle_dir: PathBuf,
    loader: Arc<dyn BundleLoader>,
    handles: Mutex<FxHashMap<PathBuf, Arc<BundleHandle>>>,
}

impl BundleStore {
    /// Create a store for the game installed at `root`.
    pub fn new<P: AsRef<Path>, L: BundleLoader + 'static>(root: P, loader: L) -> Self {
        Self {
            bundle_dir: root.as_ref().join(BUNDLE_DIR),
            loader: Arc::new(loader),
            handles: Mutex::new(FxHashMap::default()),
        }
    }

    /// Create a store reading typetree dumps as JSON.
    pub fn with_json_dumps<P: AsRef<Path>>(root: P) -> Self {
        Self::new(root, JsonDumpLoader)
    }

    /// Directory bundle file names are resolved against.
    #[inline]
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// Resolve a bundle file name to its canonical absolute path.
    ///
    /// Files that do not exist still get a stable absolute path, so a missing
    /// bundle fails on load rather than on open.
    pub fn canonical_path(&self, filename: &str) -> PathBuf {
        let joined = self.bundle_dir.join(filename);
        std::fs::canonicalize(&joined)
            .or_else(|_| std::path::absolute(&joined))
            .unwrap_or(joined)
    }

    /// Open a bundle, returning the cached handle when one exists.
    ///
    /// Two names that resolve to the same file share one handle.
    pub fn open(&self, filename: &str) -> Arc<BundleHandle> {
        let path = self.canonical_path(filename);
        let mut handles = self.handles.lock();
        Arc::clone(handles.entry(path).or_insert_with_key(|path| {
            Arc::new(BundleHandle::new(
                path.clone(),
                filename.to_string(),
                Arc::clone(&self.loader),
            ))
        }))
    }

    /// Open a bundle and get its object table.
    pub fn table(&self, filename: &str) -> Result<Arc<ObjectTable>> {
        self.open(filename).table()
    }

    /// Number of handles opened so far.
    pub fn len(&self) -> usize {
        self.handles.lock().len()
    }

    /// Check if no handle has been opened.
    pub fn is_empty(&self) -> bool {
        self.handles.lock().is_empty()
    }
}

impl std::fmt::Debug for BundleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleStore")
            .field("bundle_dir", &self.bundle_dir)
            .field("handles", &self.len())
            .finish()
    }
}
