//! Bundle access for Hearthdump.
//!
//! Unity bundles hold many serialized objects addressed by path id. This
//! crate opens them through a pluggable [`BundleLoader`], memoizes them per
//! canonical path in a [`BundleStore`], and indexes their objects for
//! constant-time hops during graph traversal.
//!
//! # Example
//!
//! ```no_run
//! use hearthdump_bundle::BundleStore;
//! use hearthdump_common::AssetGuid;
//!
//! let store = BundleStore::with_json_dumps("/games/Hearthstone");
//! let table = store.table("cards0.unity3d")?;
//!
//! if let Some(object) = table.container_object(&AssetGuid::new("3c2b1a")) {
//!     println!("{} {}", object.class_name(), object.path_id());
//! }
//! # Ok::<(), hearthdump_bundle::Error>(())
//! ```

mod error;
mod loader;
mod object;
mod store;
mod table;

pub mod media;

pub use error::{Error, Result};
pub use loader::{BundleLoader, JsonDumpLoader, MemoryLoader};
pub use object::{pptr_path_id, RawObject, Typetree};
pub use store::{BundleHandle, BundleStore, BUNDLE_DIR};
pub use table::{ObjectTable, PathIdIndex};
