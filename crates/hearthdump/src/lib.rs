//! Hearthdump - Hearthstone card portrait and sound extraction library.
//!
//! This crate provides a unified interface to the Hearthdump crates.
//!
//! # Crates
//!
//! - [`hearthdump_common`] - Shared identifiers (GUIDs, path ids, locales)
//! - [`hearthdump_bundle`] - Bundle store, path id index, texture and clip decoding
//! - [`hearthdump_catalog`] - Asset manifest, locale catalog, gameplay audio text
//! - [`hearthdump_graph`] - Card graph traversal and output records
//! - [`hearthdump_extract`] - Per-card extraction pipeline
//!
//! # Example
//!
//! ```no_run
//! use hearthdump::prelude::*;
//!
//! let settings = ExtractSettings::new("out")
//!     .with_image_options(["normal", "signature"])?
//!     .with_audio_options(["additional-play"])?
//!     .with_locales(["enus", "dede"])?;
//!
//! let pipeline = ExtractionPipeline::new(
//!     settings,
//!     BundleStore::with_json_dumps("/games/Hearthstone"),
//!     AssetManifest::open("manifest.json")?,
//! );
//!
//! let report = pipeline.run(&["CS2_033"])?;
//! println!("{} cards, {} failed", report.total(), report.failed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use hearthdump_bundle as bundle;
pub use hearthdump_catalog as catalog;
pub use hearthdump_common as common;
pub use hearthdump_extract as extract;
pub use hearthdump_graph as graph;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use hearthdump_bundle::{BundleLoader, BundleStore, JsonDumpLoader, ObjectTable};
    pub use hearthdump_catalog::{AssetManifest, GameplayAudio, LocaleCatalog};
    pub use hearthdump_common::{AssetGuid, Locale, PathId};
    pub use hearthdump_extract::{BatchReport, ExtractSettings, ExtractionPipeline};
    pub use hearthdump_graph::records::CardRecord;
    pub use hearthdump_graph::{AudioOption, GraphResolver, ImageOption};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
