//! Catalogs for Hearthdump.
//!
//! - [`AssetManifest`] - card id → root GUID, GUID → bundle, plus the locale catalog
//! - [`LocaleCatalog`] - per-locale redirection of base assets
//! - [`GameplayAudio`] - per-locale text of voice-line game strings

mod error;
mod gameplay_audio;
mod locale;
mod manifest;

pub use error::{Error, Result};
pub use gameplay_audio::GameplayAudio;
pub use locale::{LocaleCatalog, LocaleOverride, LocaleTarget};
pub use manifest::AssetManifest;
