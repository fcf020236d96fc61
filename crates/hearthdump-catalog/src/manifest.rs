//! Asset manifest - card roots, base asset catalog and locale overrides.

use std::collections::HashMap;
use std::path::Path;

use hearthdump_common::{AssetGuid, Locale};
use serde::Deserialize;

use crate::locale::{LocaleCatalog, LocaleOverride, LocaleTarget};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    #[serde(default)]
    cards_map: HashMap<String, Option<AssetGuid>>,
    #[serde(default)]
    base_assets_catalog: HashMap<AssetGuid, String>,
    #[serde(default)]
    asset_catalog_locale: HashMap<String, HashMap<AssetGuid, LocaleOverride>>,
}

/// Everything needed to find a card's assets.
///
/// ```json
/// {
///   "cards_map": { "CS2_033": "<card def guid>" },
///   "base_assets_catalog": { "<guid>": "cards0.unity3d" },
///   "asset_catalog_locale": { "dede": { "<guid>": { "guid": "...", "bundle": "..." } } }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    cards: HashMap<String, AssetGuid>,
    base_assets: HashMap<AssetGuid, String>,
    locales: LocaleCatalog,
}

impl AssetManifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }

    /// Parse a manifest from JSON bytes.
    ///
    /// Locale sections for codes the client does not ship are skipped.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let document: ManifestDocument = serde_json::from_slice(data)?;

        let cards = document
            .cards_map
            .into_iter()
            .filter_map(|(card_id, guid)| {
                guid.filter(|g| !g.as_str().is_empty()).map(|g| (card_id, g))
            })
            .collect();

        let locales = document
            .asset_catalog_locale
            .into_iter()
            .filter_map(|(code, entries)| match code.parse::<Locale>() {
                Ok(locale) => Some((locale, entries)),
                Err(e) => {
                    log::warn!("Skipping locale catalog section: {e}");
                    None
                }
            })
            .collect();

        Ok(Self {
            cards,
            base_assets: document.base_assets_catalog,
            locales,
        })
    }

    /// Register a card's root GUID.
    pub fn insert_card(&mut self, card_id: impl Into<String>, guid: AssetGuid) {
        self.cards.insert(card_id.into(), guid);
    }

    /// Register the bundle that holds a base asset.
    pub fn insert_asset(&mut self, guid: AssetGuid, bundle: impl Into<String>) {
        self.base_assets.insert(guid, bundle.into());
    }

    /// Register a localized counterpart of a base asset.
    pub fn insert_override(&mut self, locale: Locale, base: AssetGuid, entry: LocaleOverride) {
        self.locales.insert(locale, base, entry);
    }

    /// Get the root GUID of a card's definition.
    pub fn card_guid(&self, card_id: &str) -> Option<&AssetGuid> {
        self.cards.get(card_id)
    }

    /// Iterate over every card id with a definition, sorted.
    pub fn card_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.cards.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Get the bundle holding a base asset.
    pub fn bundle_of(&self, guid: &AssetGuid) -> Option<&str> {
        self.base_assets.get(guid).map(String::as_str)
    }

    /// Get the locale catalog.
    pub fn locale_catalog(&self) -> &LocaleCatalog {
        &self.locales
    }

    /// Resolve where a base asset lives for `locale`.
    pub fn resolve(&self, locale: Locale, base: &AssetGuid) -> LocaleTarget {
        self.locales.resolve(locale, base, self.bundle_of(base))
    }
}
