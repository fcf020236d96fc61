//! Locale catalog - per-locale redirection of base assets.

use std::collections::HashMap;

use hearthdump_common::{AssetGuid, Locale};
use serde::Deserialize;

/// A localized counterpart of a base asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocaleOverride {
    /// GUID of the localized asset.
    pub guid: AssetGuid,
    /// Bundle file holding the localized asset.
    pub bundle: String,
}

/// Where an asset lives for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTarget {
    /// GUID to dereference.
    pub guid: AssetGuid,
    /// Bundle to dereference it in, if the asset exists at all.
    pub bundle: Option<String>,
    /// Whether a locale override redirected the base asset.
    pub redirected: bool,
}

/// Mapping from locale to base GUID to localized override.
#[derive(Debug, Clone, Default)]
pub struct LocaleCatalog {
    overrides: HashMap<Locale, HashMap<AssetGuid, LocaleOverride>>,
}

impl LocaleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override for one base asset in one locale.
    pub fn insert(&mut self, locale: Locale, base: AssetGuid, entry: LocaleOverride) {
        self.overrides.entry(locale).or_default().insert(base, entry);
    }

    /// Look up the override for a base asset.
    ///
    /// The base locale is never overridden, so it is not even consulted.
    pub fn get(&self, locale: Locale, base: &AssetGuid) -> Option<&LocaleOverride> {
        if locale.is_base() {
            return None;
        }
        self.overrides.get(&locale)?.get(base)
    }

    /// Resolve where a base asset lives for `locale`.
    ///
    /// Without an override the base GUID and bundle are used unchanged.
    pub fn resolve(&self, locale: Locale, base: &AssetGuid, base_bundle: Option<&str>) -> LocaleTarget {
        match self.get(locale, base) {
            Some(entry) => LocaleTarget {
                guid: entry.guid.clone(),
                bundle: Some(entry.bundle.clone()),
                redirected: true,
            },
            None => LocaleTarget {
                guid: base.clone(),
                bundle: base_bundle.map(str::to_string),
                redirected: false,
            },
        }
    }

    /// Number of locales with at least one override.
    pub fn locale_count(&self) -> usize {
        self.overrides.len()
    }
}

impl FromIterator<(Locale, HashMap<AssetGuid, LocaleOverride>)> for LocaleCatalog {
    fn from_iter<I: IntoIterator<Item = (Locale, HashMap<AssetGuid, LocaleOverride>)>>(iter: I) -> Self {
        Self {
            overrides: iter.into_iter().collect(),
        }
    }
}
