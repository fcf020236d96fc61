//! Gameplay audio text - subtitles for card-specific voice lines.

use std::collections::HashMap;
use std::path::Path;

use hearthdump_common::{Locale, OrderedMap};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Per-locale text of game-string keys.
///
/// Loaded from a JSON object of the form `{ "<key>": { "<locale>": "<text>" } }`.
/// Locales keep the order they have in the file.
#[derive(Debug, Clone, Default)]
pub struct GameplayAudio {
    strings: HashMap<String, OrderedMap<Locale, String>>,
}

impl GameplayAudio {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }

    /// Parse a table from JSON bytes.
    ///
    /// Unknown locale codes and non-string texts are skipped.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let document: HashMap<String, Map<String, Value>> = serde_json::from_slice(data)?;
        let mut table = Self::new();
        for (key, texts) in document {
            for (code, text) in texts {
                let (Ok(locale), Some(text)) = (code.parse::<Locale>(), text.as_str()) else {
                    log::debug!("Skipping gameplay audio text {key}/{code}");
                    continue;
                };
                table.insert(key.as_str(), locale, text);
            }
        }
        Ok(table)
    }

    /// Add the text of a key in one locale.
    pub fn insert(&mut self, key: impl Into<String>, locale: Locale, text: impl Into<String>) {
        self.strings.entry(key.into()).or_default().insert(locale, text.into());
    }

    /// Get every text of a key, in table order.
    ///
    /// An unknown key yields an empty map.
    pub fn texts(&self, key: &str) -> OrderedMap<Locale, String> {
        self.strings.get(key).cloned().unwrap_or_default()
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texts_keep_file_order() {
        let audio = GameplayAudio::parse(
            r#"{ "VO_CS2_033_ATTACK": { "frfr": "Glace !", "enus": "Ice!", "dede": "Eis!" } }"#.as_bytes(),
        )
        .unwrap();
        let texts = audio.texts("VO_CS2_033_ATTACK");
        let keys: Vec<&str> = texts.keys().map(|l| l.as_str()).collect();
        assert_eq!(keys, ["frfr", "enus", "dede"]);
        assert_eq!(texts.get(&Locale::ENUS).map(String::as_str), Some("Ice!"));
    }

    #[test]
    fn test_unknown_locale_is_skipped() {
        let audio = GameplayAudio::parse(r#"{ "VO_X": { "xxyy": "?", "enus": "Hi", "dede": null } }"#.as_bytes()).unwrap();
        let texts = audio.texts("VO_X");
        assert_eq!(texts.len(), 1);
        assert_eq!(texts.get(&Locale::ENUS).map(String::as_str), Some("Hi"));
    }

    #[test]
    fn test_unknown_key_is_empty() {
        let audio = GameplayAudio::new();
        assert!(audio.texts("NOPE").is_empty());
    }
}
