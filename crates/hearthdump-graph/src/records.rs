//! Output records - the descriptive result of extracting one card.
//!
//! Every field is always serialized. `null` means the graph was resolved but
//! produced no asset; a missing key never occurs.

use hearthdump_common::{AssetGuid, Locale, OrderedMap};
use serde::Serialize;
use serde_json::Number;

use crate::nodes::VoCondition;
use crate::options::{AudioOption, ImageOption};

/// One locale of one portrait variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageLocaleRecord {
    /// GUID after locale redirection; `None` when the card has no such portrait.
    pub guid: Option<AssetGuid>,
    /// Path of the written (or would-be) PNG; `None` when nothing was produced.
    pub file: Option<String>,
}

/// One portrait variant across the requested locales.
pub type ImageOptionRecord = OrderedMap<Locale, ImageLocaleRecord>;

/// One candidate clip across the requested locales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundUnit {
    pub base_guid: AssetGuid,
    pub weight: Number,
    pub locale_guid: OrderedMap<Locale, AssetGuid>,
    pub locale_files: OrderedMap<Locale, Vec<String>>,
}

/// The regular sound of a sound spell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalSoundRecord {
    pub sound_units: Vec<SoundUnit>,
}

/// A card-specific voice line and the condition that triggers it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificVoiceRecord {
    #[serde(rename = "GameStringKey")]
    pub game_string_key: Option<String>,
    #[serde(rename = "GameStringValue")]
    pub game_string_value: OrderedMap<Locale, String>,
    pub condition: VoCondition,
    pub sound_units: Vec<SoundUnit>,
}

/// Everything one sound spell plays.
///
/// Both fields `None` is the empty composite: the spell exists in the card
/// data but has nothing to play.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardSoundSpellRecord {
    pub normal: Option<NormalSoundRecord>,
    pub specific: Option<Vec<SpecificVoiceRecord>>,
}

impl CardSoundSpellRecord {
    /// Check if the spell resolved to nothing.
    pub fn is_empty(&self) -> bool {
        self.normal.is_none() && self.specific.is_none()
    }
}

/// The sound spells of one effect definition, in `m_SoundSpellPaths` order.
pub type EffectRecord = Vec<CardSoundSpellRecord>;

/// One sound category of a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AudioOptionRecord {
    /// Category backed by a single effect definition.
    Single(EffectRecord),
    /// Category backed by a list of effect definitions.
    List(Vec<EffectRecord>),
}

/// Everything extracted for one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRecord {
    pub card_id: String,
    pub image: OrderedMap<ImageOption, ImageOptionRecord>,
    pub audio: OrderedMap<AudioOption, AudioOptionRecord>,
}

impl CardRecord {
    /// Create a record with no options filled in.
    pub fn new(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            image: OrderedMap::new(),
            audio: OrderedMap::new(),
        }
    }
}
