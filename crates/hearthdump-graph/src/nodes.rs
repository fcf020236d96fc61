//! Typed views over the objects a card's graph passes through.
//!
//! Each view reads one hop of the traversal out of a loosely-typed typetree.
//! Every accessor returns `None` for absent fields and null pointers alike,
//! so callers only ever match on present/absent.

use hearthdump_bundle::{pptr_path_id, Typetree};
use hearthdump_common::{AssetGuid, PathId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::options::{AudioOption, EffectArity, ImageOption};

/// Component slot of a card prefab's root `GameObject` that holds the card's
/// behaviour (`CardDef` on card prefabs, `CardSoundSpell` on sound prefabs).
/// Slot 0 is always the `Transform`.
pub const CARD_COMPONENT_SLOT: usize = 1;

/// Component slot of a sound `GameObject` that holds its `SoundDef`.
/// Slots 0 and 1 are the `Transform` and the `AudioSource`.
pub const SOUND_DEF_COMPONENT_SLOT: usize = 2;

/// Treat an explicit JSON null like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A serialized object pointer.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PPtr {
    #[serde(rename = "m_FileID", default)]
    pub file_id: Option<i64>,
    #[serde(rename = "m_PathID", default)]
    pub path_id: Option<i64>,
}

impl PPtr {
    /// The pointed-to object, unless the pointer is null.
    #[inline]
    pub fn target(&self) -> Option<PathId> {
        self.path_id.and_then(PathId::non_null)
    }
}

/// View of a `GameObject`.
#[derive(Debug, Clone, Copy)]
pub struct GameObject<'a> {
    tree: &'a Typetree,
}

impl<'a> GameObject<'a> {
    pub fn new(tree: &'a Typetree) -> Self {
        Self { tree }
    }

    /// The component attached in `slot` of `m_Component`.
    pub fn component(&self, slot: usize) -> Option<PathId> {
        self.tree
            .get("m_Component")?
            .as_array()?
            .get(slot)?
            .get("component")
            .and_then(pptr_path_id)
    }
}

/// View of an `AudioSource` component.
#[derive(Debug, Clone, Copy)]
pub struct AudioSource<'a> {
    tree: &'a Typetree,
}

impl<'a> AudioSource<'a> {
    pub fn new(tree: &'a Typetree) -> Self {
        Self { tree }
    }

    /// The `GameObject` the source is attached to.
    pub fn game_object(&self) -> Option<PathId> {
        self.tree.pptr("m_GameObject")
    }
}

/// One candidate clip of a `SoundDef`.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundDefEntry {
    pub guid: AssetGuid,
    /// Relative probability, as stored in the sound def. Reported, never
    /// used to pick a clip.
    pub weight: Number,
}

/// How a `SoundDef` chooses what to play.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipSelection {
    /// Always the one clip in `m_AudioClip`.
    Single(AssetGuid),
    /// A weighted pick from `m_RandomClips`.
    Random(Vec<SoundDefEntry>),
    /// No clip configured.
    Silent,
}

impl ClipSelection {
    /// Read the selection out of a `SoundDef` typetree.
    ///
    /// `m_AudioClip` wins over `m_RandomClips`. Random entries without a clip
    /// reference are skipped; a missing weight counts as zero.
    pub fn from_sound_def(tree: &Typetree) -> Self {
        if let Some(guid) = tree
            .get_str("m_AudioClip")
            .filter(|s| !s.is_empty())
            .and_then(AssetGuid::from_clip_ref)
        {
            return Self::Single(guid);
        }

        let Some(random) = tree.get("m_RandomClips").and_then(Value::as_array) else {
            return Self::Silent;
        };
        if random.is_empty() {
            return Self::Silent;
        }

        let entries = random
            .iter()
            .filter_map(|clip| {
                let guid = clip
                    .get("m_Clip")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .and_then(AssetGuid::from_clip_ref)?;
                let weight = match clip.get("m_Weight") {
                    Some(Value::Number(weight)) => weight.clone(),
                    _ => Number::from(0),
                };
                Some(SoundDefEntry { guid, weight })
            })
            .collect();
        Self::Random(entries)
    }

    /// Flatten into the candidate list; a single clip has the integral weight 1.
    pub fn into_entries(self) -> Vec<SoundDefEntry> {
        match self {
            Self::Single(guid) => vec![SoundDefEntry {
                guid,
                weight: Number::from(1),
            }],
            Self::Random(entries) => entries,
            Self::Silent => Vec::new(),
        }
    }
}

/// One effect definition of a card: a spell prefab plus its sound spells.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardEffectDef {
    #[serde(rename = "m_SpellPath", default)]
    pub spell_path: Option<String>,
    #[serde(rename = "m_SoundSpellPaths", default, deserialize_with = "nullable")]
    pub sound_spell_paths: Vec<String>,
}

/// The effect definitions of one sound category.
#[derive(Debug, Clone, Copy)]
pub enum CardEffects<'a> {
    Single(Option<&'a CardEffectDef>),
    List(&'a [CardEffectDef]),
}

/// A card's root behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardDefRecord {
    #[serde(rename = "m_PortraitTexturePath", default)]
    pub portrait_texture_path: Option<String>,
    #[serde(rename = "m_SignaturePortraitTexturePath", default)]
    pub signature_portrait_texture_path: Option<String>,
    #[serde(rename = "m_AttackEffectDef", default)]
    pub attack: Option<CardEffectDef>,
    #[serde(rename = "m_DeathEffectDef", default)]
    pub death: Option<CardEffectDef>,
    #[serde(rename = "m_LifetimeEffectDef", default)]
    pub lifetime: Option<CardEffectDef>,
    #[serde(rename = "m_AdditionalPlayEffectDefs", default, deserialize_with = "nullable")]
    pub additional_play: Vec<CardEffectDef>,
    #[serde(rename = "m_TriggerEffectDefs", default, deserialize_with = "nullable")]
    pub trigger: Vec<CardEffectDef>,
    #[serde(rename = "m_SubOptionEffectDefs", default, deserialize_with = "nullable")]
    pub sub_option: Vec<CardEffectDef>,
    #[serde(rename = "m_ResetGameEffectDefs", default, deserialize_with = "nullable")]
    pub reset_game: Vec<CardEffectDef>,
    #[serde(rename = "m_SubSpellEffectDefs", default, deserialize_with = "nullable")]
    pub sub_spell: Vec<CardEffectDef>,
}

impl CardDefRecord {
    /// The texture path of a portrait variant.
    pub fn texture_path(&self, option: ImageOption) -> Option<&str> {
        match option {
            ImageOption::Normal => self.portrait_texture_path.as_deref(),
            ImageOption::Signature => self.signature_portrait_texture_path.as_deref(),
        }
    }

    /// The effect definitions of a sound category.
    pub fn effects(&self, option: AudioOption) -> CardEffects<'_> {
        let list = match option {
            AudioOption::Attack => return CardEffects::Single(self.attack.as_ref()),
            AudioOption::Death => return CardEffects::Single(self.death.as_ref()),
            AudioOption::Lifetime => return CardEffects::Single(self.lifetime.as_ref()),
            AudioOption::AdditionalPlay => &self.additional_play,
            AudioOption::Trigger => &self.trigger,
            AudioOption::SubOption => &self.sub_option,
            AudioOption::ResetGame => &self.reset_game,
            AudioOption::SubSpell => &self.sub_spell,
        };
        debug_assert_eq!(option.arity(), EffectArity::List);
        CardEffects::List(list)
    }
}

/// When a card-specific voice line plays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoCondition {
    #[serde(rename = "m_CardId", default)]
    pub card_id: Option<String>,
    #[serde(rename = "m_RequireTag", default)]
    pub require_tag: Option<i64>,
    #[serde(rename = "m_SideToSearch", default)]
    pub side_to_search: Option<i64>,
    #[serde(rename = "m_TagValue", default)]
    pub tag_value: Option<i64>,
    #[serde(rename = "m_ZonesToSearch", default)]
    pub zones_to_search: Option<Vec<i64>>,
}

/// `m_CardSoundData` of a sound spell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardSoundData {
    #[serde(rename = "m_AudioSource", default)]
    pub audio_source: Option<PPtr>,
}

/// One entry of `m_CardSpecificVoDataList`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardSpecificVoData {
    #[serde(rename = "m_AudioSource", default)]
    pub audio_source: Option<PPtr>,
    #[serde(rename = "m_GameStringKey", default)]
    pub game_string_key: Option<String>,
    #[serde(flatten)]
    pub condition: VoCondition,
}

/// A `CardSoundSpell` (or `CardSpecificVoSpell`) behaviour.
///
/// `m_CardSoundData` is what identifies the behaviour as a sound spell; it is
/// `None` when the component is something else.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardSoundSpellNode {
    #[serde(rename = "m_CardSoundData", default)]
    pub card_sound_data: Option<CardSoundData>,
    #[serde(rename = "m_CardSpecificVoDataList", default, deserialize_with = "nullable")]
    pub specific_vo: Vec<CardSpecificVoData>,
}

impl CardSoundSpellNode {
    /// The audio source of the spell's regular sound.
    pub fn normal_audio_source(&self) -> Option<PathId> {
        self.card_sound_data
            .as_ref()?
            .audio_source
            .as_ref()
            .and_then(PPtr::target)
    }
}
