//! Graph resolver - the multi-hop walks from a card to its media.
//!
//! Image walk: card def → texture path → (locale override) → `Texture2D`.
//!
//! Audio walk, per sound spell:
//!
//! ```text
//! container guid → GameObject ─slot 1→ CardSoundSpell
//!     m_AudioSource → AudioSource ─m_GameObject→ GameObject ─slot 2→ SoundDef
//!         m_AudioClip | m_RandomClips → (locale override) → AudioClip
//! ```
//!
//! Every hop inside a bundle is a path id lookup. A null or dangling id
//! anywhere ends the walk with an empty result rather than an error.

use std::sync::Arc;

use hearthdump_bundle::media::{self, AudioSample};
use hearthdump_bundle::{BundleStore, ObjectTable, RawObject};
use hearthdump_catalog::{AssetManifest, LocaleTarget};
use hearthdump_common::{AssetGuid, Locale, PathId};
use image::RgbaImage;

use crate::nodes::{
    AudioSource, CardDefRecord, CardSoundSpellNode, ClipSelection, GameObject, PPtr, SoundDefEntry,
    VoCondition, CARD_COMPONENT_SLOT, SOUND_DEF_COMPONENT_SLOT,
};
use crate::{Error, Result};

/// Where one portrait lives for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolution {
    /// GUID after locale redirection; `None` when the card has no such portrait.
    pub guid: Option<AssetGuid>,
    /// Bundle holding the texture; `None` when this locale's art does not exist.
    pub bundle: Option<String>,
}

impl ImageResolution {
    /// Check if there is a texture to decode.
    pub fn is_available(&self) -> bool {
        self.guid.is_some() && self.bundle.is_some()
    }
}

/// A card-specific voice line before per-locale resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificVoice {
    pub entries: Vec<SoundDefEntry>,
    pub game_string_key: Option<String>,
    pub condition: VoCondition,
}

/// A sound spell's base graph: the clips it may play, before localization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundSpellGraph {
    pub normal: Vec<SoundDefEntry>,
    pub specific: Vec<SpecificVoice>,
}

/// Walks card graphs through a shared bundle store.
#[derive(Debug, Clone, Copy)]
pub struct GraphResolver<'a> {
    store: &'a BundleStore,
    manifest: &'a AssetManifest,
}

impl<'a> GraphResolver<'a> {
    /// Create a resolver over a store and manifest.
    pub fn new(store: &'a BundleStore, manifest: &'a AssetManifest) -> Self {
        Self { store, manifest }
    }

    /// The manifest assets are resolved against.
    #[inline]
    pub fn manifest(&self) -> &'a AssetManifest {
        self.manifest
    }

    /// Follow a prefab's root `GameObject` to its card behaviour component.
    ///
    /// Returns the bundle's table, the bundle name, and the component. `None`
    /// means the container entry is null or the slot is empty.
    fn card_component(&self, guid: &AssetGuid) -> Result<Option<(Arc<ObjectTable>, String, PathId)>> {
        let bundle = self
            .manifest
            .bundle_of(guid)
            .ok_or_else(|| Error::UnknownAsset(guid.clone()))?;
        let table = self.store.table(bundle)?;

        let component = table
            .container_object(guid)
            .and_then(|root| GameObject::new(root.read_typetree()).component(CARD_COMPONENT_SLOT))
            .filter(|id| table.lookup(*id).is_some());

        Ok(component.map(|id| (table, bundle.to_string(), id)))
    }

    /// Resolve a card's root definition.
    pub fn card_def(&self, guid: &AssetGuid) -> Result<CardDefRecord> {
        let (table, bundle, component) =
            self.card_component(guid)?
                .ok_or_else(|| Error::MissingComponent {
                    guid: guid.clone(),
                    bundle: self.manifest.bundle_of(guid).unwrap_or_default().to_string(),
                    component: "CardDef",
                })?;

        let object = table.lookup(component).ok_or_else(|| Error::MissingComponent {
            guid: guid.clone(),
            bundle: bundle.clone(),
            component: "CardDef",
        })?;

        object
            .read_typetree()
            .deserialize()
            .map_err(|e| Error::Malformed {
                component: "CardDef",
                bundle,
                reason: e.to_string(),
            })
    }

    /// Resolve where a portrait lives for `locale`.
    ///
    /// `texture_path` is the card def's `<prefix>:<guid>` path. Without a GUID
    /// part there is no portrait and both fields are `None`.
    pub fn resolve_image(&self, texture_path: Option<&str>, locale: Locale) -> ImageResolution {
        let Some(base) = texture_path.and_then(AssetGuid::from_asset_path) else {
            return ImageResolution { guid: None, bundle: None };
        };
        let LocaleTarget { guid, bundle, .. } = self.manifest.resolve(locale, &base);
        ImageResolution {
            guid: Some(guid),
            bundle,
        }
    }

    /// Dereference and decode a resolved portrait.
    pub fn load_image(&self, resolution: &ImageResolution) -> Result<Option<RgbaImage>> {
        let (Some(guid), Some(bundle)) = (&resolution.guid, &resolution.bundle) else {
            return Ok(None);
        };
        let table = self.store.table(bundle)?;
        let object = container_object(&table, guid, bundle)?;
        Ok(Some(media::decode_texture(object)?))
    }

    /// Walk from an `AudioSource` to its `SoundDef` and list the clips it may play.
    ///
    /// A null or dangling id at any hop yields an empty list.
    pub fn resolve_sound_def(table: &ObjectTable, audio_source: PathId) -> Vec<SoundDefEntry> {
        match sound_def_object(table, audio_source) {
            Some(sound_def) => ClipSelection::from_sound_def(sound_def.read_typetree()).into_entries(),
            None => Vec::new(),
        }
    }

    /// Resolve a sound spell prefab into its base clip graph.
    ///
    /// Returns `None` when the prefab is not in the catalog, has no sound
    /// spell component, or the component is not a sound spell. Only bundle
    /// load failures are errors.
    pub fn card_sound_spell(&self, guid: &AssetGuid) -> Result<Option<SoundSpellGraph>> {
        let Some(bundle) = self.manifest.bundle_of(guid) else {
            log::warn!("Sound spell {guid} is not in the base asset catalog");
            return Ok(None);
        };
        let Some((table, bundle, component)) = self.card_component(guid)? else {
            log::debug!("Sound spell {guid} in {bundle} has no behaviour component");
            return Ok(None);
        };
        let Some(object) = table.lookup(component) else {
            return Ok(None);
        };

        let node: CardSoundSpellNode = match object.read_typetree().deserialize() {
            Ok(node) => node,
            Err(e) => {
                log::warn!("guid {guid} in {bundle} is not a readable CardSoundSpell: {e}");
                return Ok(None);
            }
        };
        if node.card_sound_data.is_none() {
            log::warn!("guid {guid} in {bundle} is not a CardSoundSpell");
            return Ok(None);
        }

        let normal = node
            .normal_audio_source()
            .map(|source| Self::resolve_sound_def(&table, source))
            .unwrap_or_default();

        let specific = node
            .specific_vo
            .into_iter()
            .filter_map(|vo| {
                let source = vo.audio_source.as_ref().and_then(PPtr::target)?;
                let entries = Self::resolve_sound_def(&table, source);
                if entries.is_empty() {
                    return None;
                }
                Some(SpecificVoice {
                    entries,
                    game_string_key: vo.game_string_key,
                    condition: vo.condition,
                })
            })
            .collect();

        Ok(Some(SoundSpellGraph { normal, specific }))
    }

    /// Resolve where a clip lives for `locale`.
    pub fn resolve_clip(&self, base: &AssetGuid, locale: Locale) -> LocaleTarget {
        self.manifest.resolve(locale, base)
    }

    /// Dereference and decode a resolved clip into its sample buffers.
    ///
    /// `Ok(None)` when the clip has no bundle for this locale.
    pub fn load_clip(&self, target: &LocaleTarget) -> Result<Option<Vec<AudioSample>>> {
        let Some(bundle) = &target.bundle else {
            return Ok(None);
        };
        let table = self.store.table(bundle)?;
        let object = container_object(&table, &target.guid, bundle)?;
        Ok(Some(media::decode_audio_clip(object)?))
    }
}

/// The four in-bundle hops from an `AudioSource` to its `SoundDef`.
fn sound_def_object(table: &ObjectTable, audio_source: PathId) -> Option<&RawObject> {
    let source = table.lookup(audio_source)?;
    let game_object = table.lookup(AudioSource::new(source.read_typetree()).game_object()?)?;
    let sound_def = GameObject::new(game_object.read_typetree()).component(SOUND_DEF_COMPONENT_SLOT)?;
    table.lookup(sound_def)
}

fn container_object<'t>(table: &'t ObjectTable, guid: &AssetGuid, bundle: &str) -> Result<&'t RawObject> {
    table.container_object(guid).ok_or_else(|| {
        Error::Bundle(hearthdump_bundle::Error::AssetNotFound {
            guid: guid.clone(),
            bundle: bundle.to_string(),
        })
    })
}
