//! Sound extraction.
//!
//! Files are laid out as `<card>/audio/<option>/<prefix>_<j>_<locale><i>.wav`
//! where `j` numbers the candidate clips of one sound def and `i` the
//! samples of one clip, both from 1. The prefix names the effect def, the
//! sound spell and the normal or specific voice slot, e.g.
//! `trigger_2_1_specific_1`.

use std::fs;
use std::path::Path;

use hearthdump_common::{AssetGuid, OrderedMap};
use hearthdump_graph::nodes::{CardDefRecord, CardEffectDef, CardEffects, SoundDefEntry};
use hearthdump_graph::records::{
    AudioOptionRecord, CardSoundSpellRecord, EffectRecord, NormalSoundRecord, SoundUnit, SpecificVoiceRecord,
};
use hearthdump_graph::AudioOption;

use crate::context::{display_path, CardContext};
use crate::{Error, Result};

/// Extract every requested sound category of a card.
///
/// Fails only when a bundle the card needs cannot be loaded, or an output
/// file cannot be written.
pub fn extract_audio(
    ctx: &CardContext<'_>,
    card_def: &CardDefRecord,
) -> Result<OrderedMap<AudioOption, AudioOptionRecord>> {
    let mut audio = OrderedMap::new();
    for &option in ctx.settings.audio_options() {
        let record = match card_def.effects(option) {
            CardEffects::Single(def) => AudioOptionRecord::Single(effect_record(ctx, option, def, option.name())?),
            CardEffects::List(defs) => AudioOptionRecord::List(
                defs.iter()
                    .enumerate()
                    .map(|(d, def)| effect_record(ctx, option, Some(def), &format!("{option}_{}", d + 1)))
                    .collect::<Result<_>>()?,
            ),
        };
        audio.insert(option, record);
    }
    Ok(audio)
}

fn effect_record(
    ctx: &CardContext<'_>,
    option: AudioOption,
    def: Option<&CardEffectDef>,
    prefix: &str,
) -> Result<EffectRecord> {
    let Some(def) = def else {
        return Ok(EffectRecord::new());
    };
    def.sound_spell_paths
        .iter()
        .enumerate()
        .map(|(k, path)| {
            let prefix = format!("{prefix}_{}", k + 1);
            match AssetGuid::from_asset_path(path) {
                Some(guid) => card_sound_spell(ctx, option, &guid, &prefix),
                None => {
                    log::warn!("Card({}) sound spell path {path:?} has no guid", ctx.card_id);
                    Ok(CardSoundSpellRecord::default())
                }
            }
        })
        .collect()
}

/// Resolve and materialize one sound spell.
pub fn card_sound_spell(
    ctx: &CardContext<'_>,
    option: AudioOption,
    guid: &AssetGuid,
    prefix: &str,
) -> Result<CardSoundSpellRecord> {
    let Some(graph) = ctx.resolver.card_sound_spell(guid)? else {
        return Ok(CardSoundSpellRecord::default());
    };

    let normal = if graph.normal.is_empty() {
        None
    } else {
        Some(NormalSoundRecord {
            sound_units: sound_units(ctx, option, &graph.normal, &format!("{prefix}_normal"))?,
        })
    };

    let specific = graph
        .specific
        .into_iter()
        .enumerate()
        .map(|(i, voice)| -> Result<SpecificVoiceRecord> {
            let game_string_value = match (&voice.game_string_key, ctx.gameplay_audio) {
                (Some(key), Some(table)) => table.texts(key),
                _ => OrderedMap::new(),
            };
            Ok(SpecificVoiceRecord {
                sound_units: sound_units(ctx, option, &voice.entries, &format!("{prefix}_specific_{}", i + 1))?,
                game_string_key: voice.game_string_key,
                game_string_value,
                condition: voice.condition,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CardSoundSpellRecord {
        normal,
        specific: (!specific.is_empty()).then_some(specific),
    })
}

/// Materialize the candidate clips of one sound def across every locale.
fn sound_units(
    ctx: &CardContext<'_>,
    option: AudioOption,
    entries: &[SoundDefEntry],
    prefix: &str,
) -> Result<Vec<SoundUnit>> {
    let dir = ctx.audio_dir(option);
    if !ctx.settings.is_no_assets() {
        fs::create_dir_all(&dir).map_err(Error::io(&dir))?;
    }

    let mut units = Vec::with_capacity(entries.len());
    for (j, entry) in entries.iter().enumerate() {
        let mut unit = SoundUnit {
            base_guid: entry.guid.clone(),
            weight: entry.weight.clone(),
            locale_guid: OrderedMap::new(),
            locale_files: OrderedMap::new(),
        };

        for &locale in ctx.settings.locales() {
            let target = ctx.resolver.resolve_clip(&entry.guid, locale);
            let kind = if target.redirected { "localized" } else { "base" };
            let samples = match ctx.resolver.load_clip(&target) {
                Ok(Some(samples)) => samples,
                Ok(None) => {
                    log::warn!("Card({}) {kind} clip {} has no bundle for {locale}", ctx.card_id, target.guid);
                    Vec::new()
                }
                Err(e) if e.is_bundle_load() => return Err(e.into()),
                Err(e) => {
                    log::warn!(
                        "Card({}) failed to decode {kind} clip {} for {locale}: {e}",
                        ctx.card_id,
                        target.guid
                    );
                    Vec::new()
                }
            };

            let mut files = Vec::with_capacity(samples.len());
            for (i, sample) in samples.iter().enumerate() {
                let path = dir.join(format!("{prefix}_{}_{locale}{}.wav", j + 1, i + 1));
                if !ctx.settings.is_no_assets() {
                    write_sample(&path, &sample.data)?;
                }
                files.push(display_path(&path));
            }

            unit.locale_guid.insert(locale, target.guid);
            unit.locale_files.insert(locale, files);
        }
        units.push(unit);
    }
    Ok(units)
}

fn write_sample(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).map_err(Error::io(path))
}
