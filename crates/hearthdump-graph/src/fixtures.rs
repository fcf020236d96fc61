//! A small in-memory game install shared by the graph tests.

use base64::prelude::*;
use hearthdump_bundle::{BundleStore, JsonDumpLoader, MemoryLoader};
use hearthdump_catalog::{AssetManifest, LocaleOverride};
use hearthdump_common::AssetGuid;
use serde_json::{json, Value};

use crate::GraphResolver;

pub const CARD_ID: &str = "CS2_033";
pub const CARD_GUID: &str = "card-cs2-033";
pub const SOUND_SPELL_GUID: &str = "spell-play";
pub const SILENT_SPELL_GUID: &str = "spell-attack";
pub const NOT_A_SOUND_SPELL_GUID: &str = "spell-wrong";
pub const GAME_STRING_KEY: &str = "VO_CS2_033_EX1_572";

pub const CARDS_BUNDLE: &str = "cards0.unity3d";
pub const SOUND_BUNDLE: &str = "sounds0.unity3d";
pub const TEXTURE_BUNDLE: &str = "cardtextures0.unity3d";
pub const LOCALIZED_TEXTURE_BUNDLE: &str = "cardtextures_zhcn.unity3d";
pub const AUDIO_BUNDLE: &str = "audio0.unity3d";
pub const LOCALIZED_AUDIO_BUNDLE: &str = "audio_dede.unity3d";

pub const AUDIO_SOURCE_NORMAL: i64 = 20;
pub const AUDIO_SOURCE_ORPHAN: i64 = 40;

pub const CLIP_NORMAL: &str = "clip-normal";
pub const CLIP_BROKEN: &str = "clip-broken";

fn pptr(path_id: i64) -> Value {
    json!({"m_FileID": 0, "m_PathID": path_id})
}

fn game_object(components: &[i64]) -> Value {
    let components: Vec<Value> = components.iter().map(|&id| json!({"component": pptr(id)})).collect();
    json!({"m_Component": components})
}

fn object(path_id: i64, class_name: &str, typetree: Value) -> Value {
    json!({"path_id": path_id, "type": class_name, "typetree": typetree})
}

fn audio_clip(path_id: i64, samples: &[(&str, &[u8])]) -> Value {
    let samples: serde_json::Map<String, Value> = samples
        .iter()
        .map(|(name, data)| (name.to_string(), Value::from(BASE64_STANDARD.encode(data))))
        .collect();
    object(path_id, "AudioClip", json!({"m_Name": "clip", "samples": samples}))
}

fn texture(path_id: i64, rgba: [u8; 4]) -> Value {
    object(
        path_id,
        "Texture2D",
        json!({
            "m_Name": "portrait",
            "m_Width": 2,
            "m_Height": 2,
            "m_TextureFormat": 4,
            "image data": BASE64_STANDARD.encode(rgba.repeat(4)),
        }),
    )
}

/// Every bundle of the install as typetree dump documents.
pub fn bundles() -> Vec<(&'static str, Value)> {
    vec![
        (
            CARDS_BUNDLE,
            json!({
                "container": {CARD_GUID: 1},
                "objects": [
                    object(1, "GameObject", game_object(&[2, 3])),
                    object(2, "Transform", json!({})),
                    object(3, "MonoBehaviour", json!({
                        "m_PortraitTexturePath": "CS2_033.psd:tex-base",
                        "m_SignaturePortraitTexturePath": "CS2_033_sig.psd",
                        "m_AttackEffectDef": {"m_SoundSpellPaths": [format!("Attack.prefab:{SILENT_SPELL_GUID}")]},
                        "m_DeathEffectDef": {"m_SoundSpellPaths": [format!("Death.prefab:{NOT_A_SOUND_SPELL_GUID}")]},
                        "m_AdditionalPlayEffectDefs": [
                            {"m_SoundSpellPaths": [format!("Play.prefab:{SOUND_SPELL_GUID}")]},
                        ],
                        "m_TriggerEffectDefs": null,
                    })),
                ],
            }),
        ),
        (
            SOUND_BUNDLE,
            json!({
                "container": {SOUND_SPELL_GUID: 10, SILENT_SPELL_GUID: 60, NOT_A_SOUND_SPELL_GUID: 50},
                "objects": [
                    object(10, "GameObject", game_object(&[11, 12])),
                    object(12, "MonoBehaviour", json!({
                        "m_CardSoundData": {"m_AudioSource": pptr(AUDIO_SOURCE_NORMAL)},
                        "m_CardSpecificVoDataList": [
                            {
                                "m_AudioSource": pptr(30),
                                "m_GameStringKey": GAME_STRING_KEY,
                                "m_CardId": "EX1_572",
                                "m_RequireTag": 0,
                                "m_SideToSearch": 1,
                                "m_TagValue": 0,
                                "m_ZonesToSearch": [1],
                            },
                            {"m_AudioSource": pptr(AUDIO_SOURCE_ORPHAN), "m_GameStringKey": "VO_ORPHAN"},
                        ],
                    })),
                    object(AUDIO_SOURCE_NORMAL, "AudioSource", json!({"m_GameObject": pptr(21)})),
                    object(21, "GameObject", game_object(&[22, AUDIO_SOURCE_NORMAL, 23])),
                    object(23, "MonoBehaviour", json!({"m_AudioClip": format!("VO_CS2_033_Play_01.wav:{CLIP_NORMAL}")})),
                    object(30, "AudioSource", json!({"m_GameObject": pptr(31)})),
                    object(31, "GameObject", game_object(&[32, 30, 33])),
                    object(33, "MonoBehaviour", json!({
                        "m_AudioClip": "",
                        "m_RandomClips": [
                            {"m_Clip": "VO_A.wav:clip-vo-1", "m_Weight": 1.0},
                            {"m_Clip": "VO_B.wav:clip-vo-2", "m_Weight": 3.0},
                        ],
                    })),
                    object(AUDIO_SOURCE_ORPHAN, "AudioSource", json!({"m_GameObject": pptr(0)})),
                    object(50, "GameObject", game_object(&[51, 52])),
                    object(52, "MonoBehaviour", json!({"m_Name": "Spell"})),
                    object(60, "GameObject", game_object(&[61, 62])),
                    object(62, "MonoBehaviour", json!({"m_CardSoundData": {"m_AudioSource": pptr(0)}})),
                ],
            }),
        ),
        (
            TEXTURE_BUNDLE,
            json!({"container": {"tex-base": 100}, "objects": [texture(100, [255, 0, 0, 255])]}),
        ),
        (
            LOCALIZED_TEXTURE_BUNDLE,
            json!({"container": {"tex-zhcn": 100}, "objects": [texture(100, [0, 0, 255, 255])]}),
        ),
        (
            AUDIO_BUNDLE,
            json!({
                "container": {CLIP_NORMAL: 200, "clip-vo-1": 201, "clip-vo-2": 202, CLIP_BROKEN: 203},
                "objects": [
                    audio_clip(200, &[("VO_CS2_033_Play_01.wav", b"RIFF-enus")]),
                    audio_clip(201, &[("VO_A.wav", b"RIFF-a")]),
                    audio_clip(202, &[("VO_B-0.wav", b"RIFF-b0"), ("VO_B-1.wav", b"RIFF-b1")]),
                    object(203, "AudioClip", json!({"m_Name": "broken"})),
                ],
            }),
        ),
        (
            LOCALIZED_AUDIO_BUNDLE,
            json!({
                "container": {"clip-normal-dede": 300},
                "objects": [audio_clip(300, &[("VO_CS2_033_Play_01.wav", b"RIFF-dede")])],
            }),
        ),
    ]
}

/// The manifest describing [`bundles`].
pub fn manifest() -> AssetManifest {
    let mut manifest = AssetManifest::new();
    manifest.insert_card(CARD_ID, AssetGuid::new(CARD_GUID));
    manifest.insert_asset(AssetGuid::new(CARD_GUID), CARDS_BUNDLE);
    for guid in [SOUND_SPELL_GUID, SILENT_SPELL_GUID, NOT_A_SOUND_SPELL_GUID] {
        manifest.insert_asset(AssetGuid::new(guid), SOUND_BUNDLE);
    }
    manifest.insert_asset(AssetGuid::new("tex-base"), TEXTURE_BUNDLE);
    for guid in [CLIP_NORMAL, "clip-vo-1", "clip-vo-2", CLIP_BROKEN] {
        manifest.insert_asset(AssetGuid::new(guid), AUDIO_BUNDLE);
    }
    manifest.insert_override(
        "zhcn".parse().unwrap(),
        AssetGuid::new("tex-base"),
        LocaleOverride {
            guid: AssetGuid::new("tex-zhcn"),
            bundle: LOCALIZED_TEXTURE_BUNDLE.into(),
        },
    );
    manifest.insert_override(
        "dede".parse().unwrap(),
        AssetGuid::new(CLIP_NORMAL),
        LocaleOverride {
            guid: AssetGuid::new("clip-normal-dede"),
            bundle: LOCALIZED_AUDIO_BUNDLE.into(),
        },
    );
    manifest
}

pub struct Fixture {
    pub store: BundleStore,
    pub manifest: AssetManifest,
}

impl Fixture {
    pub fn new() -> Self {
        let loader = bundles().into_iter().fold(MemoryLoader::new(), |loader, (name, dump)| {
            let table = JsonDumpLoader::parse(dump.to_string().as_bytes()).unwrap();
            loader.with_bundle(name, table)
        });
        Self {
            store: BundleStore::new("/games/Hearthstone", loader),
            manifest: manifest(),
        }
    }

    pub fn resolver(&self) -> GraphResolver<'_> {
        GraphResolver::new(&self.store, &self.manifest)
    }
}
