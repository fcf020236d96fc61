//! A game install written to disk as typetree dumps, for pipeline tests.
//!
//! - `CS2_033` has a portrait localized for dede, and one additional-play
//!   sound spell with a normal clip (localized for dede) and one specific
//!   voice line with two random clips.
//! - `CS2_034` points at a card bundle that does not exist.
//! - `CS2_036` has a portrait path without a guid and no sounds.
//! - `CS2_035` is not in the manifest at all.

use std::fs;
use std::path::Path;

use base64::prelude::*;
use hearthdump_bundle::BUNDLE_DIR;
use hearthdump_catalog::{AssetManifest, GameplayAudio};
use hearthdump_common::Locale;
use serde_json::{json, Value};

pub const DEDE_TEXT: &str = "Feuerball!";
pub const FRFR_TEXT: &str = "Boule de feu !";

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

fn texture(rgba: [u8; 4]) -> Value {
    object(
        1,
        "Texture2D",
        json!({
            "m_Name": "portrait",
            "m_Width": 1,
            "m_Height": 1,
            "m_TextureFormat": 4,
            "image data": BASE64_STANDARD.encode(rgba),
        }),
    )
}

fn audio_clip(path_id: i64, samples: &[&[u8]]) -> Value {
    let samples: serde_json::Map<String, Value> = samples
        .iter()
        .enumerate()
        .map(|(i, data)| (format!("clip-{i}.wav"), Value::from(BASE64_STANDARD.encode(data))))
        .collect();
    object(path_id, "AudioClip", json!({"m_Name": "clip", "samples": samples}))
}

fn bundles() -> Vec<(&'static str, Value)> {
    vec![
        (
            "cards0.unity3d",
            json!({
                "container": {"card-033": 1, "card-036": 10},
                "objects": [
                    object(1, "GameObject", game_object(&[2, 3])),
                    object(3, "MonoBehaviour", json!({
                        "m_PortraitTexturePath": "CS2_033.psd:tex-033",
                        "m_SignaturePortraitTexturePath": "",
                        "m_AdditionalPlayEffectDefs": [
                            {"m_SoundSpellPaths": ["CS2_033_Play.prefab:spell-033"]},
                        ],
                    })),
                    object(10, "GameObject", game_object(&[11, 12])),
                    object(12, "MonoBehaviour", json!({"m_PortraitTexturePath": "CS2_036.psd"})),
                ],
            }),
        ),
        (
            "sounds0.unity3d",
            json!({
                "container": {"spell-033": 1},
                "objects": [
                    object(1, "GameObject", game_object(&[2, 3])),
                    object(3, "MonoBehaviour", json!({
                        "m_CardSoundData": {"m_AudioSource": pptr(4)},
                        "m_CardSpecificVoDataList": [{
                            "m_AudioSource": pptr(7),
                            "m_GameStringKey": "VO_CS2_033",
                            "m_CardId": "EX1_572",
                            "m_RequireTag": 0,
                            "m_SideToSearch": 1,
                            "m_TagValue": 0,
                            "m_ZonesToSearch": [1],
                        }],
                    })),
                    object(4, "AudioSource", json!({"m_GameObject": pptr(5)})),
                    object(5, "GameObject", game_object(&[50, 4, 6])),
                    object(6, "MonoBehaviour", json!({"m_AudioClip": "CS2_033_Play.wav:clip-play"})),
                    object(7, "AudioSource", json!({"m_GameObject": pptr(8)})),
                    object(8, "GameObject", game_object(&[80, 7, 9])),
                    object(9, "MonoBehaviour", json!({
                        "m_RandomClips": [
                            {"m_Clip": "VO_A.wav:clip-vo-a", "m_Weight": 1.0},
                            {"m_Clip": "VO_B.wav:clip-vo-b", "m_Weight": 2.0},
                        ],
                    })),
                ],
            }),
        ),
        ("cardtextures0.unity3d", json!({"container": {"tex-033": 1}, "objects": [texture([255, 0, 0, 255])]})),
        ("cardtextures_dede.unity3d", json!({"container": {"tex-033-dede": 1}, "objects": [texture([0, 0, 255, 255])]})),
        (
            "audio0.unity3d",
            json!({
                "container": {"clip-play": 1, "clip-vo-a": 2, "clip-vo-b": 3},
                "objects": [
                    audio_clip(1, &[b"RIFF-play-enus"]),
                    audio_clip(2, &[b"RIFF-a"]),
                    audio_clip(3, &[b"RIFF-b0", b"RIFF-b1"]),
                ],
            }),
        ),
        (
            "audio_dede.unity3d",
            json!({"container": {"clip-play-dede": 1}, "objects": [audio_clip(1, &[b"RIFF-play-dede"])]}),
        ),
    ]
}

const MANIFEST: &str = r#"{
    "cards_map": { "CS2_033": "card-033", "CS2_034": "card-034", "CS2_036": "card-036" },
    "base_assets_catalog": {
        "card-033": "cards0.unity3d",
        "card-034": "cards1.unity3d",
        "card-036": "cards0.unity3d",
        "spell-033": "sounds0.unity3d",
        "tex-033": "cardtextures0.unity3d",
        "clip-play": "audio0.unity3d",
        "clip-vo-a": "audio0.unity3d",
        "clip-vo-b": "audio0.unity3d"
    },
    "asset_catalog_locale": {
        "dede": {
            "tex-033": { "guid": "tex-033-dede", "bundle": "cardtextures_dede.unity3d" },
            "clip-play": { "guid": "clip-play-dede", "bundle": "audio_dede.unity3d" }
        }
    }
}"#;

/// Write every bundle under `<root>/Data/Win`.
pub fn write_install(root: &Path) {
    let dir = root.join(BUNDLE_DIR);
    fs::create_dir_all(&dir).unwrap();
    for (name, dump) in bundles() {
        fs::write(dir.join(name), dump.to_string()).unwrap();
    }
}

pub fn manifest() -> AssetManifest {
    AssetManifest::parse(MANIFEST.as_bytes()).unwrap()
}

/// The same manifest without any locale catalog, so every locale reads the
/// base assets.
pub fn base_manifest() -> AssetManifest {
    let mut document: Value = serde_json::from_str(MANIFEST).unwrap();
    document.as_object_mut().unwrap().remove("asset_catalog_locale");
    AssetManifest::parse(document.to_string().as_bytes()).unwrap()
}

pub fn gameplay_audio() -> GameplayAudio {
    let mut table = GameplayAudio::new();
    table.insert("VO_CS2_033", Locale::ENUS, "Fireball!");
    table.insert("VO_CS2_033", "dede".parse().unwrap(), DEDE_TEXT);
    table.insert("VO_CS2_033", "frfr".parse().unwrap(), FRFR_TEXT);
    table
}
