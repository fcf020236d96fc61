//! Leaf payload decoding for textures and audio clips.
//!
//! Texture payloads arrive as the raw `image data` bytes of a `Texture2D`,
//! base64 encoded by the exporter. Audio clips arrive already converted to
//! WAV by the exporter, one buffer per sample.

use base64::prelude::*;
use image::RgbaImage;
use serde_json::Value;

use crate::object::RawObject;
use crate::{Error, Result};

/// Unity texture formats with a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Alpha8,
    Rgb24,
    Rgba32,
    Argb32,
    Bgra32,
    Dxt1,
    Dxt5,
    Bc7,
}

impl TryFrom<i64> for TextureFormat {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Self::Alpha8),
            3 => Ok(Self::Rgb24),
            4 => Ok(Self::Rgba32),
            5 => Ok(Self::Argb32),
            10 => Ok(Self::Dxt1),
            12 => Ok(Self::Dxt5),
            14 => Ok(Self::Bgra32),
            25 => Ok(Self::Bc7),
            other => Err(Error::UnsupportedTextureFormat(other)),
        }
    }
}

impl TextureFormat {
    /// Bytes per pixel for uncompressed formats.
    fn pixel_size(self) -> Option<usize> {
        match self {
            Self::Alpha8 => Some(1),
            Self::Rgb24 => Some(3),
            Self::Rgba32 | Self::Argb32 | Self::Bgra32 => Some(4),
            Self::Dxt1 | Self::Dxt5 | Self::Bc7 => None,
        }
    }
}

/// A `Texture2D` object's pixel payload.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub data: Vec<u8>,
}

impl Texture {
    /// Read the texture payload from a `Texture2D` object.
    pub fn from_object(object: &RawObject) -> Result<Self> {
        if object.class_name() != "Texture2D" {
            return Err(Error::UnexpectedClass {
                expected: "Texture2D",
                actual: object.class_name().to_string(),
            });
        }

        let tree = object.read_typetree();
        let dimension = |field: &'static str| -> Result<u32> {
            tree.get_i64(field)
                .and_then(|v| u32::try_from(v).ok())
                .filter(|v| *v > 0)
                .ok_or(Error::MissingField(field))
        };
        let width = dimension("m_Width")?;
        let height = dimension("m_Height")?;
        let format = TextureFormat::try_from(
            tree.get_i64("m_TextureFormat")
                .ok_or(Error::MissingField("m_TextureFormat"))?,
        )?;
        let encoded = tree
            .get_str("image data")
            .ok_or(Error::MissingField("image data"))?;
        let data = BASE64_STANDARD.decode(encoded)?;

        Ok(Self {
            name: tree.get_str("m_Name").unwrap_or_default().to_string(),
            width,
            height,
            format,
            data,
        })
    }

    /// Decode to an upright RGBA image.
    ///
    /// Unity stores rows bottom-up, so the decoded image is flipped.
    pub fn to_image(&self) -> Result<RgbaImage> {
        let w = self.width as usize;
        let h = self.height as usize;

        let rgba = match self.format.pixel_size() {
            Some(pixel_size) => {
                let expected = w * h * pixel_size;
                if self.data.len() < expected {
                    return Err(Error::Decode(format!(
                        "{:?} data too small: got {}, expected {}",
                        self.format,
                        self.data.len(),
                        expected
                    )));
                }
                expand_to_rgba(self.format, &self.data[..expected])
            }
            None => {
                let mut output = vec![0u32; w * h];
                let decoded = match self.format {
                    TextureFormat::Dxt1 => texture2ddecoder::decode_bc1(&self.data, w, h, &mut output),
                    TextureFormat::Dxt5 => texture2ddecoder::decode_bc3(&self.data, w, h, &mut output),
                    _ => texture2ddecoder::decode_bc7(&self.data, w, h, &mut output),
                };
                decoded.map_err(|e| Error::Decode(format!("{:?} decode failed: {:?}", self.format, e)))?;
                u32_to_u8_rgba(&output)
            }
        };

        let mut image = RgbaImage::from_raw(self.width, self.height, rgba)
            .ok_or_else(|| Error::Decode("pixel buffer does not match dimensions".into()))?;
        image::imageops::flip_vertical_in_place(&mut image);
        Ok(image)
    }
}

/// Convert an uncompressed pixel buffer to RGBA8.
fn expand_to_rgba(format: TextureFormat, data: &[u8]) -> Vec<u8> {
    match format {
        TextureFormat::Rgba32 => data.to_vec(),
        TextureFormat::Alpha8 => data.iter().flat_map(|&a| [255, 255, 255, a]).collect(),
        TextureFormat::Rgb24 => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        TextureFormat::Argb32 => data
            .chunks_exact(4)
            .flat_map(|p| [p[1], p[2], p[3], p[0]])
            .collect(),
        TextureFormat::Bgra32 => data
            .chunks_exact(4)
            .flat_map(|p| [p[2], p[1], p[0], p[3]])
            .collect(),
        TextureFormat::Dxt1 | TextureFormat::Dxt5 | TextureFormat::Bc7 => Vec::new(),
    }
}

/// Convert decoder output (0xAARRGGBB per pixel) to RGBA8.
fn u32_to_u8_rgba(pixels: &[u32]) -> Vec<u8> {
    let mut result = Vec::with_capacity(pixels.len() * 4);
    for &pixel in pixels {
        let b = (pixel & 0xFF) as u8;
        let g = ((pixel >> 8) & 0xFF) as u8;
        let r = ((pixel >> 16) & 0xFF) as u8;
        let a = ((pixel >> 24) & 0xFF) as u8;
        result.extend_from_slice(&[r, g, b, a]);
    }
    result
}

/// Decode a `Texture2D` object straight to an upright RGBA image.
pub fn decode_texture(object: &RawObject) -> Result<RgbaImage> {
    Texture::from_object(object)?.to_image()
}

/// One named sample buffer of an audio clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSample {
    pub name: String,
    pub data: Vec<u8>,
}

/// Decode an `AudioClip` object into its sample buffers, in stored order.
pub fn decode_audio_clip(object: &RawObject) -> Result<Vec<AudioSample>> {
    if object.class_name() != "AudioClip" {
        return Err(Error::UnexpectedClass {
            expected: "AudioClip",
            actual: object.class_name().to_string(),
        });
    }

    let samples = object
        .read_typetree()
        .get("samples")
        .and_then(Value::as_object)
        .ok_or(Error::MissingField("samples"))?;

    samples
        .iter()
        .map(|(name, encoded)| {
            let encoded = encoded.as_str().ok_or(Error::MissingField("samples"))?;
            Ok(AudioSample {
                name: name.clone(),
                data: BASE64_STANDARD.decode(encoded)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Typetree;
    use hearthdump_common::PathId;
    use serde_json::json;

    fn texture_object(format: i64, width: u32, height: u32, data: &[u8]) -> RawObject {
        RawObject::new(
            PathId::new(1),
            "Texture2D",
            Typetree::from_value(json!({
                "m_Name": "portrait",
                "m_Width": width,
                "m_Height": height,
                "m_TextureFormat": format,
                "image data": BASE64_STANDARD.encode(data),
            })),
        )
    }

    #[test]
    fn test_rgba32_is_flipped() {
        // Bottom row red, top row blue in storage order.
        let data = [255, 0, 0, 255, 0, 0, 255, 255];
        let image = decode_texture(&texture_object(4, 1, 2, &data)).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_argb32_channel_order() {
        let data = [10, 20, 30, 40];
        let image = decode_texture(&texture_object(5, 1, 1, &data)).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [20, 30, 40, 10]);
    }

    #[test]
    fn test_rgb24_opaque() {
        let data = [1, 2, 3];
        let image = decode_texture(&texture_object(3, 1, 1, &data)).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_short_payload() {
        let result = decode_texture(&texture_object(4, 2, 2, &[0; 4]));
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_unsupported_format() {
        let result = decode_texture(&texture_object(47, 1, 1, &[0; 4]));
        assert!(matches!(result, Err(Error::UnsupportedTextureFormat(47))));
    }

    #[test]
    fn test_wrong_class() {
        let object = RawObject::new(PathId::new(1), "Sprite", Typetree::default());
        assert!(matches!(
            decode_texture(&object),
            Err(Error::UnexpectedClass { expected: "Texture2D", .. })
        ));
    }

    #[test]
    fn test_audio_samples_keep_order() {
        let object = RawObject::new(
            PathId::new(2),
            "AudioClip",
            Typetree::from_value(json!({
                "m_Name": "VO_CS2_033_Play_01",
                "samples": {
                    "VO_CS2_033_Play_01-1.wav": BASE64_STANDARD.encode(b"RIFF1"),
                    "VO_CS2_033_Play_01-0.wav": BASE64_STANDARD.encode(b"RIFF0"),
                },
            })),
        );
        let samples = decode_audio_clip(&object).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].name, "VO_CS2_033_Play_01-1.wav");
        assert_eq!(samples[0].data, b"RIFF1");
        assert_eq!(samples[1].data, b"RIFF0");
    }

    #[test]
    fn test_audio_missing_samples() {
        let object = RawObject::new(PathId::new(2), "AudioClip", Typetree::default());
        assert!(matches!(decode_audio_clip(&object), Err(Error::MissingField("samples"))));
    }
}
