//! Portrait extraction.

use std::fs;

use hearthdump_common::{Locale, OrderedMap};
use hearthdump_graph::nodes::CardDefRecord;
use hearthdump_graph::records::{ImageLocaleRecord, ImageOptionRecord};
use hearthdump_graph::{ImageOption, ImageResolution};
use image::ImageFormat;

use crate::context::{display_path, CardContext};

/// Extract every requested portrait variant of a card.
///
/// Never fails: a portrait that cannot be produced for one locale is
/// reported with `file: null` for that locale only.
pub fn extract_images(ctx: &CardContext<'_>, card_def: &CardDefRecord) -> OrderedMap<ImageOption, ImageOptionRecord> {
    ctx.settings
        .image_options()
        .iter()
        .map(|&option| (option, extract_image(ctx, card_def.texture_path(option), option)))
        .collect()
}

fn extract_image(ctx: &CardContext<'_>, texture_path: Option<&str>, option: ImageOption) -> ImageOptionRecord {
    let mut record = ImageOptionRecord::new();
    for &locale in ctx.settings.locales() {
        let resolution = ctx.resolver.resolve_image(texture_path, locale);
        let file = if resolution.is_available() {
            write_portrait(ctx, &resolution, option, locale)
        } else {
            if let Some(guid) = &resolution.guid {
                log::debug!("Card({}) {option} portrait {guid} has no bundle for {locale}", ctx.card_id);
            }
            None
        };
        record.insert(
            locale,
            ImageLocaleRecord {
                guid: resolution.guid,
                file,
            },
        );
    }
    if record.values().all(|r| r.guid.is_none()) {
        log::warn!("Card({}) has no {option} portrait", ctx.card_id);
    }
    record
}

/// Decode and save one portrait, returning the file it was written to.
fn write_portrait(
    ctx: &CardContext<'_>,
    resolution: &ImageResolution,
    option: ImageOption,
    locale: Locale,
) -> Option<String> {
    let dir = ctx.image_dir();
    let path = dir.join(format!("{option}_{locale}.png"));
    if ctx.settings.is_no_assets() {
        return Some(display_path(&path));
    }

    let image = match ctx.resolver.load_image(resolution) {
        Ok(Some(image)) => image,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Card({}) failed to decode {option} portrait for {locale}: {e}", ctx.card_id);
            return None;
        }
    };

    if let Err(e) = fs::create_dir_all(&dir) {
        log::warn!("Failed to create {}: {e}", dir.display());
        return None;
    }
    if let Err(e) = image.save_with_format(&path, ImageFormat::Png) {
        log::warn!("Failed to write {}: {e}", path.display());
        return None;
    }
    Some(display_path(&path))
}
