//! Per-card extraction context.

use std::path::{Path, PathBuf};

use hearthdump_catalog::GameplayAudio;
use hearthdump_graph::{AudioOption, GraphResolver};

use crate::settings::ExtractSettings;

/// What one card's extraction needs, borrowed from the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub card_id: &'a str,
    pub settings: &'a ExtractSettings,
    pub resolver: GraphResolver<'a>,
    pub gameplay_audio: Option<&'a GameplayAudio>,
}

impl<'a> CardContext<'a> {
    /// `<output>/<card_id>`
    pub fn card_dir(&self) -> PathBuf {
        self.settings.output().join(self.card_id)
    }

    /// `<output>/<card_id>/image`
    pub fn image_dir(&self) -> PathBuf {
        self.card_dir().join("image")
    }

    /// `<output>/<card_id>/audio/<option>`
    pub fn audio_dir(&self, option: AudioOption) -> PathBuf {
        self.card_dir().join("audio").join(option.name())
    }
}

/// Render an output path the way records report it.
pub(crate) fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
