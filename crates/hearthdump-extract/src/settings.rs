//! Extraction settings.

use std::path::{Path, PathBuf};

use hearthdump_common::Locale;
use hearthdump_graph::{AudioOption, ImageOption};

use crate::{Error, Result};

/// Everything that shapes one extraction run.
///
/// Option and locale lists keep the order they were given in, minus
/// duplicates; that order drives both file naming and JSON key order.
#[derive(Debug, Clone)]
pub struct ExtractSettings {
    output: PathBuf,
    image_options: Vec<ImageOption>,
    audio_options: Vec<AudioOption>,
    locales: Vec<Locale>,
    no_assets: bool,
    sub_struct: bool,
    merged_struct: bool,
    ensure_ascii: bool,
    jobs: usize,
}

impl ExtractSettings {
    /// Create settings writing to `output`, with no options and `enus` only.
    pub fn new<P: AsRef<Path>>(output: P) -> Self {
        Self {
            output: output.as_ref().to_path_buf(),
            image_options: Vec::new(),
            audio_options: Vec::new(),
            locales: vec![Locale::ENUS],
            no_assets: false,
            sub_struct: false,
            merged_struct: false,
            ensure_ascii: false,
            jobs: 1,
        }
    }

    /// Set the image options by name.
    pub fn with_image_options<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.image_options = parse_unique(names, |name| {
            ImageOption::from_name(name).ok_or_else(|| Error::UnknownImageOption(name.to_string()))
        })?;
        Ok(self)
    }

    /// Set the audio options by name.
    pub fn with_audio_options<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.audio_options = parse_unique(names, |name| {
            AudioOption::from_name(name).ok_or_else(|| Error::UnknownAudioOption(name.to_string()))
        })?;
        Ok(self)
    }

    /// Set the locales by code. An empty list keeps the default.
    pub fn with_locales<I, S>(mut self, codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locales = parse_unique(codes, |code| Ok(code.parse::<Locale>()?))?;
        if !locales.is_empty() {
            self.locales = locales;
        }
        Ok(self)
    }

    /// Compute paths and records without writing media files.
    pub fn no_assets(mut self, enabled: bool) -> Self {
        self.no_assets = enabled;
        self
    }

    /// Also write `image/struct.json` and `audio/struct.json` per card.
    pub fn sub_struct(mut self, enabled: bool) -> Self {
        self.sub_struct = enabled;
        self
    }

    /// Write one `struct.json` for the whole batch instead of one per card.
    pub fn merged_struct(mut self, enabled: bool) -> Self {
        self.merged_struct = enabled;
        self
    }

    /// Escape non-ASCII characters in structure files.
    pub fn ensure_ascii(mut self, enabled: bool) -> Self {
        self.ensure_ascii = enabled;
        self
    }

    /// Number of cards extracted concurrently. Zero is treated as one.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    #[inline]
    pub fn output(&self) -> &Path {
        &self.output
    }

    #[inline]
    pub fn image_options(&self) -> &[ImageOption] {
        &self.image_options
    }

    #[inline]
    pub fn audio_options(&self) -> &[AudioOption] {
        &self.audio_options
    }

    #[inline]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    #[inline]
    pub fn is_no_assets(&self) -> bool {
        self.no_assets
    }

    #[inline]
    pub fn is_sub_struct(&self) -> bool {
        self.sub_struct
    }

    #[inline]
    pub fn is_merged_struct(&self) -> bool {
        self.merged_struct
    }

    #[inline]
    pub fn is_ensure_ascii(&self) -> bool {
        self.ensure_ascii
    }

    #[inline]
    pub fn job_count(&self) -> usize {
        self.jobs
    }
}

fn parse_unique<T, I, S, F>(names: I, mut parse: F) -> Result<Vec<T>>
where
    T: PartialEq,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str) -> Result<T>,
{
    let mut parsed = Vec::new();
    for name in names {
        let value = parse(name.as_ref().trim())?;
        if !parsed.contains(&value) {
            parsed.push(value);
        }
    }
    Ok(parsed)
}
