//! Extraction pipeline - per card × option × locale orchestration.

use std::sync::atomic::{AtomicUsize, Ordering};

use hearthdump_bundle::BundleStore;
use hearthdump_catalog::{AssetManifest, GameplayAudio};
use hearthdump_common::OrderedMap;
use hearthdump_graph::records::CardRecord;
use hearthdump_graph::GraphResolver;
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::context::CardContext;
use crate::settings::ExtractSettings;
use crate::{audio, json, portrait, Result};

/// Outcome of one card.
#[derive(Debug)]
enum CardOutcome {
    Extracted(CardRecord),
    Skipped,
    Failed,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Cards extracted, possibly with some locales absent.
    pub succeeded: usize,
    /// Cards with no definition in the manifest.
    pub skipped: usize,
    /// Cards aborted by a bundle or structure error.
    pub failed: usize,
    /// Records of the extracted cards, in request order.
    pub records: Vec<CardRecord>,
}

impl BatchReport {
    /// Total number of cards attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }

    /// Check if no card failed.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Drives the extraction of a batch of cards.
///
/// # Example
///
/// ```no_run
/// use hearthdump_bundle::BundleStore;
/// use hearthdump_catalog::AssetManifest;
/// use hearthdump_extract::{ExtractSettings, ExtractionPipeline};
///
/// let settings = ExtractSettings::new("out")
///     .with_image_options(["normal"])?
///     .with_locales(["enus", "dede"])?;
/// let pipeline = ExtractionPipeline::new(
///     settings,
///     BundleStore::with_json_dumps("/games/Hearthstone"),
///     AssetManifest::open("manifest.json")?,
/// );
/// let report = pipeline.run(&["CS2_033"])?;
/// println!("{} extracted", report.succeeded);
/// # Ok::<(), hearthdump_extract::Error>(())
/// ```
#[derive(Debug)]
pub struct ExtractionPipeline {
    settings: ExtractSettings,
    store: BundleStore,
    manifest: AssetManifest,
    gameplay_audio: Option<GameplayAudio>,
}

impl ExtractionPipeline {
    /// Create a pipeline.
    pub fn new(settings: ExtractSettings, store: BundleStore, manifest: AssetManifest) -> Self {
        Self {
            settings,
            store,
            manifest,
            gameplay_audio: None,
        }
    }

    /// Attach the table that voice line texts are read from.
    pub fn with_gameplay_audio(mut self, gameplay_audio: GameplayAudio) -> Self {
        self.gameplay_audio = Some(gameplay_audio);
        self
    }

    #[inline]
    pub fn settings(&self) -> &ExtractSettings {
        &self.settings
    }

    #[inline]
    pub fn store(&self) -> &BundleStore {
        &self.store
    }

    #[inline]
    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    fn context<'a>(&'a self, card_id: &'a str) -> CardContext<'a> {
        CardContext {
            card_id,
            settings: &self.settings,
            resolver: GraphResolver::new(&self.store, &self.manifest),
            gameplay_audio: self.gameplay_audio.as_ref(),
        }
    }

    /// Extract one card.
    ///
    /// Returns `Ok(None)` when the manifest has no definition for the card.
    pub fn extract_card(&self, card_id: &str) -> Result<Option<CardRecord>> {
        let Some(guid) = self.manifest.card_guid(card_id) else {
            log::warn!("Card({card_id}) has no CardDef");
            return Ok(None);
        };

        let ctx = self.context(card_id);
        let card_def = ctx.resolver.card_def(guid)?;

        let mut record = CardRecord::new(card_id);
        record.image = portrait::extract_images(&ctx, &card_def);
        record.audio = audio::extract_audio(&ctx, &card_def)?;

        self.write_card_structs(&ctx, &record)?;
        Ok(Some(record))
    }

    fn write_card_structs(&self, ctx: &CardContext<'_>, record: &CardRecord) -> Result<()> {
        let ascii = self.settings.is_ensure_ascii();
        if self.settings.is_sub_struct() {
            if !self.settings.image_options().is_empty() {
                json::write_struct(&ctx.image_dir().join("struct.json"), &record.image, ascii)?;
            }
            if !self.settings.audio_options().is_empty() {
                json::write_struct(&ctx.card_dir().join("audio").join("struct.json"), &record.audio, ascii)?;
            }
        }
        if !self.settings.is_merged_struct() {
            json::write_struct(&ctx.card_dir().join("struct.json"), record, ascii)?;
        }
        Ok(())
    }

    fn run_card(&self, card_id: &str) -> CardOutcome {
        match self.extract_card(card_id) {
            Ok(Some(record)) => CardOutcome::Extracted(record),
            Ok(None) => CardOutcome::Skipped,
            Err(e) => {
                log::error!("Card({card_id}) failed: {e}");
                CardOutcome::Failed
            }
        }
    }

    /// Extract a batch of cards.
    pub fn run<S: AsRef<str> + Sync>(&self, card_ids: &[S]) -> Result<BatchReport> {
        self.run_with_progress(card_ids, |_, _| {})
    }

    /// Extract a batch of cards, reporting `(completed, total)` after each one.
    ///
    /// One card failing never stops the batch. Records keep the request
    /// order whatever the job count.
    pub fn run_with_progress<S, F>(&self, card_ids: &[S], progress: F) -> Result<BatchReport>
    where
        S: AsRef<str> + Sync,
        F: FnMut(usize, usize) + Send,
    {
        let total = card_ids.len();
        let done = AtomicUsize::new(0);
        let progress = Mutex::new(progress);

        let run_one = |card_id: &S| {
            let outcome = self.run_card(card_id.as_ref());
            let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
            (*progress.lock())(completed, total);
            outcome
        };

        let outcomes: Vec<CardOutcome> = if self.settings.job_count() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.settings.job_count())
                .build()?;
            pool.install(|| card_ids.par_iter().map(run_one).collect())
        } else {
            card_ids.iter().map(run_one).collect()
        };

        let mut report = BatchReport::default();
        for outcome in outcomes {
            match outcome {
                CardOutcome::Extracted(record) => {
                    report.succeeded += 1;
                    report.records.push(record);
                }
                CardOutcome::Skipped => report.skipped += 1,
                CardOutcome::Failed => report.failed += 1,
            }
        }

        if self.settings.is_merged_struct() {
            let merged: OrderedMap<&str, &CardRecord> =
                report.records.iter().map(|r| (r.card_id.as_str(), r)).collect();
            json::write_struct(
                &self.settings.output().join("struct.json"),
                &merged,
                self.settings.is_ensure_ascii(),
            )?;
        }

        log::info!(
            "Extracted {} cards ({} skipped, {} failed)",
            report.succeeded,
            report.skipped,
            report.failed
        );
        Ok(report)
    }
}
