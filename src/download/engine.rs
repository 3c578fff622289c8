//! Sequential download loop over a manifest.
//!
//! The `DownloadEngine` walks the manifest in order and handles one sample at
//! a time: request, report the file name, create the file, copy the body.
//! Every failure ends that sample and the loop moves on. The run itself never
//! fails; it returns a [`RunReport`] holding one [`SampleOutcome`] per record.
//!
//! # Example
//!
//! ```no_run
//! use sample_fetcher_core::{DownloadEngine, FetchConfig, ManifestFetcher, SampleClient};
//! use sample_fetcher_core::download::NoProgress;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FetchConfig::default();
//! let manifest = ManifestFetcher::new()?.fetch(config.manifest_url()).await?;
//! let engine = DownloadEngine::new(SampleClient::from_config(&config)?);
//! let report = engine
//!     .process_manifest(&manifest, config.output_dir(), &mut NoProgress)
//!     .await;
//! println!("Saved: {}, Skipped: {}", report.saved(), report.skipped());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use super::client::{SampleClient, SavedSample, save_response};
use super::error::{DownloadError, FailureStage};
use super::filename::sanitized_name;
use crate::manifest::{Manifest, Sample};

/// Receives per-sample progress from the engine.
///
/// `sample_started` fires once a response has arrived, just before the
/// output file is created. `sample_finished` fires for every record.
pub trait ProgressSink {
    /// A response arrived for the sample that will be saved as `file_name`.
    fn sample_started(&mut self, index: usize, file_name: &str);

    /// The sample reached a final outcome.
    fn sample_finished(&mut self, outcome: &SampleOutcome);
}

/// Progress sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn sample_started(&mut self, _index: usize, _file_name: &str) {}

    fn sample_finished(&mut self, _outcome: &SampleOutcome) {}
}

/// Final state of one sample.
#[derive(Debug)]
pub enum SampleResult {
    /// The body was written to disk.
    Saved(SavedSample),
    /// The sample was abandoned at the error's stage.
    Skipped(DownloadError),
}

/// Outcome of one manifest record.
#[derive(Debug)]
pub struct SampleOutcome {
    /// Position in the manifest.
    pub index: usize,
    /// Display name from the manifest.
    pub name: String,
    /// Local file name derived from `name`.
    pub file_name: String,
    /// What happened.
    pub result: SampleResult,
}

impl SampleOutcome {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self.result, SampleResult::Saved(_))
    }

    /// Returns the error if the sample was skipped.
    #[must_use]
    pub fn error(&self) -> Option<&DownloadError> {
        match &self.result {
            SampleResult::Skipped(e) => Some(e),
            SampleResult::Saved(_) => None,
        }
    }

    /// Returns the failure stage if the sample was skipped.
    #[must_use]
    pub fn failure_stage(&self) -> Option<FailureStage> {
        self.error().map(DownloadError::stage)
    }
}

/// Ordered outcomes of one run.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<SampleOutcome>,
}

impl RunReport {
    /// All outcomes in manifest order.
    #[must_use]
    pub fn outcomes(&self) -> &[SampleOutcome] {
        &self.outcomes
    }

    /// Number of samples written to disk.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    /// Number of samples abandoned.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.total() - self.saved()
    }

    /// Number of samples abandoned at `stage`.
    #[must_use]
    pub fn skipped_at(&self, stage: FailureStage) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.failure_stage() == Some(stage))
            .count()
    }

    /// Number of records processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    fn push(&mut self, outcome: SampleOutcome) {
        self.outcomes.push(outcome);
    }
}

/// Downloads every sample of a manifest, one after another.
#[derive(Debug, Clone)]
pub struct DownloadEngine {
    client: SampleClient,
}

impl DownloadEngine {
    /// Creates an engine that downloads with `client`.
    #[must_use]
    pub fn new(client: SampleClient) -> Self {
        Self { client }
    }

    /// Processes every sample of `manifest` in order.
    ///
    /// Individual download failures do NOT stop the loop; each one is
    /// recorded as a skipped outcome in the returned report.
    #[instrument(skip(self, manifest, progress), fields(output_dir = %output_dir.display(), samples = manifest.len()))]
    pub async fn process_manifest(
        &self,
        manifest: &Manifest,
        output_dir: &Path,
        progress: &mut dyn ProgressSink,
    ) -> RunReport {
        let mut report = RunReport::default();

        info!("starting sample downloads");

        for (index, sample) in manifest.samples().enumerate() {
            let result = self.process_sample(index, sample, output_dir, progress).await;
            let outcome = SampleOutcome {
                index,
                name: sample.name.clone(),
                file_name: sanitized_name(&sample.name).to_string(),
                result,
            };
            progress.sample_finished(&outcome);
            report.push(outcome);
        }

        info!(
            saved = report.saved(),
            skipped = report.skipped(),
            total = report.total(),
            "sample downloads complete"
        );
        report
    }

    async fn process_sample(
        &self,
        index: usize,
        sample: &Sample,
        output_dir: &Path,
        progress: &mut dyn ProgressSink,
    ) -> SampleResult {
        let response = match self.client.request(&sample.download).await {
            Ok(response) => response,
            Err(e) => {
                if e.stage() == FailureStage::Request {
                    debug!(index, url = %sample.download, "skipping sample with malformed URL");
                } else {
                    warn!(index, error = %e, "sample request failed");
                }
                return SampleResult::Skipped(e);
            }
        };

        let file_name = sanitized_name(&sample.name);
        progress.sample_started(index, file_name);

        match save_response(response, output_dir, file_name).await {
            Ok(saved) => SampleResult::Saved(saved),
            Err(e) => {
                warn!(index, error = %e, "failed to save sample");
                SampleResult::Skipped(e)
            }
        }
    }
}
