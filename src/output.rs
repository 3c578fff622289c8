//! Stdout progress lines and run summary.
//!
//! Stdout carries only these lines; tracing logs go to stderr.

use sample_fetcher_core::{DownloadError, FailureStage, ProgressSink, RunReport, SampleOutcome};

/// Prints each sample's file name as its download starts and one line per
/// failure.
#[derive(Debug, Default)]
pub struct StdoutProgress;

impl ProgressSink for StdoutProgress {
    fn sample_started(&mut self, _index: usize, file_name: &str) {
        println!("{file_name}");
    }

    fn sample_finished(&mut self, outcome: &SampleOutcome) {
        if let Some(line) = outcome.error().and_then(failure_line) {
            println!("{line}");
        }
    }
}

/// Stdout line for a failed sample, or `None` for silent skips.
///
/// Malformed URLs are skipped without output.
pub fn failure_line(error: &DownloadError) -> Option<String> {
    match error.stage() {
        FailureStage::Request => None,
        FailureStage::Transport => Some(format!("failed to get sample: {error}")),
        FailureStage::CreateFile => Some(format!("failed to create file: {error}")),
        FailureStage::Copy => Some(format!("failed to write file: {error}")),
    }
}

/// One-line summary printed after the loop.
pub fn summary_line(report: &RunReport) -> String {
    format!(
        "saved {} of {} sample(s), skipped {}",
        report.saved(),
        report.total(),
        report.skipped()
    )
}
