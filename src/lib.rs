//! Sample Fetcher Core Library
//!
//! This library fetches the objective-see malware manifest, decodes it into an
//! ordered list of sample records, and downloads every listed sample into a
//! local directory, one at a time.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Run configuration threaded into every stage
//! - [`manifest`] - Manifest fetch and JSON decoding
//! - [`download`] - Per-sample HTTP download and the sequential run loop
//! - [`storage`] - Output directory preparation

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod manifest;
pub mod storage;
mod user_agent;

// Re-export commonly used types
pub use config::{DEFAULT_MANIFEST_URL, DEFAULT_OUTPUT_DIR, FetchConfig, normalize_output_dir};
pub use download::{
    BROWSER_USER_AGENT, DEFAULT_SAMPLE_TIMEOUT_SECS, DownloadEngine, DownloadError, FailureStage,
    ProgressSink, RunReport, SampleClient, SampleOutcome, SampleResult, SavedSample,
    sanitized_name,
};
pub use manifest::{Manifest, ManifestError, ManifestFetcher, Sample};
pub use storage::{StorageError, ensure_output_dir};
