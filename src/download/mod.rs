//! HTTP download of manifest samples.
//!
//! This module downloads each sample listed in a manifest and writes it to
//! the output directory under its sanitized name.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large archives)
//! - One shared client with a 10 second timeout and a browser User-Agent
//! - Structured errors tagged with the pipeline stage that failed
//! - A per-sample outcome report instead of log-only failures

mod client;
mod constants;
mod engine;
mod error;
mod filename;

pub use client::{BROWSER_USER_AGENT, SampleClient, SavedSample, save_response};
pub use constants::DEFAULT_SAMPLE_TIMEOUT_SECS;
pub use engine::{
    DownloadEngine, NoProgress, ProgressSink, RunReport, SampleOutcome, SampleResult,
};
pub use error::{DownloadError, FailureStage};
pub use filename::sanitized_name;
