//! Constants for the download module.

/// Per-sample client timeout in seconds. Covers connect, headers and body.
pub const DEFAULT_SAMPLE_TIMEOUT_SECS: u64 = 10;
