//! Run configuration for a fetch run.
//!
//! A [`FetchConfig`] is built once (normally from CLI flags) and passed by
//! reference into the manifest fetch, the output directory setup, and the
//! download loop. Nothing in the library reads process-wide state.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::download::{BROWSER_USER_AGENT, DEFAULT_SAMPLE_TIMEOUT_SECS};

/// Location of the objective-see malware manifest.
pub const DEFAULT_MANIFEST_URL: &str = "https://objective-see.com/malware.json";

/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "./malware/";

/// Resolved settings for one fetch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    output_dir: PathBuf,
    manifest_url: String,
    sample_timeout: Duration,
    user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_dir: normalize_output_dir(DEFAULT_OUTPUT_DIR),
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            sample_timeout: Duration::from_secs(DEFAULT_SAMPLE_TIMEOUT_SECS),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Creates a configuration with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output directory. A trailing `/` is appended if missing.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: &str) -> Self {
        self.output_dir = normalize_output_dir(output_dir);
        self
    }

    /// Overrides the manifest location.
    #[must_use]
    pub fn with_manifest_url(mut self, manifest_url: impl Into<String>) -> Self {
        self.manifest_url = manifest_url.into();
        self
    }

    /// Overrides the per-sample client timeout.
    #[must_use]
    pub fn with_sample_timeout(mut self, timeout: Duration) -> Self {
        self.sample_timeout = timeout;
        self
    }

    /// Overrides the User-Agent sent with sample requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    #[must_use]
    pub fn sample_timeout(&self) -> Duration {
        self.sample_timeout
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// Normalizes an output directory argument so it always ends with `/`.
///
/// An empty argument resolves to the current directory.
#[must_use]
pub fn normalize_output_dir(raw: &str) -> PathBuf {
    if raw.is_empty() {
        return PathBuf::from("./");
    }
    if raw.ends_with('/') {
        PathBuf::from(raw)
    } else {
        PathBuf::from(format!("{raw}/"))
    }
}
