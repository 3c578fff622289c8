//! Manifest model and decoding.
//!
//! The manifest is a single JSON object whose `malware` array lists every
//! known sample:
//!
//! ```json
//! {"malware": [{"name": "EvilCorp Trojan", "type": "trojan",
//!               "virusTotal": "https://...", "moreInfo": "https://...",
//!               "download": "https://..."}]}
//! ```
//!
//! Unknown fields are ignored. `type` may be absent or `null`; `virusTotal`
//! and `moreInfo` default to empty strings. `name` and `download` are required.

mod error;
mod fetch;

pub use error::ManifestError;
pub use fetch::ManifestFetcher;

use serde::{Deserialize, Serialize};

/// Ordered list of sample records from one manifest fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Sample records in manifest order.
    pub malware: Vec<Sample>,
}

/// One downloadable sample described by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Display name; the local file name is derived from it.
    pub name: String,
    /// Optional classification (adware, backdoor, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// VirusTotal report link.
    #[serde(default)]
    pub virus_total: String,
    /// Write-up link.
    #[serde(default)]
    pub more_info: String,
    /// Where the sample archive is fetched from.
    pub download: String,
}

impl Manifest {
    /// Decodes a manifest from raw response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Decode`] if the bytes are not JSON or do not
    /// match the manifest shape. No partial manifest is returned.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ManifestError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Number of sample records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.malware.len()
    }

    /// Returns true if the manifest lists no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.malware.is_empty()
    }

    /// Iterates samples in manifest order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.malware.iter()
    }
}
