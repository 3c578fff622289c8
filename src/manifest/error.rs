//! Error types for manifest fetch and decode.

use thiserror::Error;

/// Errors that abort a run before any sample is downloaded.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest request could not be sent or no response arrived.
    #[error("network error fetching manifest {url}: {source}")]
    Network {
        /// The manifest URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but draining its body failed.
    #[error("failed reading manifest body from {url}: {source}")]
    Body {
        /// The manifest URL.
        url: String,
        /// The underlying read error.
        #[source]
        source: reqwest::Error,
    },

    /// The body is not JSON or does not have the manifest shape.
    #[error("failed to decode manifest: {source}")]
    Decode {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a body read error from a reqwest error.
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Body {
            url: url.into(),
            source,
        }
    }

    /// Returns true if this is a decode error.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }
}
