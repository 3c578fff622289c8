//! Manifest retrieval over HTTP.

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::{Manifest, ManifestError};
use crate::user_agent;

/// HTTP client for the one manifest request of a run.
///
/// The client has no request timeout; the fetch waits as long as the server
/// keeps the connection open.
#[derive(Debug, Clone)]
pub struct ManifestFetcher {
    client: Client,
}

impl ManifestFetcher {
    /// Creates a fetcher that identifies itself with the tool's User-Agent.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .gzip(true)
            .user_agent(user_agent::default_manifest_user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Issues a GET to `url` and returns the full response body.
    ///
    /// The status code is not checked: an error page is returned like any
    /// other body and left to the decoder to reject.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Network`] if no response arrives and
    /// [`ManifestError::Body`] if reading the body fails.
    #[instrument(skip(self))]
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ManifestError> {
        debug!("requesting manifest");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ManifestError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "manifest request returned non-success status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ManifestError::body(url, e))?;
        info!(bytes = body.len(), "manifest fetched");
        Ok(body.to_vec())
    }

    /// Fetches and decodes the manifest at `url`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`fetch_bytes`](Self::fetch_bytes) or
    /// [`ManifestError::Decode`] if the body is not a manifest.
    pub async fn fetch(&self, url: &str) -> Result<Manifest, ManifestError> {
        let body = self.fetch_bytes(url).await?;
        let manifest = Manifest::from_slice(&body)?;
        info!(samples = manifest.len(), "manifest decoded");
        Ok(manifest)
    }
}
