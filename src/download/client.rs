//! HTTP client wrapper for downloading samples.
//!
//! This module provides the `SampleClient` struct which issues one GET per
//! sample with a client-level timeout and a desktop browser User-Agent, and
//! streams the response body into the output file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::DEFAULT_SAMPLE_TIMEOUT_SECS;
use super::error::DownloadError;
use super::filename::{sample_path, sanitized_name};
use crate::config::FetchConfig;
use crate::manifest::Sample;

/// Browser User-Agent sent with every sample request.
///
/// Some sample hosts turn away clients that do not look like a browser.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:47.0) Gecko/20100101 Firefox/47.0";

/// HTTP client for downloading samples.
///
/// Created once per run and shared by every sample, so all downloads use
/// the same timeout and connection pool.
///
/// # Example
///
/// ```no_run
/// use sample_fetcher_core::{FetchConfig, Sample, SampleClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FetchConfig::default();
/// let client = SampleClient::from_config(&config)?;
/// let sample = Sample {
///     name: "EvilCorp Trojan".to_string(),
///     kind: None,
///     virus_total: String::new(),
///     more_info: String::new(),
///     download: "https://example.com/EvilCorp.zip".to_string(),
/// };
/// let saved = client.download_sample(&sample, config.output_dir()).await?;
/// println!("Saved {} bytes to {}", saved.bytes, saved.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SampleClient {
    client: Client,
}

/// A sample written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSample {
    /// Where the body was written.
    pub path: PathBuf,
    /// Number of body bytes written.
    pub bytes: u64,
}

impl SampleClient {
    /// Creates a client with the default 10 second timeout and browser UA.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_settings(
            Duration::from_secs(DEFAULT_SAMPLE_TIMEOUT_SECS),
            BROWSER_USER_AGENT,
        )
    }

    /// Creates a client using the timeout and User-Agent from `config`.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be
    /// initialized.
    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Self::with_settings(config.sample_timeout(), config.user_agent())
    }

    /// Creates a client with an explicit timeout and User-Agent.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend cannot be
    /// initialized.
    #[instrument(level = "debug")]
    pub fn with_settings(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Downloads one sample into `output_dir`, named by [`sanitized_name`].
    ///
    /// # Errors
    ///
    /// Returns the first error of [`request`](Self::request) or
    /// [`save_response`](Self::save_response).
    #[instrument(skip(self, sample), fields(url = %sample.download))]
    pub async fn download_sample(
        &self,
        sample: &Sample,
        output_dir: &Path,
    ) -> Result<SavedSample, DownloadError> {
        let response = self.request(&sample.download).await?;
        save_response(response, output_dir, sanitized_name(&sample.name)).await
    }

    /// Sends the GET for `url` and returns the response.
    ///
    /// The status code is not checked; an error page is saved like any
    /// other body.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidUrl`] if `url` does not parse,
    /// [`DownloadError::UnsupportedScheme`] if it is a relative reference,
    /// and [`DownloadError::Network`] or [`DownloadError::Timeout`] if no
    /// response arrives.
    pub async fn request(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let parsed = Url::parse(url).map_err(|e| parse_failure(url, e))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| DownloadError::transport(url, e))?;

        debug!(status = response.status().as_u16(), "response received");
        Ok(response)
    }
}

/// Maps a URL parse failure to the error the request pipeline reports.
///
/// A reference without a scheme (`/samples/a.zip`, `samples/a.zip`, empty)
/// is a well-formed request target that cannot be sent, so it fails at the
/// transport step. A colon in the first segment (`::x`, `ht!tp://x`) makes
/// the reference itself malformed.
fn parse_failure(url: &str, error: url::ParseError) -> DownloadError {
    let first_segment = url.split('/').next().unwrap_or_default();
    if error == url::ParseError::RelativeUrlWithoutBase && !first_segment.contains(':') {
        DownloadError::unsupported_scheme(url)
    } else {
        DownloadError::invalid_url(url)
    }
}

/// Creates `<output_dir>/<file_name>` and streams the response body into it.
///
/// An existing file is truncated. A partially written file is left in place
/// when the copy fails.
///
/// # Errors
///
/// Returns [`DownloadError::CreateFile`] if the file cannot be created,
/// [`DownloadError::Body`] if the body stream fails, and
/// [`DownloadError::Write`] if writing to the file fails.
#[instrument(skip(response, output_dir))]
pub async fn save_response(
    response: reqwest::Response,
    output_dir: &Path,
    file_name: &str,
) -> Result<SavedSample, DownloadError> {
    let url = response.url().to_string();
    let path = sample_path(output_dir, file_name);

    let file = File::create(&path)
        .await
        .map_err(|e| DownloadError::create_file(path.clone(), e))?;

    let bytes = stream_to_file(file, response, &url, &path).await?;

    info!(path = %path.display(), bytes, "sample saved");
    Ok(SavedSample { path, bytes })
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = match chunk_result {
            Ok(chunk) => chunk,
            Err(e) => {
                // Keep what already arrived on disk.
                if let Err(flush_err) = writer.flush().await {
                    debug!(path = %file_path.display(), error = %flush_err, "flush after body error failed");
                }
                return Err(DownloadError::body(url, e));
            }
        };

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::write(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::write(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::download::FailureStage;

    #[tokio::test]
    async fn test_request_rejects_malformed_url_without_network() {
        let client = SampleClient::new().unwrap();
        let err = client.request("::not a url").await.unwrap_err();
        assert!(matches!(err, DownloadError::InvalidUrl { .. }));
        assert_eq!(err.stage(), FailureStage::Request);
    }

    #[tokio::test]
    async fn test_request_relative_url_fails_at_transport() {
        let client = SampleClient::new().unwrap();
        for url in ["/samples/a.zip", "samples/a.zip", ""] {
            let err = client.request(url).await.unwrap_err();
            assert!(
                matches!(err, DownloadError::UnsupportedScheme { .. }),
                "{url:?} gave {err:?}"
            );
            assert_eq!(err.stage(), FailureStage::Transport);
        }
    }

    #[tokio::test]
    async fn test_request_colon_in_first_segment_is_malformed() {
        let client = SampleClient::new().unwrap();
        for url in ["::::", "ht!tp://::bad"] {
            let err = client.request(url).await.unwrap_err();
            assert_eq!(err.stage(), FailureStage::Request, "{url:?} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn test_request_connection_refused_is_transport() {
        let client = SampleClient::with_settings(Duration::from_secs(2), BROWSER_USER_AGENT)
            .unwrap();
        let err = client.request("http://127.0.0.1:1/sample.zip").await.unwrap_err();
        assert_eq!(err.stage(), FailureStage::Transport, "{err}");
    }
}
