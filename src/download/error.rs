//! Error types for the download module.
//!
//! Every variant is terminal for one sample and never for the run. The
//! [`FailureStage`] of an error tells which step of the per-sample pipeline
//! stopped it.

use std::path::PathBuf;

use thiserror::Error;

/// Pipeline step at which a sample download stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// The request could not be built (malformed URL).
    Request,
    /// The request was sent but no response arrived.
    Transport,
    /// The output file could not be created.
    CreateFile,
    /// Copying the body into the file failed.
    Copy,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Request => "request",
            Self::Transport => "transport",
            Self::CreateFile => "create-file",
            Self::Copy => "copy",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while downloading one sample.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The download URL is malformed.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The URL has no scheme, so no request can be sent for it.
    #[error("unsupported protocol scheme in {url:?}")]
    UnsupportedScheme {
        /// The scheme-less URL string.
        url: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The client timeout elapsed before the response arrived.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The output file could not be created or truncated.
    #[error("cannot create {path}: {source}")]
    CreateFile {
        /// The file path that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the response body failed mid-stream.
    #[error("error reading body of {url}: {source}")]
    Body {
        /// The URL whose body failed.
        url: String,
        /// The underlying stream error.
        #[source]
        source: reqwest::Error,
    },

    /// Writing to or flushing the output file failed.
    #[error("IO error writing to {path}: {source}")]
    Write {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an unsupported scheme error.
    pub fn unsupported_scheme(url: impl Into<String>) -> Self {
        Self::UnsupportedScheme { url: url.into() }
    }

    /// Creates a transport error, separating timeouts from other failures.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates a file creation error.
    pub fn create_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a body stream error.
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Body {
            url: url.into(),
            source,
        }
    }

    /// Creates a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns the pipeline step this error stopped at.
    #[must_use]
    pub fn stage(&self) -> FailureStage {
        match self {
            Self::InvalidUrl { .. } => FailureStage::Request,
            Self::UnsupportedScheme { .. } | Self::Network { .. } | Self::Timeout { .. } => {
                FailureStage::Transport
            }
            Self::CreateFile { .. } => FailureStage::CreateFile,
            Self::Body { .. } | Self::Write { .. } => FailureStage::Copy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping_for_io_variants() {
        let create = DownloadError::create_file(
            "/nope/sample",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(create.stage(), FailureStage::CreateFile);

        let write = DownloadError::write(
            "/nope/sample",
            std::io::Error::new(std::io::ErrorKind::StorageFull, "full"),
        );
        assert_eq!(write.stage(), FailureStage::Copy);

        assert_eq!(
            DownloadError::invalid_url("::not a url").stage(),
            FailureStage::Request
        );
    }

    #[test]
    fn test_display_includes_context() {
        let err = DownloadError::invalid_url("htp//broken");
        assert_eq!(err.to_string(), "invalid URL: htp//broken");

        let err = DownloadError::create_file(
            "/out/EvilCorp",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/out/EvilCorp"));
    }

    #[test]
    fn test_stage_display_labels() {
        assert_eq!(FailureStage::Request.to_string(), "request");
        assert_eq!(FailureStage::CreateFile.to_string(), "create-file");
    }
}
