//! Output directory preparation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Permission bits for a newly created output directory.
#[cfg(unix)]
const OUTPUT_DIR_MODE: u32 = 0o755;

/// Errors preparing the output directory.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The directory does not exist and could not be created.
    #[error("cannot create output directory {path}: {source}")]
    CreateDir {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The path could not be inspected for a reason other than absence.
    #[error("cannot access output directory {path}: {source}")]
    Inspect {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The path exists but is not a directory.
    #[error("output path {path} exists and is not a directory")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },
}

/// Creates `dir` if it does not exist yet.
///
/// Creation is not recursive: a missing parent is an error.
///
/// # Errors
///
/// Returns [`StorageError::CreateDir`] if creation fails,
/// [`StorageError::NotADirectory`] if a file already sits at `dir`, and
/// [`StorageError::Inspect`] if `dir` cannot be examined for any reason
/// other than not existing.
pub async fn ensure_output_dir(dir: &Path) -> Result<(), StorageError> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {
            debug!(path = %dir.display(), "output directory exists");
            return Ok(());
        }
        Ok(_) => {
            return Err(StorageError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StorageError::Inspect {
                path: dir.to_path_buf(),
                source,
            });
        }
    }

    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(false);
    #[cfg(unix)]
    builder.mode(OUTPUT_DIR_MODE);

    builder
        .create(dir)
        .await
        .map_err(|source| StorageError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    info!(path = %dir.display(), "created output directory");
    Ok(())
}
