//! Error types for the export pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can abort an export run.
///
/// Every variant is fatal to the pipeline; the only non-fatal condition
/// (a component the render service returned no URL for) never becomes an
/// error, it is logged and skipped at download time.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The document tree contains no component nodes.
    #[error("no components found in the file")]
    NoComponents,

    /// The download pool was configured with a zero concurrency.
    #[error("invalid download concurrency {value}: must be at least 1")]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// A Figma API call failed (file fetch or batch render request).
    #[error("figma API request failed: {0}")]
    Api(#[from] ApiError),

    /// Downloading one rendered image failed.
    #[error("failed to download image for {filename}: {source}")]
    Download {
        /// Output filename of the component whose download failed.
        filename: String,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// Filesystem error (directory creation or file write).
    #[error("IO error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest could not be serialized to JSON.
    #[error("failed to serialize manifest: {source}")]
    Serialize {
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A download task panicked.
    #[error("download task panicked: {source}")]
    TaskJoin {
        /// The join error from the runtime.
        #[source]
        source: tokio::task::JoinError,
    },

    /// The download pool semaphore was closed unexpectedly.
    #[error("download pool semaphore closed unexpectedly")]
    SemaphoreClosed,
}

impl ExportError {
    /// Creates an IO error with path context.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
