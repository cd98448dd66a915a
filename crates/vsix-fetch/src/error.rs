//! Error types for fetch operations

use thiserror::Error;

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Setup errors for the download machinery. Per-item download failures
/// are not errors here; they are classified as [`crate::DownloadOutcome`]s.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
