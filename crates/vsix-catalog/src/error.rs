//! Error types for the extension catalog

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while parsing identities or reading sources
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Text is not a valid marketplace download link
    #[error("not a valid marketplace link: {0}")]
    InvalidMarketplaceLink(String),

    /// Listing line is missing the `.` or `@` separators
    #[error("not a valid extension listing line: {0}")]
    InvalidListingLine(String),

    /// Filename stem is missing the `.` or `-` separators
    #[error("not a valid package filename: {0}")]
    InvalidFilenameStem(String),

    /// Extensions file does not exist
    #[error("extensions file does not exist: {0}")]
    MissingFile(PathBuf),

    /// Download directory does not exist
    #[error("directory does not exist: {0}")]
    MissingDir(PathBuf),
}

impl CatalogError {
    /// Whether this error is a per-line parse failure rather than a
    /// setup or IO problem. Parse failures are skipped by sources;
    /// everything else propagates.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Self::InvalidMarketplaceLink(_)
                | Self::InvalidListingLine(_)
                | Self::InvalidFilenameStem(_)
        )
    }
}
