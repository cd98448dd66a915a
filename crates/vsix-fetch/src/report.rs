//! Per-item outcomes and the batch summary
//!
//! The original tool only logged download failures; the summary here
//! makes them reportable so a run can be judged without scraping logs.

use serde::Serialize;
use vsix_catalog::ExtensionIdentity;

/// What happened to one extension during a download batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum DownloadOutcome {
    /// Package written to the download directory
    Downloaded,
    /// 200 response without an `application/vsix` content type
    SkippedContentType,
    /// Server-reported filename did not match the expected package name
    FilenameMismatch(String),
    /// 200 response with no usable `Content-Disposition` filename
    MissingDisposition,
    /// 429 from the marketplace; value is the reset hint when present
    RateLimited(Option<String>),
    /// Any other HTTP status
    HttpError(u16),
    /// Request never produced a response (network error, timeout)
    RequestFailed(String),
    /// Response received but the package could not be written to disk
    WriteFailed(String),
}

impl DownloadOutcome {
    /// Whether the package ended up on disk
    pub fn is_downloaded(&self) -> bool {
        matches!(self, Self::Downloaded)
    }
}

/// One extension paired with its download outcome
#[derive(Debug, Clone, Serialize)]
pub struct SyncItem {
    /// The extension this outcome belongs to
    pub extension: ExtensionIdentity,
    /// How the download ended
    pub outcome: DownloadOutcome,
}

/// Summary of one download run
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    /// Extensions listed in the extensions file
    pub wanted: usize,
    /// Extensions already present in the download directory
    pub present: usize,
    /// Source lines discarded as unparseable
    pub skipped_lines: usize,
    /// Per-extension download outcomes
    pub items: Vec<SyncItem>,
}

impl SyncReport {
    /// Number of packages written during this run
    pub fn downloaded(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.outcome.is_downloaded())
            .count()
    }

    /// Number of attempted downloads that did not produce a file
    pub fn failed(&self) -> usize {
        self.items.len() - self.downloaded()
    }
}
