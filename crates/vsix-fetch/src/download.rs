//! Marketplace package downloader
//!
//! One GET per extension against its marketplace URL, following
//! redirects. A 200 response is only accepted when the content type is
//! `application/vsix` and the server-reported filename matches the
//! expected package name; everything else is logged and classified
//! without aborting the batch.

use crate::error::{FetchError, FetchResult};
use crate::report::{DownloadOutcome, SyncItem};
use chrono::DateTime;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use vsix_catalog::ExtensionIdentity;

/// Default network timeout; the marketplace occasionally stalls on
/// large packages.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads packages into a target directory
pub struct Downloader {
    client: reqwest::Client,
    target_dir: PathBuf,
}

impl Downloader {
    /// Create a downloader writing into `target_dir` with the default
    /// timeout
    pub fn new(target_dir: impl Into<PathBuf>) -> FetchResult<Self> {
        Self::with_timeout(target_dir, DEFAULT_TIMEOUT)
    }

    /// Create a downloader with an explicit network timeout
    pub fn with_timeout(target_dir: impl Into<PathBuf>, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            target_dir: target_dir.into(),
        })
    }

    /// Download every extension in turn, fully awaiting each request
    /// before issuing the next. Failures are independent per item.
    pub async fn download_all(&self, extensions: &[ExtensionIdentity]) -> Vec<SyncItem> {
        let mut items = Vec::with_capacity(extensions.len());
        for ext in extensions {
            info!("downloading {}", ext.vsix_filename());
            let outcome = self.download_one(ext).await;
            items.push(SyncItem {
                extension: ext.clone(),
                outcome,
            });
        }
        items
    }

    async fn download_one(&self, ext: &ExtensionIdentity) -> DownloadOutcome {
        let response = match self.client.get(ext.marketplace_url()).send().await {
            Ok(response) => response,
            Err(err) => {
                error!("request for {ext} failed: {err}");
                return DownloadOutcome::RequestFailed(err.to_string());
            }
        };

        match response.status() {
            StatusCode::OK => self.accept_package(ext, response).await,
            StatusCode::TOO_MANY_REQUESTS => rate_limited(ext, &response),
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(
                    "could not fetch {ext} from {}: http status {status}, body: {body}",
                    ext.marketplace_url()
                );
                DownloadOutcome::HttpError(status.as_u16())
            }
        }
    }

    /// Validate a 200 response and write the package to disk
    async fn accept_package(&self, ext: &ExtensionIdentity, response: Response) -> DownloadOutcome {
        let content_type = header_str(&response, CONTENT_TYPE.as_str());
        if !content_type.is_some_and(|ct| ct.contains("application/vsix")) {
            warn!(
                "content type of {} is not application/vsix, skipping",
                ext.marketplace_url()
            );
            return DownloadOutcome::SkippedContentType;
        }

        let expected = ext.vsix_filename();
        let Some(fetched) = header_str(&response, CONTENT_DISPOSITION.as_str())
            .and_then(disposition_filename)
            .map(String::from)
        else {
            warn!("no Content-Disposition filename for {ext}, dropping download");
            return DownloadOutcome::MissingDisposition;
        };

        // A name other than the one we asked for means the gallery
        // resolved to a different package; do not keep it.
        if fetched != expected {
            error!("inconsistent filename: {fetched} (fetched) vs {expected} (local)");
            return DownloadOutcome::FilenameMismatch(fetched);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                error!("failed to read body for {ext}: {err}");
                return DownloadOutcome::RequestFailed(err.to_string());
            }
        };

        let path = self.target_dir.join(&expected);
        match fs::write(&path, &body) {
            Ok(()) => DownloadOutcome::Downloaded,
            Err(err) => {
                error!("failed to write {}: {err}", path.display());
                DownloadOutcome::WriteFailed(err.to_string())
            }
        }
    }
}

/// Handle a 429, surfacing the reset time when the marketplace sends one
fn rate_limited(ext: &ExtensionIdentity, response: &Response) -> DownloadOutcome {
    let reset = header_str(response, "X-RateLimit-Reset")
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    match &reset {
        Some(when) => warn!("rate limited while fetching {ext}; block lifts at {when}"),
        None => warn!("rate limited while fetching {ext}; no reset time given"),
    }
    DownloadOutcome::RateLimited(reset)
}

fn header_str<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Extract the `filename=` parameter from a `Content-Disposition` value
fn disposition_filename(header: &str) -> Option<&str> {
    let start = header.find("filename=")? + "filename=".len();
    let rest = &header[start..];
    let value = rest.split(';').next().unwrap_or(rest);
    Some(value.trim().trim_matches('"'))
}
