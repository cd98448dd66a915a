//! vsix-fetch - Marketplace downloads and editor installs
//!
//! Fetches `.vsix` packages from the marketplace gallery endpoint and
//! drives the editor's install command for packages already on disk.
//! All per-item failures are logged and classified; a batch always runs
//! to completion.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub mod download;
pub mod error;
pub mod install;
pub mod report;

pub use download::Downloader;
pub use error::{FetchError, FetchResult};
pub use install::{install_all, InstallSummary};
pub use report::{DownloadOutcome, SyncItem, SyncReport};
