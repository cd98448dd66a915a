//! Downloader tests against a wiremock gallery
//!
//! Covers the response-handling priority order: content-type check,
//! Content-Disposition filename validation, rate limiting, and
//! batch independence of per-item failures.

mod common;

use common::*;
use std::fs;
use tempfile::TempDir;
use vsix_fetch::{DownloadOutcome, Downloader};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn downloads_package_to_expected_filename() {
    let server = MockServer::start().await;
    let body = b"vsix package bytes";
    mount_package(
        &server,
        "ms-python",
        "python",
        "2020.11.358366026",
        package_response("ms-python", "python", "2020.11.358366026", body),
    )
    .await;

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();
    let ext = identity_on(&server, "ms-python", "python", "2020.11.358366026");

    let items = downloader.download_all(std::slice::from_ref(&ext)).await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].outcome, DownloadOutcome::Downloaded);
    let written = target
        .path()
        .join("ms-python.python-2020.11.358366026.vsix");
    assert_eq!(fs::read(written).unwrap(), body);
}

#[tokio::test]
async fn overwrites_existing_package_file() {
    let server = MockServer::start().await;
    let body = b"fresh bytes";
    mount_package(
        &server,
        "pub",
        "ext",
        "1.0.0",
        package_response("pub", "ext", "1.0.0", body),
    )
    .await;

    let target = TempDir::new().unwrap();
    let stale = target.path().join("pub.ext-1.0.0.vsix");
    fs::write(&stale, b"stale bytes").unwrap();

    let downloader = Downloader::new(target.path()).unwrap();
    let ext = identity_on(&server, "pub", "ext", "1.0.0");
    downloader.download_all(std::slice::from_ref(&ext)).await;

    assert_eq!(fs::read(&stale).unwrap(), body);
}

#[tokio::test]
async fn mismatched_disposition_filename_writes_nothing() {
    let server = MockServer::start().await;
    let response = ResponseTemplate::new(200)
        .insert_header("content-type", "application/vsix")
        .insert_header("content-disposition", "attachment; filename=other.vsix")
        .set_body_bytes(b"wrong package".to_vec());
    mount_package(&server, "pub", "ext", "1.0.0", response).await;

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();
    let ext = identity_on(&server, "pub", "ext", "1.0.0");

    let items = downloader.download_all(std::slice::from_ref(&ext)).await;

    assert_eq!(
        items[0].outcome,
        DownloadOutcome::FilenameMismatch("other.vsix".to_string())
    );
    assert!(fs::read_dir(target.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn missing_disposition_writes_nothing_but_is_reported() {
    let server = MockServer::start().await;
    let response = ResponseTemplate::new(200)
        .insert_header("content-type", "application/vsix")
        .set_body_bytes(b"package".to_vec());
    mount_package(&server, "pub", "ext", "1.0.0", response).await;

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();
    let ext = identity_on(&server, "pub", "ext", "1.0.0");

    let items = downloader.download_all(std::slice::from_ref(&ext)).await;

    assert_eq!(items[0].outcome, DownloadOutcome::MissingDisposition);
    assert!(fs::read_dir(target.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn non_vsix_content_type_is_skipped() {
    let server = MockServer::start().await;
    let response = ResponseTemplate::new(200)
        .insert_header("content-type", "text/html")
        .set_body_string("<html>sign in</html>");
    mount_package(&server, "pub", "ext", "1.0.0", response).await;

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();
    let ext = identity_on(&server, "pub", "ext", "1.0.0");

    let items = downloader.download_all(std::slice::from_ref(&ext)).await;

    assert_eq!(items[0].outcome, DownloadOutcome::SkippedContentType);
    assert!(fs::read_dir(target.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn rate_limit_surfaces_reset_time() {
    let server = MockServer::start().await;
    // 2023-11-14 22:13:20 UTC
    let response = ResponseTemplate::new(429).insert_header("X-RateLimit-Reset", "1700000000");
    mount_package(&server, "pub", "ext", "1.0.0", response).await;

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();
    let ext = identity_on(&server, "pub", "ext", "1.0.0");

    let items = downloader.download_all(std::slice::from_ref(&ext)).await;

    assert_eq!(
        items[0].outcome,
        DownloadOutcome::RateLimited(Some("2023-11-14 22:13:20 UTC".to_string()))
    );
    assert!(fs::read_dir(target.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn rate_limit_without_reset_header() {
    let server = MockServer::start().await;
    mount_package(&server, "pub", "ext", "1.0.0", ResponseTemplate::new(429)).await;

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();
    let ext = identity_on(&server, "pub", "ext", "1.0.0");

    let items = downloader.download_all(std::slice::from_ref(&ext)).await;

    assert_eq!(items[0].outcome, DownloadOutcome::RateLimited(None));
}

#[tokio::test]
async fn other_status_is_classified_with_code() {
    let server = MockServer::start().await;
    mount_package(
        &server,
        "pub",
        "ext",
        "1.0.0",
        ResponseTemplate::new(404).set_body_string("not found"),
    )
    .await;

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();
    let ext = identity_on(&server, "pub", "ext", "1.0.0");

    let items = downloader.download_all(std::slice::from_ref(&ext)).await;

    assert_eq!(items[0].outcome, DownloadOutcome::HttpError(404));
}

#[tokio::test]
async fn failing_item_does_not_abort_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(package_path("bad", "ext", "1.0.0")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_package(
        &server,
        "good",
        "ext",
        "2.0.0",
        package_response("good", "ext", "2.0.0", b"ok"),
    )
    .await;

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();
    let extensions = vec![
        identity_on(&server, "bad", "ext", "1.0.0"),
        identity_on(&server, "good", "ext", "2.0.0"),
    ];

    let items = downloader.download_all(&extensions).await;

    assert_eq!(items[0].outcome, DownloadOutcome::HttpError(500));
    assert_eq!(items[1].outcome, DownloadOutcome::Downloaded);
    assert!(target.path().join("good.ext-2.0.0.vsix").exists());
}

#[tokio::test]
async fn unreachable_server_is_a_request_failure() {
    // Nothing listens on this port; connection is refused immediately.
    let url = "http://127.0.0.1:1/_apis/public/gallery/publishers/pub/vsextensions/ext/1.0.0/vspackage";
    let ext = vsix_catalog::ExtensionIdentity::from_marketplace_url(url).unwrap();

    let target = TempDir::new().unwrap();
    let downloader = Downloader::new(target.path()).unwrap();

    let items = downloader.download_all(std::slice::from_ref(&ext)).await;

    assert!(matches!(
        items[0].outcome,
        DownloadOutcome::RequestFailed(_)
    ));
}
