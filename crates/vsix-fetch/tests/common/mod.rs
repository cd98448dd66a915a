//! Mock gallery helpers for download testing

use vsix_catalog::ExtensionIdentity;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Gallery download path for a triple
pub fn package_path(publisher: &str, name: &str, version: &str) -> String {
    format!("/_apis/public/gallery/publishers/{publisher}/vsextensions/{name}/{version}/vspackage")
}

/// Identity whose marketplace URL points at the mock server
pub fn identity_on(
    server: &MockServer,
    publisher: &str,
    name: &str,
    version: &str,
) -> ExtensionIdentity {
    let url = format!("{}{}", server.uri(), package_path(publisher, name, version));
    ExtensionIdentity::from_marketplace_url(&url).expect("mock URL should parse")
}

/// Well-formed package response for a triple
pub fn package_response(publisher: &str, name: &str, version: &str, body: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/vsix; charset=binary")
        .insert_header(
            "content-disposition",
            format!("attachment; filename={publisher}.{name}-{version}.vsix").as_str(),
        )
        .set_body_bytes(body.to_vec())
}

/// Mount a response for one package path
pub async fn mount_package(
    server: &MockServer,
    publisher: &str,
    name: &str,
    version: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("GET"))
        .and(path(package_path(publisher, name, version)))
        .respond_with(response)
        .mount(server)
        .await;
}
