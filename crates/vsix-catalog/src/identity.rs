//! Extension identity and the three textual parsers
//!
//! An identity is the (publisher, name, version) triple that uniquely
//! names a marketplace extension. It can be recovered from three
//! encodings: a marketplace download URL, a `publisher.name@version`
//! listing line from the editor, and a `publisher.name-version` package
//! filename stem.

use crate::error::{CatalogError, CatalogResult};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Path marker identifying a gallery download URL. Matched anywhere in
/// the string rather than against the full production host so that
/// URLs pointing at a test server still parse.
const GALLERY_MARKER: &str = "/_apis/public/gallery/publishers/";

/// Marker separating the publisher segment from the name segment.
const VSEXTENSIONS_MARKER: &str = "vsextensions/";

/// Suffix token every download URL must carry.
const VSPACKAGE_TOKEN: &str = "vspackage";

/// Base used when regenerating a canonical URL from a triple.
const GALLERY_BASE: &str = "https://marketplace.visualstudio.com/_apis/public/gallery/publishers";

/// Package file extension, without the dot.
pub const PACKAGE_EXT: &str = "vsix";

/// One marketplace extension, identified by publisher, name and version.
///
/// Equality and hashing consider only the triple; the stored URL is a
/// detail of how the identity was obtained. When parsed from a URL the
/// trimmed original is kept (it may carry query parameters the
/// regenerated form would lose); when built from a triple the canonical
/// gallery URL is generated.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionIdentity {
    publisher: String,
    name: String,
    version: String,
    marketplace_url: String,
}

impl ExtensionIdentity {
    /// Build an identity from its triple, generating the canonical
    /// download URL.
    pub fn from_parts(
        publisher: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let publisher = publisher.into();
        let name = name.into();
        let version = version.into();
        let marketplace_url =
            format!("{GALLERY_BASE}/{publisher}/{VSEXTENSIONS_MARKER}{name}/{version}/{VSPACKAGE_TOKEN}");
        Self {
            publisher,
            name,
            version,
            marketplace_url,
        }
    }

    /// Parse a marketplace download URL.
    ///
    /// The URL must contain the gallery path marker, a publisher
    /// segment, the `vsextensions/` marker, name and version segments,
    /// and the `vspackage` token. The whitespace-trimmed original URL
    /// is stored as the canonical form.
    pub fn from_marketplace_url(link: &str) -> CatalogResult<Self> {
        let trimmed = link.trim();
        let invalid = || CatalogError::InvalidMarketplaceLink(trimmed.to_string());

        let start = trimmed.find(GALLERY_MARKER).ok_or_else(invalid)?;
        let rest = &trimmed[start + GALLERY_MARKER.len()..];

        let slash = rest.find('/').ok_or_else(invalid)?;
        let publisher = &rest[..slash];

        let marker = rest.find(VSEXTENSIONS_MARKER).ok_or_else(invalid)?;
        let rest = &rest[marker + VSEXTENSIONS_MARKER.len()..];

        let slash = rest.find('/').ok_or_else(invalid)?;
        let name = &rest[..slash];
        let rest = &rest[slash + 1..];

        let slash = rest.find('/').ok_or_else(invalid)?;
        let version = &rest[..slash];

        if !rest[slash..].contains(VSPACKAGE_TOKEN) {
            return Err(invalid());
        }
        if publisher.is_empty() || name.is_empty() || version.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            publisher: publisher.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            marketplace_url: trimmed.to_string(),
        })
    }

    /// Parse a `publisher.name@version` line as printed by the editor's
    /// `--list-extensions --show-versions` output.
    ///
    /// Publisher is everything before the first `.`, version everything
    /// after the last `@`, name the middle. A line missing either
    /// separator, or yielding an empty field, is rejected.
    pub fn from_listing_line(line: &str) -> CatalogResult<Self> {
        let trimmed = line.trim();
        let invalid = || CatalogError::InvalidListingLine(trimmed.to_string());

        let dot = trimmed.find('.').ok_or_else(invalid)?;
        let at = trimmed.rfind('@').ok_or_else(invalid)?;
        if at <= dot {
            return Err(invalid());
        }

        let publisher = &trimmed[..dot];
        let name = &trimmed[dot + 1..at];
        let version = &trimmed[at + 1..];
        if publisher.is_empty() || name.is_empty() || version.is_empty() {
            return Err(invalid());
        }

        Ok(Self::from_parts(publisher, name, version))
    }

    /// Parse a `publisher.name-version` filename stem (the `.vsix`
    /// extension already stripped by the caller).
    ///
    /// Publisher is everything before the first `.`, version everything
    /// after the last `-`, name the middle.
    pub fn from_filename_stem(stem: &str) -> CatalogResult<Self> {
        let invalid = || CatalogError::InvalidFilenameStem(stem.to_string());

        let dot = stem.find('.').ok_or_else(invalid)?;
        let dash = stem.rfind('-').ok_or_else(invalid)?;
        if dash <= dot {
            return Err(invalid());
        }

        let publisher = &stem[..dot];
        let name = &stem[dot + 1..dash];
        let version = &stem[dash + 1..];
        if publisher.is_empty() || name.is_empty() || version.is_empty() {
            return Err(invalid());
        }

        Ok(Self::from_parts(publisher, name, version))
    }

    /// Extension publisher
    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    /// Extension name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extension version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Download URL for this extension. Parsed identities keep the URL
    /// they were parsed from; constructed identities carry the
    /// generated canonical form.
    pub fn marketplace_url(&self) -> &str {
        &self.marketplace_url
    }

    /// Canonical package filename, `publisher.name-version.vsix`
    pub fn vsix_filename(&self) -> String {
        format!("{self}.{PACKAGE_EXT}")
    }
}

impl fmt::Display for ExtensionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}-{}", self.publisher, self.name, self.version)
    }
}

// Equality and hashing ignore the stored URL: identities obtained from
// different encodings must land in the same set bucket.
impl PartialEq for ExtensionIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.publisher == other.publisher
            && self.name == other.name
            && self.version == other.version
    }
}

impl Eq for ExtensionIdentity {}

impl Hash for ExtensionIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.publisher.hash(state);
        self.name.hash(state);
        self.version.hash(state);
    }
}
