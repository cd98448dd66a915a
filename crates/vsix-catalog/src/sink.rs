//! Writing an extensions file back out

use crate::error::CatalogResult;
use crate::identity::ExtensionIdentity;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write identities as an extensions file, one marketplace URL per
/// line, overwriting any existing file.
///
/// The write is not atomic: a failure partway through leaves a
/// partially written file behind.
pub fn write_extensions_file(path: &Path, extensions: &[ExtensionIdentity]) -> CatalogResult<()> {
    let mut file = fs::File::create(path)?;
    for ext in extensions {
        writeln!(file, "{}", ext.marketplace_url())?;
    }
    Ok(())
}
