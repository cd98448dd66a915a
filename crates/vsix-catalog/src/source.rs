//! Sources producing extension identities
//!
//! Three independent strategies: the extensions file of marketplace
//! URLs, the editor's installed-extensions listing, and a directory of
//! already-downloaded packages. Each skips individual lines or entries
//! that fail to parse; only setup problems (missing file, missing
//! directory) are hard errors.

use crate::editor::EditorCli;
use crate::error::{CatalogError, CatalogResult};
use crate::identity::{ExtensionIdentity, PACKAGE_EXT};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Identities produced by a source, plus how many entries were
/// discarded as unparseable
#[derive(Debug, Default)]
pub struct SourceReport {
    /// Successfully parsed identities, in source order
    pub extensions: Vec<ExtensionIdentity>,
    /// Number of entries skipped because they failed to parse
    pub skipped: usize,
}

impl SourceReport {
    fn push(&mut self, parsed: CatalogResult<ExtensionIdentity>, context: &str) {
        match parsed {
            Ok(ext) => self.extensions.push(ext),
            Err(err) => {
                warn!("skipping {context}: {err}");
                self.skipped += 1;
            }
        }
    }
}

/// Reads marketplace URLs from the extensions file, one per line
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source over the given extensions file
    ///
    /// # Errors
    /// Fails fast when the file does not exist.
    pub fn new(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(CatalogError::MissingFile(path));
        }
        Ok(Self { path })
    }

    /// Read and parse the file. Blank lines are ignored; lines that are
    /// not valid marketplace links are logged and skipped.
    pub fn load(&self) -> CatalogResult<SourceReport> {
        let content = fs::read_to_string(&self.path)?;
        let context = format!("line in {}", self.path.display());
        let mut report = SourceReport::default();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            report.push(ExtensionIdentity::from_marketplace_url(line), &context);
        }
        Ok(report)
    }
}

/// Queries the editor for its currently installed extensions
#[derive(Debug)]
pub struct InstalledSource<E> {
    editor: E,
}

impl<E: EditorCli> InstalledSource<E> {
    /// Create a source backed by the given editor CLI
    pub fn new(editor: E) -> Self {
        Self { editor }
    }

    /// List installed extensions with versions. A non-zero editor exit
    /// yields an empty report (logged), not an error.
    pub fn load(&self) -> CatalogResult<SourceReport> {
        let output = self.editor.list_installed()?;
        let mut report = SourceReport::default();
        if !output.success {
            warn!("editor listing command exited non-zero, treating as no extensions");
            return Ok(report);
        }
        for line in output.stdout.lines() {
            if line.trim().is_empty() {
                continue;
            }
            report.push(ExtensionIdentity::from_listing_line(line), "listing entry");
        }
        Ok(report)
    }
}

/// Scans a directory for downloaded `.vsix` package files
#[derive(Debug)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    /// Create a source over the given download directory
    ///
    /// # Errors
    /// Fails fast when the directory does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> CatalogResult<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CatalogError::MissingDir(dir));
        }
        Ok(Self { dir })
    }

    /// The directory this source scans
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse identities out of every `*.vsix` filename in the
    /// directory. Other entries are ignored; stems that do not parse
    /// are logged and skipped.
    pub fn load(&self) -> CatalogResult<SourceReport> {
        let suffix = format!(".{PACKAGE_EXT}");
        let context = format!("package file in {}", self.dir.display());
        let mut report = SourceReport::default();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            let Some(stem) = name.strip_suffix(&suffix) else {
                continue;
            };
            report.push(ExtensionIdentity::from_filename_stem(stem), &context);
        }
        Ok(report)
    }
}
