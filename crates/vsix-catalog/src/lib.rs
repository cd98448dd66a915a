//! vsix-catalog - Extension identity discovery
//!
//! This crate provides the identity model for marketplace extensions,
//! the three textual parsers that produce it, sources that enumerate
//! identities from a file, a directory, or the editor itself, and the
//! reconciliation between a wanted set and a present set.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub mod editor;
pub mod error;
pub mod identity;
pub mod reconcile;
pub mod sink;
pub mod source;

pub use editor::{CodeCli, CommandOutput, EditorCli};
pub use error::{CatalogError, CatalogResult};
pub use identity::ExtensionIdentity;
pub use reconcile::missing;
pub use sink::write_extensions_file;
pub use source::{DirSource, FileSource, InstalledSource, SourceReport};
