//! Installing downloaded packages through the editor CLI

use serde::Serialize;
use std::path::Path;
use tracing::{error, info};
use vsix_catalog::{EditorCli, ExtensionIdentity};

/// Counts from one install batch
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct InstallSummary {
    /// Packages the editor accepted
    pub installed: usize,
    /// Packages the editor rejected or that could not be invoked
    pub failed: usize,
}

/// Install every package file in turn via the editor CLI. A failing
/// install is logged and counted; the batch always completes.
pub fn install_all<E: EditorCli>(
    editor: &E,
    dir: &Path,
    extensions: &[ExtensionIdentity],
) -> InstallSummary {
    let mut summary = InstallSummary::default();
    for ext in extensions {
        let package = dir.join(ext.vsix_filename());
        info!("installing {}", package.display());
        match editor.install(&package) {
            Ok(output) if output.success => summary.installed += 1,
            Ok(_) => {
                error!("error on installing extension: {ext}");
                summary.failed += 1;
            }
            Err(err) => {
                error!("could not invoke editor for {ext}: {err}");
                summary.failed += 1;
            }
        }
    }
    summary
}
