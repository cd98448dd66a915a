//! vsix-sync CLI - keep a local set of editor extensions in sync
//!
//! Three modes, combinable in one invocation: download missing
//! packages from the marketplace (`-d`), install downloaded packages
//! through the editor (`-i`), and snapshot the currently installed
//! extensions into the extensions file (`-w`).

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vsix_catalog::{
    missing, write_extensions_file, CodeCli, DirSource, FileSource, InstalledSource,
};
use vsix_fetch::{install_all, DownloadOutcome, Downloader, SyncReport};

#[derive(Parser)]
#[command(name = "vsix-sync")]
#[command(about = "Downloads and installs editor extensions from the marketplace")]
#[command(version)]
struct Cli {
    /// Download the extensions from the extensions file, if not done yet
    #[arg(short, long)]
    download: bool,

    /// Install the extensions from the download dir
    #[arg(short, long)]
    install: bool,

    /// Write an extensions file of the currently installed extensions
    #[arg(short = 'w', long)]
    write_extensions_file: bool,

    /// Download directory
    #[arg(long, default_value = "./download")]
    download_dir: PathBuf,

    /// Name of the file of marketplace links (used for reading and storing)
    #[arg(long, default_value = "my-extensions.txt")]
    extensions_file: PathBuf,

    /// Editor executable used for listing and installing extensions
    #[arg(long, default_value = "code")]
    editor: String,

    /// Network timeout in seconds for marketplace downloads
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Print the download report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !(cli.download || cli.install || cli.write_extensions_file) {
        Cli::command()
            .print_help()
            .expect("failed to print help text");
        std::process::exit(2);
    }

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    if cli.download {
        run_download(cli).await?;
    }
    if cli.install {
        run_install(cli)?;
    }
    if cli.write_extensions_file {
        run_snapshot(cli)?;
    }
    Ok(())
}

/// Download every wanted extension that is not already on disk
async fn run_download(cli: &Cli) -> Result<()> {
    ensure_download_dir(cli)?;

    let wanted = FileSource::new(&cli.extensions_file)?
        .load()
        .with_context(|| format!("failed to read {}", cli.extensions_file.display()))?;
    let present = DirSource::new(&cli.download_dir)?
        .load()
        .with_context(|| format!("failed to scan {}", cli.download_dir.display()))?;

    let to_fetch = missing(&wanted.extensions, &present.extensions);

    let downloader =
        Downloader::with_timeout(&cli.download_dir, Duration::from_secs(cli.timeout_secs))?;
    let items = downloader.download_all(&to_fetch).await;

    let report = SyncReport {
        wanted: wanted.extensions.len(),
        present: present.extensions.len(),
        skipped_lines: wanted.skipped,
        items,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.items.is_empty() {
        println!("Nothing to download - all wanted extensions are present.");
    } else {
        println!(
            "Downloaded {} of {} missing extension(s).",
            report.downloaded(),
            report.items.len()
        );
        for item in report.items.iter().filter(|i| !i.outcome.is_downloaded()) {
            println!("  {}: {}", item.extension, describe(&item.outcome));
        }
    }
    if report.skipped_lines > 0 {
        println!(
            "Skipped {} unparseable line(s) in {}.",
            report.skipped_lines,
            cli.extensions_file.display()
        );
    }
    Ok(())
}

/// Install every package currently in the download directory
fn run_install(cli: &Cli) -> Result<()> {
    ensure_download_dir(cli)?;

    let source = DirSource::new(&cli.download_dir)?;
    let packages = source
        .load()
        .with_context(|| format!("failed to scan {}", cli.download_dir.display()))?;

    let editor = CodeCli::new(cli.editor.as_str());
    let summary = install_all(&editor, source.dir(), &packages.extensions);

    println!(
        "Installed {} extension(s), {} failed.",
        summary.installed, summary.failed
    );
    Ok(())
}

/// Snapshot the installed extensions into the extensions file
fn run_snapshot(cli: &Cli) -> Result<()> {
    let installed = InstalledSource::new(CodeCli::new(cli.editor.as_str()))
        .load()
        .context("failed to list installed extensions")?;

    write_extensions_file(&cli.extensions_file, &installed.extensions)
        .with_context(|| format!("failed to write {}", cli.extensions_file.display()))?;

    println!(
        "Extensions file written as: {}",
        cli.extensions_file.display()
    );
    Ok(())
}

fn ensure_download_dir(cli: &Cli) -> Result<()> {
    std::fs::create_dir_all(&cli.download_dir).with_context(|| {
        format!(
            "error on creating the directory: {}",
            cli.download_dir.display()
        )
    })
}

fn describe(outcome: &DownloadOutcome) -> String {
    match outcome {
        DownloadOutcome::Downloaded => "downloaded".to_string(),
        DownloadOutcome::SkippedContentType => "response was not a vsix package".to_string(),
        DownloadOutcome::FilenameMismatch(fetched) => {
            format!("marketplace returned a different package ({fetched})")
        }
        DownloadOutcome::MissingDisposition => {
            "response carried no filename, download dropped".to_string()
        }
        DownloadOutcome::RateLimited(Some(when)) => {
            format!("rate limited, try again after {when}")
        }
        DownloadOutcome::RateLimited(None) => "rate limited, try again later".to_string(),
        DownloadOutcome::HttpError(status) => format!("http status {status}"),
        DownloadOutcome::RequestFailed(err) | DownloadOutcome::WriteFailed(err) => err.clone(),
    }
}
