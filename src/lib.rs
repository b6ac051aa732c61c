//! rolabel2yolor: convert roLabelImg rotated-box annotations to yolor labels.
//!
//! Given a directory tree of roLabelImg-style XML files, this crate writes
//! one `.txt` label file per annotation file into an output directory: one
//! line per object, holding the five rotated box fields (`cx cy w h angle`,
//! copied verbatim from the XML) followed by the integer class index.
//!
//! # Modules
//!
//! - [`robnd_xml`]: annotation discovery, XML parsing, and conversion
//! - [`yolor`]: the label record type and label file writer
//! - [`classes`]: the fixed class-name-to-index table
//! - [`error`]: error types for conversion operations

pub mod classes;
pub mod error;
pub mod robnd_xml;
pub mod yolor;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

pub use error::ConvertError;

use robnd_xml::{collect_xml_files, read_robnd_xml, rel_string};
use yolor::write_labels;

/// The rolabel2yolor CLI application.
#[derive(Parser)]
#[command(name = "rolabel2yolor")]
#[command(version, about)]
struct Cli {
    /// Source directory, scanned recursively for .xml annotation files.
    src: PathBuf,

    /// Output directory for the .txt label files (created if absent).
    #[arg(short = 'o', long = "out", default_value = "out")]
    out: PathBuf,

    /// Report per-file failures and keep converting instead of stopping at
    /// the first one. The exit status is still non-zero if anything failed.
    #[arg(long)]
    keep_going: bool,
}

/// Run the rolabel2yolor CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ConvertError> {
    let cli = Cli::parse();
    convert_tree(&cli.src, &cli.out, cli.keep_going)
}

/// Convert every annotation file under `src` into a label file under `out`.
///
/// `src` must be an existing directory; `out` is created if absent but must
/// not already exist as a regular file. With `keep_going` false (the
/// default) the first failing file aborts the run; with it true, failures
/// are reported to stderr and the remaining files are still converted, with
/// a final [`ConvertError::FilesFailed`] carrying the failure count.
pub fn convert_tree(src: &Path, out: &Path, keep_going: bool) -> Result<(), ConvertError> {
    if !src.is_dir() {
        return Err(ConvertError::SourceNotADirectory {
            path: src.to_path_buf(),
        });
    }

    if out.is_file() {
        return Err(ConvertError::OutputNotADirectory {
            path: out.to_path_buf(),
        });
    }
    fs::create_dir_all(out).map_err(ConvertError::Io)?;

    let xml_files = collect_xml_files(src)?;

    let progress = ProgressBar::new(xml_files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .expect("static progress template")
        .progress_chars("#>-"),
    );

    let mut failed = 0usize;
    for xml_path in &xml_files {
        progress.set_message(rel_string(src, xml_path));

        let result = read_robnd_xml(xml_path)
            .and_then(|records| write_labels(out, xml_path, &records).map(|_| ()));

        match result {
            Ok(()) => {}
            Err(err) if keep_going => {
                failed += 1;
                progress.suspend(|| eprintln!("error: {err}"));
            }
            Err(err) => {
                progress.abandon();
                return Err(err);
            }
        }

        progress.inc(1);
    }

    progress.finish_with_message(format!("converted {} file(s)", xml_files.len() - failed));

    if failed > 0 {
        return Err(ConvertError::FilesFailed { failed });
    }
    Ok(())
}
