use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rolabel2yolor operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("source path {path} is not a directory")]
    SourceNotADirectory { path: PathBuf },

    #[error("output path {path} exists and is not a directory")]
    OutputNotADirectory { path: PathBuf },

    #[error("failed while scanning {path}: {message}")]
    SourceScan { path: PathBuf, message: String },

    #[error("failed to parse XML from {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    #[error("invalid annotation in {path}: {message}")]
    XmlSchema { path: PathBuf, message: String },

    #[error("unknown class '{class}' in {path}; recognized classes: {known:?}")]
    UnknownClass {
        path: PathBuf,
        class: String,
        known: &'static [&'static str],
    },

    #[error("failed to write labels to {path}: {message}")]
    LabelWrite { path: PathBuf, message: String },

    #[error("{failed} file(s) failed to convert")]
    FilesFailed { failed: usize },
}
