use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of a serialization run.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("Invalid root directory '{path}': {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Failed to write output to {target}: {source}")]
    OutputWrite {
        target: String,
        #[source]
        source: io::Error,
    },
}

/// Why a file's contents were replaced by a placeholder.
#[derive(Debug, Error)]
pub enum UnreadableFile {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("binary content")]
    Binary,

    #[error("not valid UTF-8 text")]
    NotUtf8,
}

/// An ignore file that contributes no rules.
#[derive(Debug, Error)]
pub enum IgnoreFileError {
    #[error("Failed to read ignore file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid pattern '{pattern}' in {path:?}: {source}")]
    Pattern {
        path: PathBuf,
        pattern: String,
        #[source]
        source: ignore::Error,
    },
}
