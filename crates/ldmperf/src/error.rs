use std::path::PathBuf;

use thiserror::Error;

use crate::conf::ConfigError;
use crate::filter::FilterError;
use crate::parser::{LineKind, ParseError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: malformed {kind} line: {source}", .path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        kind: LineKind,
        #[source]
        source: ParseError,
    },

    #[error("{}:{line}: malformed metadata row: {reason}", .path.display())]
    MalformedMetadata {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

pub type Result<T> = std::result::Result<T, Error>;
