use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::columns::ColumnRef;

/// Log line families understood by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Receiver-side multicast receipt lines (`mldm ... Received`)
    Mldm,
    /// Downstream backstop insertion lines (`down7 ... Inserted`)
    Backstop,
    /// Sender-side LDM6 layout (no marker, numeric size column)
    Sent,
}

impl LineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Mldm => "mldm",
            LineKind::Backstop => "backstop",
            LineKind::Sent => "sent",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mldm" => Ok(LineKind::Mldm),
            "backstop" | "down7" => Ok(LineKind::Backstop),
            "sent" | "ldm6" => Ok(LineKind::Sent),
            other => Err(format!("unknown line kind: {other}")),
        }
    }
}

/// Record fields a column map can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Identifier,
    Size,
    Arrival,
    Inserted,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Identifier => "identifier",
            Field::Size => "size",
            Field::Arrival => "arrival time",
            Field::Inserted => "insertion time",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product observation extracted from a log line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Product index (last column). Negative values are never hits.
    pub identifier: i64,
    /// Product size in bytes
    pub size: u64,
    /// Arrival minus insertion time, in seconds. May be zero or negative.
    pub elapsed_secs: f64,
}

/// Failure to extract a record from a line that already passed its kind's gate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("missing {field} column {column} (line has {available} columns)")]
    MissingColumn {
        field: Field,
        column: ColumnRef,
        available: usize,
    },

    #[error("invalid {field} {value:?}: not an integer")]
    InvalidNumber { field: Field, value: String },

    #[error("invalid {field} {value:?}: unrecognized timestamp")]
    InvalidTimestamp { field: Field, value: String },
}

impl ParseError {
    pub fn field(&self) -> Field {
        match self {
            ParseError::MissingColumn { field, .. }
            | ParseError::InvalidNumber { field, .. }
            | ParseError::InvalidTimestamp { field, .. } => *field,
        }
    }
}
