//! Columns: declarative field-to-column maps for whitespace-split log lines.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{Field, ParseError, Record};
use super::timestamp::{elapsed_secs, parse_arrival, parse_insertion};

/// Column anchors that are not fixed indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Last,
}

/// A column position: a zero-based index or the `last` anchor.
///
/// In TOML this is written as an integer (`size = 6`) or the string `"last"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Anchor(Anchor),
}

impl ColumnRef {
    pub const LAST: ColumnRef = ColumnRef::Anchor(Anchor::Last);

    /// Resolve to a concrete index for a line with `len` columns.
    pub fn resolve(&self, len: usize) -> Option<usize> {
        match self {
            ColumnRef::Index(i) if *i < len => Some(*i),
            ColumnRef::Index(_) => None,
            ColumnRef::Anchor(Anchor::Last) => len.checked_sub(1),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "{i}"),
            ColumnRef::Anchor(Anchor::Last) => f.write_str("last"),
        }
    }
}

/// Where each record field lives in a line family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub identifier: ColumnRef,
    pub size: ColumnRef,
    pub arrival: ColumnRef,
    pub inserted: ColumnRef,
}

impl ColumnMap {
    pub fn get(&self, field: Field) -> ColumnRef {
        match field {
            Field::Identifier => self.identifier,
            Field::Size => self.size,
            Field::Arrival => self.arrival,
            Field::Inserted => self.inserted,
        }
    }

    /// Look up the raw text of `field` in an already split line.
    pub fn column<'a>(&self, field: Field, columns: &[&'a str]) -> Result<&'a str, ParseError> {
        let column = self.get(field);
        column
            .resolve(columns.len())
            .map(|i| columns[i])
            .ok_or(ParseError::MissingColumn {
                field,
                column,
                available: columns.len(),
            })
    }

    /// Extract a full record. Any missing or unparsable column is an error.
    pub fn extract(&self, columns: &[&str]) -> Result<Record, ParseError> {
        let identifier = self.number::<i64>(Field::Identifier, columns)?;
        let size = self.number::<u64>(Field::Size, columns)?;

        let raw_arrival = self.column(Field::Arrival, columns)?;
        let arrival = parse_arrival(raw_arrival).ok_or_else(|| ParseError::InvalidTimestamp {
            field: Field::Arrival,
            value: raw_arrival.to_string(),
        })?;

        let raw_inserted = self.column(Field::Inserted, columns)?;
        let inserted =
            parse_insertion(raw_inserted).ok_or_else(|| ParseError::InvalidTimestamp {
                field: Field::Inserted,
                value: raw_inserted.to_string(),
            })?;

        Ok(Record {
            identifier,
            size,
            elapsed_secs: elapsed_secs(arrival, inserted),
        })
    }

    fn number<T: std::str::FromStr>(&self, field: Field, columns: &[&str]) -> Result<T, ParseError> {
        let raw = self.column(field, columns)?;
        raw.parse::<T>().map_err(|_| ParseError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
    }
}
