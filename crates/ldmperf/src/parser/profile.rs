//! Profile: a line family described as data, a gate plus a column map.

use serde::{Deserialize, Serialize};

use super::columns::{ColumnMap, ColumnRef};
use super::traits::*;
use crate::filter::{FilterError, MarkerMatcher};

/// How a line is recognised as belonging to a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gate {
    /// Case-sensitive regex searched anywhere in the line
    Marker { pattern: String },
    /// The given column exists and is made only of ASCII digits
    NumericColumn { column: ColumnRef },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserProfile {
    pub gate: Gate,
    pub columns: ColumnMap,
}

enum CompiledGate {
    Marker(MarkerMatcher),
    NumericColumn(ColumnRef),
}

/// [`LineParser`] driven by a [`ParserProfile`].
pub struct ProfileParser {
    kind: LineKind,
    gate: CompiledGate,
    columns: ColumnMap,
}

impl ProfileParser {
    pub fn new(kind: LineKind, profile: &ParserProfile) -> Result<Self, FilterError> {
        let gate = match &profile.gate {
            Gate::Marker { pattern } => CompiledGate::Marker(MarkerMatcher::new(pattern)?),
            Gate::NumericColumn { column } => CompiledGate::NumericColumn(*column),
        };

        Ok(Self {
            kind,
            gate,
            columns: profile.columns,
        })
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }
}

impl LineParser for ProfileParser {
    fn parse(&self, line: &str) -> Result<Option<Record>, ParseError> {
        let columns: Vec<&str> = line.split_whitespace().collect();

        let admitted = match &self.gate {
            CompiledGate::Marker(marker) => marker.is_match(line),
            CompiledGate::NumericColumn(column) => column
                .resolve(columns.len())
                .map(|i| is_ascii_number(columns[i]))
                .unwrap_or(false),
        };

        if !admitted {
            return Ok(None);
        }

        self.columns.extract(&columns).map(Some)
    }

    fn kind(&self) -> LineKind {
        self.kind
    }
}

fn is_ascii_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
