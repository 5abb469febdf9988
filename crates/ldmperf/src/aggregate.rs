//! Aggregate: partition sender-side products into size-bounded groups.
//!
//! The metadata file lists one product per row in send order, with the size in
//! bytes as the first space-delimited field. Rows are accumulated until the
//! running size reaches the threshold; a trailing partial group is kept only
//! when it has content.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Contiguous run of metadata rows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateGroup {
    rows: Vec<usize>,
    size: u64,
}

impl AggregateGroup {
    /// Row indices in file order
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Accumulated sent size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn first_row(&self) -> usize {
        self.rows[0]
    }

    pub fn last_row(&self) -> usize {
        self.rows[self.rows.len() - 1]
    }
}

pub struct Aggregator {
    threshold: u64,
}

impl Aggregator {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Group row sizes in order. The threshold is only checked between rows,
    /// so a single row is never split across groups.
    pub fn aggregate<I>(&self, sizes: I) -> Vec<AggregateGroup>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut groups = Vec::new();
        let mut rows = Vec::new();
        let mut sum: u64 = 0;

        for (index, size) in sizes.into_iter().enumerate() {
            rows.push(index);
            sum = sum.saturating_add(size);
            if sum >= self.threshold {
                groups.push(AggregateGroup {
                    rows: std::mem::take(&mut rows),
                    size: sum,
                });
                sum = 0;
            }
        }

        if !rows.is_empty() && sum > 0 {
            groups.push(AggregateGroup { rows, size: sum });
        } else if !rows.is_empty() {
            debug!(rows = rows.len(), "dropping trailing zero-size partial group");
        }

        groups
    }
}

/// Read per-product sizes from a metadata file.
pub fn read_metadata_file(path: &Path) -> Result<Vec<u64>> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_metadata(BufReader::new(file), path)
}

/// Read per-product sizes, one row per product. Blank lines are skipped and
/// do not consume a row index; any other row must start with an integer.
pub fn read_metadata<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<u64>> {
    let mut sizes = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::Read {
            path: origin.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let field = line.split_whitespace().next().unwrap_or_default();
        let size = field.parse::<u64>().map_err(|_| Error::MalformedMetadata {
            path: origin.to_path_buf(),
            line: index + 1,
            reason: format!("size {:?} is not a non-negative integer", field),
        })?;
        sizes.push(size);
    }

    info!(path = %origin.display(), products = sizes.len(), "metadata loaded");
    Ok(sizes)
}
