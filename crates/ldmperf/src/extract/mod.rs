//! Log extraction: one pass over a log file into a deduplicated completion table.
//!
//! Lines are classified in file order. Every hit adds its identifier to the
//! known set; only the first hit per identifier is stored in the table.

pub mod stats;
pub mod table;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, trace, warn};

pub use stats::ExtractStats;
pub use table::{CompletedTable, Completion, KnownIds, ProductId};

use crate::conf::ErrorPolicy;
use crate::error::{Error, Result};
use crate::parser::{Classification, LineClassifier};

/// Output of one extraction pass.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub known: KnownIds,
    pub table: CompletedTable,
    pub stats: ExtractStats,
}

pub struct LogExtractor {
    classifier: LineClassifier,
    policy: ErrorPolicy,
}

impl LogExtractor {
    pub fn new(classifier: LineClassifier, policy: ErrorPolicy) -> Self {
        Self { classifier, policy }
    }

    /// Extract from a file on disk. The handle is released before returning.
    pub fn extract_file(&self, path: &Path) -> Result<Extraction> {
        let file = File::open(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.extract(BufReader::new(file), path)
    }

    /// Extract from any buffered reader. `origin` is used in diagnostics.
    ///
    /// Invalid UTF-8 bytes are replaced rather than rejected.
    pub fn extract<R: BufRead>(&self, mut reader: R, origin: &Path) -> Result<Extraction> {
        let mut extraction = Extraction::default();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(|source| Error::Read {
                path: origin.to_path_buf(),
                source,
            })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let line = String::from_utf8_lossy(&buf);
            self.ingest(&line, line_no, origin, &mut extraction)?;
        }

        let stats = &extraction.stats;
        info!(
            path = %origin.display(),
            lines = stats.lines_scanned,
            matched = stats.matched(),
            products = extraction.table.len(),
            duplicates = stats.duplicates,
            malformed_skipped = stats.malformed_skipped,
            "log extraction complete"
        );

        Ok(extraction)
    }

    fn ingest(
        &self,
        line: &str,
        line_no: usize,
        origin: &Path,
        extraction: &mut Extraction,
    ) -> Result<()> {
        extraction.stats.record_line();

        match self.classifier.classify(line) {
            Classification::NoMatch => Ok(()),

            Classification::Malformed { kind, error } => match self.policy {
                ErrorPolicy::FailFast => Err(Error::MalformedLine {
                    path: origin.to_path_buf(),
                    line: line_no,
                    kind,
                    source: error,
                }),
                ErrorPolicy::Skip => {
                    warn!(
                        path = %origin.display(),
                        line = line_no,
                        kind = kind.as_str(),
                        "skipping malformed line: {}",
                        error
                    );
                    extraction.stats.malformed_skipped += 1;
                    Ok(())
                }
            },

            Classification::Matched { kind, record } => {
                let Ok(id) = ProductId::try_from(record.identifier) else {
                    debug!(
                        line = line_no,
                        identifier = record.identifier,
                        "ignoring negative product index"
                    );
                    extraction.stats.negative_ids += 1;
                    return Ok(());
                };

                extraction.stats.record_match(kind);
                extraction.known.insert(id);

                let completion = Completion {
                    size: record.size,
                    elapsed_secs: record.elapsed_secs,
                };
                if !extraction.table.insert_if_absent(id, completion) {
                    trace!(line = line_no, prodindex = id, "duplicate product, keeping first");
                    extraction.stats.duplicates += 1;
                }
                Ok(())
            }
        }
    }
}
