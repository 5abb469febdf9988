use serde::Serialize;

use crate::parser::LineKind;

/// Per-run extraction counters.
///
/// Counts are plain integers: an extraction is a single sequential pass
/// owned by one extractor call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub lines_scanned: u64,
    pub mldm_matched: u64,
    pub backstop_matched: u64,
    pub sent_matched: u64,
    /// Hits for an identifier that was already in the table
    pub duplicates: u64,
    /// Malformed lines skipped under the `skip` policy
    pub malformed_skipped: u64,
    /// Hits whose identifier was negative
    pub negative_ids: u64,
}

impl ExtractStats {
    #[inline]
    pub fn record_line(&mut self) {
        self.lines_scanned += 1;
    }

    #[inline]
    pub fn record_match(&mut self, kind: LineKind) {
        match kind {
            LineKind::Mldm => self.mldm_matched += 1,
            LineKind::Backstop => self.backstop_matched += 1,
            LineKind::Sent => self.sent_matched += 1,
        }
    }

    pub fn matched(&self) -> u64 {
        self.mldm_matched + self.backstop_matched + self.sent_matched
    }
}
