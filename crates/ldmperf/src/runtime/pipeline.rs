//! Pipeline: wire extraction, aggregation, metrics and reporting together.
//!
//! Every input is fully consumed before the report file is created, so a
//! failed run never leaves a half-written report behind.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::aggregate::{read_metadata_file, Aggregator};
use crate::conf::AnalysisConfig;
use crate::error::Result;
use crate::extract::{ExtractStats, Extraction, LogExtractor};
use crate::metric::{cbr_rows, throughput_rows, CbrRow, ThroughputRow};
use crate::parser::{LineClassifier, LineKind};
use crate::report::write_report_file;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Rows written after the header
    pub rows: usize,
    pub stats: ExtractStats,
}

impl AnalysisConfig {
    /// Build an extractor over `kinds`, in the given order.
    pub fn extractor(&self, kinds: &[LineKind]) -> Result<LogExtractor> {
        let classifier =
            LineClassifier::from_profiles(kinds.iter().map(|&kind| (kind, self.parsers.get(kind))))?;
        Ok(LogExtractor::new(classifier, self.error_policy))
    }
}

/// Extract the receiver log and compute CBR rows without writing anything.
pub fn cbr_report(config: &AnalysisConfig, log_path: &Path) -> Result<(Vec<CbrRow>, ExtractStats)> {
    let Extraction { known, table, stats } =
        config.extractor(&AnalysisConfig::CBR_KINDS)?.extract_file(log_path)?;
    Ok((cbr_rows(&known, &table, &config.channel), stats))
}

/// Aggregate the metadata, extract the log and compute throughput rows
/// without writing anything.
pub fn throughput_report(
    config: &AnalysisConfig,
    metadata_path: &Path,
    log_path: &Path,
) -> Result<(Vec<ThroughputRow>, ExtractStats)> {
    let sizes = read_metadata_file(metadata_path)?;
    let groups = Aggregator::new(config.throughput.aggregate_bytes).aggregate(sizes);
    info!(
        groups = groups.len(),
        threshold = config.throughput.aggregate_bytes,
        "metadata aggregated"
    );

    let Extraction { known, table, stats } = config
        .extractor(&config.throughput.log_kinds)?
        .extract_file(log_path)?;
    Ok((throughput_rows(&groups, &known, &table), stats))
}

pub fn run_cbr(config: &AnalysisConfig, log_path: &Path, out_path: &Path) -> Result<RunSummary> {
    config.validate()?;
    let (rows, stats) = cbr_report(config, log_path)?;
    write_report_file(out_path, &rows)?;

    info!(path = %out_path.display(), rows = rows.len(), "CBR report written");
    Ok(RunSummary {
        rows: rows.len(),
        stats,
    })
}

pub fn run_throughput(
    config: &AnalysisConfig,
    metadata_path: &Path,
    log_path: &Path,
    out_path: &Path,
) -> Result<RunSummary> {
    config.validate()?;
    let (rows, stats) = throughput_report(config, metadata_path, log_path)?;
    write_report_file(out_path, &rows)?;

    info!(path = %out_path.display(), rows = rows.len(), "throughput report written");
    Ok(RunSummary {
        rows: rows.len(),
        stats,
    })
}
