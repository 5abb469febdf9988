//! CBR: ratio of ideal to observed delivery time per product.

use crate::conf::ChannelConfig;
use crate::extract::{CompletedTable, KnownIds, ProductId};

use super::Metric;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CbrRow {
    pub prodindex: ProductId,
    pub cbr: Metric,
    pub half_full_cbr: Metric,
}

impl CbrRow {
    /// `cbr < half_full_cbr` on reported values, so two undefined values are
    /// not half-full.
    pub fn is_half_full(&self) -> bool {
        self.cbr.reported() < self.half_full_cbr.reported()
    }
}

impl ChannelConfig {
    /// `size / rate + rtt / 2`
    pub fn ideal_time(&self, size: u64) -> f64 {
        size as f64 / self.rate_bps + 0.5 * self.rtt_secs
    }

    /// Ideal time plus the half-full buffer drain allowance.
    pub fn half_full_time(&self, size: u64) -> f64 {
        self.ideal_time(size) + self.drain_allowance_secs
    }
}

/// CBR and half-full CBR, in percent, for one product.
///
/// Both are undefined when the product is missing, or when the ideal or
/// observed time is zero.
pub fn calc_cbr(prodindex: ProductId, table: &CompletedTable, channel: &ChannelConfig) -> CbrRow {
    let undefined = CbrRow {
        prodindex,
        cbr: Metric::Undefined,
        half_full_cbr: Metric::Undefined,
    };

    let Some(completion) = table.get(prodindex) else {
        return undefined;
    };

    let ideal = channel.ideal_time(completion.size);
    let observed = completion.elapsed_secs;
    if ideal == 0.0 || observed == 0.0 {
        return undefined;
    }

    CbrRow {
        prodindex,
        cbr: Metric::Value(ideal / observed * 100.0),
        half_full_cbr: Metric::Value(ideal / channel.half_full_time(completion.size) * 100.0),
    }
}

/// One row per known product, ascending by product index.
pub fn cbr_rows(known: &KnownIds, table: &CompletedTable, channel: &ChannelConfig) -> Vec<CbrRow> {
    known
        .iter()
        .map(|&id| calc_cbr(id, table, channel))
        .collect()
}
