//! Throughput: received bits per second of latency, per aggregate group.
//!
//! `complete_time` is the *sum of per-product receive latencies* of the
//! products received from a group, not the wall-clock span of the group.
//! Downstream consumers should read the result as "bytes per second of
//! summed latency".

use crate::aggregate::AggregateGroup;
use crate::extract::{CompletedTable, KnownIds, ProductId};

use super::Metric;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroughputRow {
    pub first_prodindex: usize,
    pub last_prodindex: usize,
    /// Sender-side aggregate size in bytes
    pub sent_size: u64,
    /// Bytes of this group found in the receiver's completion table
    pub complete_size: u64,
    /// Bits per second; undefined when no latency was accumulated
    pub throughput: Metric,
}

/// Throughput of one group against the receiver's tables.
///
/// Rows never received are simply left out of both sums.
pub fn calc_throughput(
    group: &AggregateGroup,
    known: &KnownIds,
    table: &CompletedTable,
) -> ThroughputRow {
    let mut complete_size: u64 = 0;
    let mut complete_time: f64 = 0.0;

    let received = group
        .rows()
        .iter()
        .map(|&row| row as ProductId)
        .filter(|id| known.contains(id))
        .filter_map(|id| table.get(id));

    for completion in received {
        complete_size += completion.size;
        complete_time += completion.elapsed_secs;
    }

    let throughput = if complete_time != 0.0 {
        Metric::Value(complete_size as f64 / complete_time * 8.0)
    } else {
        Metric::Undefined
    };

    ThroughputRow {
        first_prodindex: group.first_row(),
        last_prodindex: group.last_row(),
        sent_size: group.size(),
        complete_size,
        throughput,
    }
}

/// One row per group, in group order.
pub fn throughput_rows(
    groups: &[AggregateGroup],
    known: &KnownIds,
    table: &CompletedTable,
) -> Vec<ThroughputRow> {
    groups
        .iter()
        .map(|group| calc_throughput(group, known, table))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::extract::Completion;

    fn table_with(entries: &[(ProductId, u64, f64)]) -> CompletedTable {
        let mut table = CompletedTable::new();
        for &(id, size, elapsed_secs) in entries {
            table.insert_if_absent(id, Completion { size, elapsed_secs });
        }
        table
    }

    #[test]
    fn test_reference_groups() {
        let groups = Aggregator::new(200).aggregate([100, 150, 100]);
        let table = table_with(&[(0, 100, 0.5)]);
        let rows = throughput_rows(&groups, &table.ids(), &table);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            ThroughputRow {
                first_prodindex: 0,
                last_prodindex: 1,
                sent_size: 250,
                complete_size: 100,
                throughput: Metric::Value(1600.0),
            }
        );
        assert_eq!(
            rows[1],
            ThroughputRow {
                first_prodindex: 2,
                last_prodindex: 2,
                sent_size: 100,
                complete_size: 0,
                throughput: Metric::Undefined,
            }
        );
    }

    #[test]
    fn test_latencies_are_summed() {
        let groups = Aggregator::new(1_000).aggregate([400, 400, 400]);
        let table = table_with(&[(0, 400, 1.0), (1, 400, 3.0), (2, 400, 4.0)]);
        let row = calc_throughput(&groups[0], &table.ids(), &table);

        assert_eq!(row.complete_size, 1_200);
        // 1200 B over 8 s of summed latency
        assert_eq!(row.throughput, Metric::Value(1_200.0));
    }

    #[test]
    fn test_unknown_rows_excluded() {
        let groups = Aggregator::new(10).aggregate([4, 4, 4]);
        let table = table_with(&[(2, 4, 2.0), (7, 4, 2.0)]);
        let row = calc_throughput(&groups[0], &table.ids(), &table);

        assert_eq!(row.complete_size, 4);
        assert_eq!(row.throughput, Metric::Value(16.0));
    }

    #[test]
    fn test_latencies_cancelling_out_is_undefined() {
        let groups = Aggregator::new(10).aggregate([5, 5]);
        let table = table_with(&[(0, 5, 1.5), (1, 5, -1.5)]);
        let row = calc_throughput(&groups[0], &table.ids(), &table);

        assert_eq!(row.throughput, Metric::Undefined);
        assert_eq!(row.complete_size, 10);
    }
}
