//! Runtime: end-to-end analysis runs (inputs in, report out).

pub mod pipeline;

pub use pipeline::{cbr_report, run_cbr, run_throughput, throughput_report, RunSummary};
