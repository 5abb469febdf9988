// Delivery-performance analysis for LDM7 receiver logs.

// Core infrastructure
pub mod error;
pub mod filter;
pub mod parser;
pub mod conf;

// Analysis modules
pub mod extract;
pub mod aggregate;
pub mod metric;
pub mod report;
pub mod runtime;

pub use conf::{AnalysisConfig, ErrorPolicy};
pub use error::{Error, Result};
pub use runtime::{run_cbr, run_throughput, RunSummary};
