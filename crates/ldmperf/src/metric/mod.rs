//! Metric calculation: CBR per product and throughput per aggregate group.

pub mod cbr;
pub mod throughput;

use std::fmt;

pub use cbr::{calc_cbr, cbr_rows, CbrRow};
pub use throughput::{calc_throughput, throughput_rows, ThroughputRow};

/// A derived ratio that may be undefined (zero denominator, missing product).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    Undefined,
}

impl Metric {
    /// Reported value used in output and comparisons; undefined is `-1`.
    pub const UNDEFINED_SENTINEL: f64 = -1.0;

    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(v),
            Metric::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Metric::Value(_))
    }

    pub fn reported(self) -> f64 {
        self.value().unwrap_or(Self::UNDEFINED_SENTINEL)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => f.write_str(&format_float(*v)),
            Metric::Undefined => f.write_str("-1"),
        }
    }
}

/// Shortest round-trip rendering, keeping a `.0` on integral values.
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
