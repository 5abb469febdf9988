//! Model: AnalysisConfig and related structs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::{LineKind, ParserProfile};

/// 200 MiB, the sender-side aggregate window.
pub const DEFAULT_AGGREGATE_BYTES: u64 = 200 * 1024 * 1024;
pub const DEFAULT_RATE_BPS: f64 = 40_000_000.0;
pub const DEFAULT_RTT_SECS: f64 = 0.001;
pub const DEFAULT_DRAIN_ALLOWANCE_SECS: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub error_policy: ErrorPolicy,
    pub channel: ChannelConfig,
    pub throughput: ThroughputConfig,
    pub parsers: ParserProfiles,
}

/// What to do with a line that passed its family gate but could not be extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the run on the first malformed line
    #[default]
    FailFast,
    /// Log the line (path and line number) and keep going
    Skip,
}

impl ErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::FailFast => "fail_fast",
            ErrorPolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_fast" | "fail" => Ok(ErrorPolicy::FailFast),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(format!("unknown error policy: {other} (expected fail_fast or skip)")),
        }
    }
}

/// Channel model used by the CBR calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Virtual circuit rate in bits per second
    pub rate_bps: f64,
    /// Round-trip time; half of it is added to the ideal transfer time
    pub rtt_secs: f64,
    /// Extra time allowed for a half-full buffer to drain
    pub drain_allowance_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThroughputConfig {
    /// Cumulative sent size at which an aggregate group is closed
    pub aggregate_bytes: u64,
    /// Line families read from the log file, in priority order
    pub log_kinds: Vec<LineKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserProfiles {
    pub mldm: ParserProfile,
    pub backstop: ParserProfile,
    pub sent: ParserProfile,
}

impl ParserProfiles {
    pub fn get(&self, kind: LineKind) -> &ParserProfile {
        match kind {
            LineKind::Mldm => &self.mldm,
            LineKind::Backstop => &self.backstop,
            LineKind::Sent => &self.sent,
        }
    }
}

impl AnalysisConfig {
    /// Line families the CBR analysis reads, in priority order.
    pub const CBR_KINDS: [LineKind; 2] = [LineKind::Mldm, LineKind::Backstop];
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            channel: ChannelConfig::default(),
            throughput: ThroughputConfig::default(),
            parsers: ParserProfiles::default(),
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            rate_bps: DEFAULT_RATE_BPS,
            rtt_secs: DEFAULT_RTT_SECS,
            drain_allowance_secs: DEFAULT_DRAIN_ALLOWANCE_SECS,
        }
    }
}

impl Default for ThroughputConfig {
    fn default() -> Self {
        Self {
            aggregate_bytes: DEFAULT_AGGREGATE_BYTES,
            log_kinds: vec![LineKind::Sent],
        }
    }
}

impl Default for ParserProfiles {
    fn default() -> Self {
        Self {
            mldm: ParserProfile::mldm(),
            backstop: ParserProfile::backstop(),
            sent: ParserProfile::sent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ColumnRef;

    // ── Defaults ─────────────────────────────────────────────────

    #[test]
    fn test_channel_defaults() {
        let cfg = ChannelConfig::default();
        assert_eq!(cfg.rate_bps, 40_000_000.0);
        assert_eq!(cfg.rtt_secs, 0.001);
        assert_eq!(cfg.drain_allowance_secs, 60.0);
    }

    #[test]
    fn test_throughput_defaults() {
        let cfg = ThroughputConfig::default();
        assert_eq!(cfg.aggregate_bytes, 209_715_200);
        assert_eq!(cfg.log_kinds, vec![LineKind::Sent]);
    }

    #[test]
    fn test_error_policy_default_is_fail_fast() {
        assert_eq!(AnalysisConfig::default().error_policy, ErrorPolicy::FailFast);
    }

    #[test]
    fn test_error_policy_from_str() {
        assert_eq!("skip".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Skip));
        assert_eq!("fail-fast".parse::<ErrorPolicy>(), Ok(ErrorPolicy::FailFast));
        assert!("ignore".parse::<ErrorPolicy>().is_err());
    }

    // ── Serialization ────────────────────────────────────────────

    #[test]
    fn test_deserialize_partial_toml() {
        let toml_str = r#"
            error_policy = "skip"

            [channel]
            rtt_secs = 0.055
        "#;
        let cfg: AnalysisConfig = toml::from_str(toml_str).expect("Should accept partial TOML");
        assert_eq!(cfg.error_policy, ErrorPolicy::Skip);
        assert_eq!(cfg.channel.rtt_secs, 0.055);
        assert_eq!(cfg.channel.rate_bps, DEFAULT_RATE_BPS);
        assert_eq!(cfg.throughput.aggregate_bytes, DEFAULT_AGGREGATE_BYTES);
        assert_eq!(cfg.parsers, ParserProfiles::default());
    }

    #[test]
    fn test_deserialize_profile_override() {
        let toml_str = r#"
            [parsers.backstop]
            gate = { type = "marker", pattern = "down7.*Inserted" }
            columns = { identifier = "last", size = 5, arrival = 0, inserted = 7 }
        "#;
        let cfg: AnalysisConfig = toml::from_str(toml_str).expect("Should parse profile override");
        assert_eq!(cfg.parsers.backstop.columns.inserted, ColumnRef::Index(7));
        assert_eq!(cfg.parsers.mldm, ParserProfile::mldm());
    }

    #[test]
    fn test_deserialize_log_kinds() {
        let toml_str = r#"
            [throughput]
            log_kinds = ["mldm"]
        "#;
        let cfg: AnalysisConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.throughput.log_kinds, vec![LineKind::Mldm]);
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = AnalysisConfig::default();
        let toml_str = toml::to_string(&cfg).expect("Should serialize to TOML");
        let back: AnalysisConfig = toml::from_str(&toml_str).expect("Should deserialize from TOML");
        assert_eq!(back, cfg);
    }
}
