use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ldmperf::parser::LineKind;
use ldmperf::{AnalysisConfig, ErrorPolicy};

/// Delivery-performance reports for LDM7 logs.
#[derive(Debug, Parser)]
#[command(name = "ldmperf", version, about)]
pub struct Cli {
    /// TOML config file (defaults to LDMPERF_CONFIG_FILE or /etc/ldmperf/ldmperf.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(value_enum, long, global = true, env = "LDMPERF_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Multicast sending rate in bits per second
    #[arg(long, global = true)]
    pub rate_bps: Option<f64>,

    /// Round-trip time in seconds
    #[arg(long, global = true)]
    pub rtt_secs: Option<f64>,

    /// Half-full buffer drain allowance in seconds
    #[arg(long, global = true)]
    pub drain_secs: Option<f64>,

    /// What to do with a line that matches a marker but cannot be parsed (fail_fast, skip)
    #[arg(long, global = true)]
    pub error_policy: Option<ErrorPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Per-product CBR report from a receiver log
    Cbr {
        logfile: PathBuf,
        csvfile: PathBuf,
    },

    /// Per-aggregate throughput report from sender metadata and a log
    Throughput {
        metadata: PathBuf,
        logfile: PathBuf,
        csvfile: PathBuf,

        /// Aggregate size threshold in bytes
        #[arg(long)]
        aggregate_bytes: Option<u64>,

        /// Line kinds to extract, in priority order (mldm, backstop, sent)
        #[arg(long, value_delimiter = ',')]
        log_kinds: Vec<LineKind>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Cli {
    /// Overlay command-line flags on a loaded config. Flags win over
    /// environment variables and the config file.
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(rate) = self.rate_bps {
            config.channel.rate_bps = rate;
        }
        if let Some(rtt) = self.rtt_secs {
            config.channel.rtt_secs = rtt;
        }
        if let Some(drain) = self.drain_secs {
            config.channel.drain_allowance_secs = drain;
        }
        if let Some(policy) = self.error_policy {
            config.error_policy = policy;
        }

        if let Command::Throughput {
            aggregate_bytes,
            log_kinds,
            ..
        } = &self.command
        {
            if let Some(bytes) = aggregate_bytes {
                config.throughput.aggregate_bytes = *bytes;
            }
            if !log_kinds.is_empty() {
                config.throughput.log_kinds = log_kinds.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cbr() {
        let cli = Cli::try_parse_from(["ldmperf", "cbr", "ldmd.log", "cbr.csv"]).unwrap();
        match cli.command {
            Command::Cbr { logfile, csvfile } => {
                assert_eq!(logfile, PathBuf::from("ldmd.log"));
                assert_eq!(csvfile, PathBuf::from("cbr.csv"));
            }
            other => panic!("expected cbr, got {:?}", other),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_throughput_with_overrides() {
        let cli = Cli::try_parse_from([
            "ldmperf",
            "throughput",
            "meta.txt",
            "ldmd.log",
            "out.csv",
            "--aggregate-bytes",
            "200",
            "--log-kinds",
            "mldm,backstop",
            "--error-policy",
            "skip",
        ])
        .unwrap();

        let mut config = AnalysisConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.throughput.aggregate_bytes, 200);
        assert_eq!(
            config.throughput.log_kinds,
            vec![LineKind::Mldm, LineKind::Backstop]
        );
        assert_eq!(config.error_policy, ErrorPolicy::Skip);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ldmperf", "cbr", "a.log", "b.csv", "--rate-bps", "20000000", "--rtt-secs", "0.05",
        ])
        .unwrap();

        let mut config = AnalysisConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.channel.rate_bps, 20_000_000.0);
        assert_eq!(config.channel.rtt_secs, 0.05);
        assert_eq!(config.throughput.log_kinds, vec![LineKind::Sent]);
    }

    #[test]
    fn test_unset_flags_leave_config_alone() {
        let cli = Cli::try_parse_from(["ldmperf", "cbr", "a.log", "b.csv"]).unwrap();
        let mut config = AnalysisConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let result = Cli::try_parse_from([
            "ldmperf", "throughput", "m", "l", "o", "--log-kinds", "syslog",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_positional() {
        assert!(Cli::try_parse_from(["ldmperf", "cbr", "only.log"]).is_err());
    }
}
