//! Boot: logging init and config resolution.

use anyhow::{Context, Result};
use ldmperf::AnalysisConfig;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::args::{Cli, LogFormat};

/// Initialise the tracing / logging subsystem. Logs go to stderr so they
/// never mix with report output.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ldmperf=info,ldmperf_cli=info"));

    match format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
}

/// Resolve the effective config.
/// Priority: CLI flags > Environment Variables > Config File > Defaults
pub fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config =
        AnalysisConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Configuration validation failed")?;

    info!(
        rate_bps = config.channel.rate_bps,
        rtt_secs = config.channel.rtt_secs,
        drain_allowance_secs = config.channel.drain_allowance_secs,
        error_policy = %config.error_policy,
        "configuration loaded"
    );
    Ok(config)
}
