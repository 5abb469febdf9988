mod args;
mod boot;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::args::{Cli, Command};

fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    boot::init_logging(cli.log_format);

    info!("Starting ldmperf v{}", env!("CARGO_PKG_VERSION"));
    let config = boot::load_config(&cli)?;

    let summary = match &cli.command {
        Command::Cbr { logfile, csvfile } => ldmperf::run_cbr(&config, logfile, csvfile)
            .with_context(|| format!("CBR analysis of {} failed", logfile.display()))?,

        Command::Throughput {
            metadata,
            logfile,
            csvfile,
            ..
        } => ldmperf::run_throughput(&config, metadata, logfile, csvfile)
            .with_context(|| format!("Throughput analysis of {} failed", logfile.display()))?,
    };

    if summary.stats.malformed_skipped > 0 {
        warn!(
            skipped = summary.stats.malformed_skipped,
            "malformed lines were skipped"
        );
    }
    info!(
        rows = summary.rows,
        lines = summary.stats.lines_scanned,
        matched = summary.stats.matched(),
        duplicates = summary.stats.duplicates,
        "done"
    );

    Ok(())
}
