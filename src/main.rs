use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use events2csv::{init_stores, init_tracing, run_job, JobParams};
use events2csv_config::RuntimeConfig;
use std::path::PathBuf;
use tracing::info;

/// Batch job writing hourly CSV summaries of JSON event files
#[derive(Parser)]
#[command(name = "events2csv")]
#[command(version)]
#[command(about = "Batch job writing hourly CSV summaries of JSON event files", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Only process files older than this many hours (overrides config)
    #[arg(short = 'l', long, value_name = "HOURS")]
    lookback_hours: Option<u64>,

    /// Prefix under which input files are listed (overrides config)
    #[arg(short = 'p', long, value_name = "PREFIX")]
    input_prefix: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'L', long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The job is strictly sequential; one thread is enough
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Step 1: Load base configuration
    let mut config = if let Some(config_path) = &cli.config {
        RuntimeConfig::load_from_path(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        RuntimeConfig::load().context("Failed to load configuration")?
    };

    // Step 2: Apply CLI overrides (highest priority)
    apply_cli_overrides(&mut config, &cli);

    init_tracing(&config.log);
    info!("Summary job started");
    info!(
        input_bucket = %config.input.bucket,
        input_prefix = %config.input.prefix,
        output_bucket = %config.output.bucket,
        lookback_hours = config.job.lookback_hours,
        backend = %config.storage.backend,
        "Configuration loaded"
    );

    // Step 3: Build stores and run
    let stores = init_stores(&config).context("Failed to initialize storage")?;
    let params = JobParams {
        input_prefix: config.input.prefix.clone(),
        lookback_hours: config.job.lookback_hours,
        now: Utc::now(),
    };

    let summary = run_job(&stores.input, &stores.output, &params)
        .await
        .context("Summary job failed")?;

    info!(
        files = summary.files_processed,
        events = summary.events_processed,
        aggregates = summary.aggregates,
        partitions = summary.partitions.len(),
        "Summary job completed successfully"
    );
    Ok(())
}

fn apply_cli_overrides(config: &mut RuntimeConfig, cli: &Cli) {
    if let Some(hours) = cli.lookback_hours {
        config.job.lookback_hours = hours;
    }

    if let Some(prefix) = &cli.input_prefix {
        config.input.prefix = prefix.clone();
    }

    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_uses_capital_l() {
        let cli = Cli::try_parse_from(["events2csv", "-L", "debug", "-l", "6"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.lookback_hours, Some(6));

        assert!(Cli::try_parse_from(["events2csv", "-v", "debug"]).is_err());
    }
}
