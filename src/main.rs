use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sheet_ingest::app::run;
use sheet_ingest::config::{Cli, IngestConfig};
use sheet_ingest::platform::timing::run_timed;

fn main() -> Result<()> {
    let config = IngestConfig::from_cli(Cli::parse())?;

    // RUST_LOG wins over --verbose.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = run_timed("sheet-ingest", || run(&config))?;

    match result.region {
        Some(region) => info!(
            sheet = %result.sheet_name,
            range = %region,
            records = result.record_count,
            output = %config.output.display(),
            "records saved"
        ),
        None => info!(
            sheet = %result.sheet_name,
            output = %config.output.display(),
            "sheet is empty, saved no records"
        ),
    }

    Ok(())
}
