mod config;

use anyhow::{Context, Result};
use balance_calculator::{calculate_balance_blocks, BalanceBlocksReport, Transfer};
use clap::Parser;
use config::{CliConfig, Config};
use std::io;
use std::path::Path;
use tracing::{debug, info};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CliConfig::parse();

    report_balance_blocks(&config)?;

    info!("Calculation completed successfully");

    Ok(())
}

fn report_balance_blocks<C: Config>(config: &C) -> Result<()> {
    let transfers = match config.input_path() {
        Some(path) => Some(read_transfers(path)?),
        None => {
            debug!("No input file given, balance is constant over the range");
            None
        }
    };

    let balance_blocks = calculate_balance_blocks(
        config.wallet(),
        config.start_block(),
        config.end_block(),
        config.start_balance(),
        transfers.as_deref(),
    )
    .with_context(|| {
        format!(
            "Failed to calculate balance-blocks for {} over {}..{}",
            config.wallet(),
            config.start_block(),
            config.end_block()
        )
    })?;

    info!(
        "Balance-blocks for {} over {}..{}: {balance_blocks}",
        config.wallet(),
        config.start_block(),
        config.end_block()
    );

    let stdout = io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new().from_writer(handle);

    let report = BalanceBlocksReport::new(
        config.wallet(),
        config.start_block(),
        config.end_block(),
        balance_blocks,
    );
    writer
        .serialize(&report)
        .context("Failed to serialize report")?;

    writer.flush().context("Failed to flush stdout")?;

    Ok(())
}

/// Every row must parse: a partial transfer set gives a wrong integral.
fn read_transfers(path: &Path) -> Result<Vec<Transfer>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("Failed to open input file")?;

    let mut transfers = Vec::new();

    for (row, result) in reader.deserialize().enumerate() {
        let transfer: Transfer =
            result.with_context(|| format!("Failed to parse transfer on row {}", row + 1))?;
        transfers.push(transfer);
    }

    info!("Read {} transfers from {}", transfers.len(), path.display());

    Ok(transfers)
}
