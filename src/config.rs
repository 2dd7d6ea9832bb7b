use clap::Parser;
use std::path::{Path, PathBuf};

/// Trait for reading configuration parameters
pub trait Config {
    fn wallet(&self) -> &str;
    fn start_block(&self) -> u64;
    fn end_block(&self) -> u64;
    fn start_balance(&self) -> &str;
    fn input_path(&self) -> Option<&Path>;
}

/// CLI configuration
#[derive(Parser, Debug)]
#[command(
    name = "balance-blocks",
    about = "Computes the time-weighted balance of a wallet over a block range",
    version
)]
pub struct CliConfig {
    /// Wallet address to account for
    #[arg(long)]
    wallet: String,

    /// First block of the range; its transfers are already in the start balance
    #[arg(long)]
    start_block: u64,

    /// Block ending the range (exclusive)
    #[arg(long)]
    end_block: u64,

    /// Wallet balance at the start block, as a decimal integer
    #[arg(long, default_value = "0")]
    start_balance: String,

    /// CSV file of transfers (from,to,value,blockNumber,gasUsed,gasPrice)
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,
}

impl Config for CliConfig {
    fn wallet(&self) -> &str {
        &self.wallet
    }

    fn start_block(&self) -> u64 {
        self.start_block
    }

    fn end_block(&self) -> u64 {
        self.end_block
    }

    fn start_balance(&self) -> &str {
        &self.start_balance
    }

    fn input_path(&self) -> Option<&Path> {
        self.input_file.as_deref()
    }
}
