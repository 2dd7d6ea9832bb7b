//! Time-weighted balance integrals ("balance-blocks") for a single wallet.
//!
//! Raw transfers are merged per `(from, to, block)` and replayed over a
//! half-open block range, summing `balance * blocks held` with exact
//! 256-bit integer arithmetic.

pub mod calculator;
pub mod error;
pub mod merge;
pub mod transfer;

pub use calculator::{balance_at, balance_blocks, calculate_balance_blocks};
pub use error::BalanceBlocksError;
pub use merge::{consolidate, merge_transfers};
pub use transfer::{BalanceBlocksReport, MergedTransfer, Transfer};
