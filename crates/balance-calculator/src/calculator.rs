use crate::error::{BalanceBlocksError, Result};
use crate::merge::merge_transfers;
use crate::transfer::{parse_quantity, MergedTransfer, Transfer};
use alloy_primitives::{I256, U256};

/// Running state of one wallet while its transfers are replayed
#[derive(Debug)]
struct Holding<'a> {
    wallet: &'a str,
    balance: I256,
    block: u64,
    balance_blocks: I256,
}

impl<'a> Holding<'a> {
    const fn new(wallet: &'a str, start_block: u64, start_balance: I256) -> Self {
        Self {
            wallet,
            balance: start_balance,
            block: start_block,
            balance_blocks: I256::ZERO,
        }
    }

    /// Book the current balance for every block up to `block`.
    fn hold_until(&mut self, block: u64) -> Result<()> {
        let period = blocks(block) - blocks(self.block);
        let part = self
            .balance
            .checked_mul(period)
            .ok_or(BalanceBlocksError::Overflow)?;

        self.balance_blocks = self
            .balance_blocks
            .checked_add(part)
            .ok_or(BalanceBlocksError::Overflow)?;
        self.block = block;

        Ok(())
    }

    fn apply(&mut self, tx: &MergedTransfer) -> Result<()> {
        if tx.to.eq_ignore_ascii_case(self.wallet) {
            return self.credit(tx.value);
        }

        if tx.from.eq_ignore_ascii_case(self.wallet) {
            let spent = tx
                .value
                .checked_add(tx.gas_cost)
                .ok_or(BalanceBlocksError::Overflow)?;

            return self.debit(spent);
        }

        Err(BalanceBlocksError::OwnershipViolation {
            from: tx.from.clone(),
            to: tx.to.clone(),
            block_number: tx.block_number,
        })
    }

    fn credit(&mut self, amount: I256) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BalanceBlocksError::Overflow)?;

        Ok(())
    }

    fn debit(&mut self, amount: I256) -> Result<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BalanceBlocksError::Overflow)?;

        Ok(())
    }
}

/// Widen a block number. Any `u64` fits in the positive half of `I256`.
fn blocks(block: u64) -> I256 {
    I256::from_raw(U256::from(block))
}

/// Time-weighted balance of `wallet` over `start_block..end_block`.
///
/// `start_balance` is the balance at `start_block` with every transfer at
/// that block already applied, so only transfers strictly inside the range
/// are accounted. Transfers at `end_block` belong to the next range.
///
/// `transfers` may be in any order and may repeat blocks; they are merged
/// before being replayed.
pub fn calculate_balance_blocks(
    wallet: &str,
    start_block: u64,
    end_block: u64,
    start_balance: &str,
    transfers: Option<&[Transfer]>,
) -> Result<I256> {
    let start_balance = parse_quantity("startBalance", start_balance)?;
    let merged = match transfers {
        Some(transfers) => merge_transfers(transfers)?,
        None => Vec::new(),
    };

    balance_blocks(wallet, start_block, end_block, start_balance, &merged)
}

/// Same as [`calculate_balance_blocks`] over already merged transfers.
///
/// Transfers are visited in the order given. The total equals
/// `start_balance * (end - start) + sum(delta * (end - block))`, which
/// does not depend on that order, so no sort is needed.
pub fn balance_blocks(
    wallet: &str,
    start_block: u64,
    end_block: u64,
    start_balance: I256,
    transfers: &[MergedTransfer],
) -> Result<I256> {
    if start_block >= end_block {
        return Err(BalanceBlocksError::InvalidRange {
            start: start_block,
            end: end_block,
        });
    }

    let mut holding = Holding::new(wallet, start_block, start_balance);

    for tx in transfers
        .iter()
        .filter(|tx| tx.block_number > start_block && tx.block_number < end_block)
        .filter(|tx| tx.is_material())
    {
        holding.hold_until(tx.block_number)?;
        holding.apply(tx)?;
    }

    holding.hold_until(end_block)?;

    Ok(holding.balance_blocks)
}

/// Balance of `wallet` once every transfer after `start_block` up to and
/// including `block` has been applied.
///
/// This is the start balance of the range that begins at `block`.
pub fn balance_at(
    wallet: &str,
    start_block: u64,
    block: u64,
    start_balance: I256,
    transfers: &[MergedTransfer],
) -> Result<I256> {
    if block < start_block {
        return Err(BalanceBlocksError::InvalidRange {
            start: start_block,
            end: block,
        });
    }

    let mut holding = Holding::new(wallet, start_block, start_balance);

    for tx in transfers
        .iter()
        .filter(|tx| tx.block_number > start_block && tx.block_number <= block)
        .filter(|tx| tx.is_material())
    {
        holding.apply(tx)?;
    }

    Ok(holding.balance)
}
