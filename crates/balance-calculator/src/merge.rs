//! Collapses transfers that share sender, recipient and block into one
//! net record.
//!
//! Grouping compares addresses byte for byte. Two spellings of the same
//! address land in different groups; the calculator still attributes
//! both to the wallet, and the integral is unaffected since it is linear
//! in the per-record deltas.

use crate::error::{BalanceBlocksError, Result};
use crate::transfer::{MergedTransfer, Transfer};
use std::collections::HashMap;

/// Parse and merge raw transfers, keeping first-seen order.
pub fn merge_transfers(transfers: &[Transfer]) -> Result<Vec<MergedTransfer>> {
    let parsed = transfers
        .iter()
        .map(MergedTransfer::try_from)
        .collect::<Result<Vec<_>>>()?;

    consolidate(parsed)
}

/// Sum `value` and `gas_cost` over every record sharing
/// `(from, to, block_number)`.
///
/// Consolidating an already consolidated set returns it unchanged.
pub fn consolidate(
    transfers: impl IntoIterator<Item = MergedTransfer>,
) -> Result<Vec<MergedTransfer>> {
    let mut merged: Vec<MergedTransfer> = Vec::new();
    let mut groups: HashMap<(String, String, u64), usize> = HashMap::new();

    for tx in transfers {
        let key = (tx.from.clone(), tx.to.clone(), tx.block_number);

        let Some(&index) = groups.get(&key) else {
            groups.insert(key, merged.len());
            merged.push(tx);

            continue;
        };

        let group = &mut merged[index];

        group.value = group
            .value
            .checked_add(tx.value)
            .ok_or(BalanceBlocksError::Overflow)?;
        group.gas_cost = group
            .gas_cost
            .checked_add(tx.gas_cost)
            .ok_or(BalanceBlocksError::Overflow)?;
    }

    Ok(merged)
}
