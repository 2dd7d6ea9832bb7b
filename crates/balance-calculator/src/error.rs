use thiserror::Error;

/// Failures that invalidate a balance-blocks calculation as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceBlocksError {
    #[error(
        "wallet must either be the recipient or originator of the transaction \
         (from {from}, to {to}, block {block_number})"
    )]
    OwnershipViolation {
        from: String,
        to: String,
        block_number: u64,
    },

    #[error("malformed {field} quantity: {value:?}")]
    MalformedQuantity { field: &'static str, value: String },

    #[error("start block {start} must precede end block {end}")]
    InvalidRange { start: u64, end: u64 },

    #[error("arithmetic overflow in balance-blocks computation")]
    Overflow,
}

pub type Result<T, E = BalanceBlocksError> = std::result::Result<T, E>;
