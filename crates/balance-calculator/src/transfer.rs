use crate::error::{BalanceBlocksError, Result};
use alloy_primitives::I256;
use serde::{Deserialize, Serialize};

/// Raw transfer record as delivered by a ledger export.
///
/// Quantities stay as decimal strings until they are merged, so a bad
/// field is reported with its original text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub value: String,
    pub block_number: u64,
    #[serde(default)]
    pub gas_used: Option<String>,
    #[serde(default)]
    pub gas_price: Option<String>,
}

impl Transfer {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        value: impl Into<String>,
        block_number: u64,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            value: value.into(),
            block_number,
            gas_used: None,
            gas_price: None,
        }
    }

    pub fn with_gas(mut self, gas_used: impl Into<String>, gas_price: impl Into<String>) -> Self {
        self.gas_used = Some(gas_used.into());
        self.gas_price = Some(gas_price.into());
        self
    }

    /// Execution cost of the transfer, `gasUsed * gasPrice`.
    ///
    /// A missing field on either side means the transfer cost nothing.
    pub fn gas_cost(&self) -> Result<I256> {
        let (Some(used), Some(price)) = (&self.gas_used, &self.gas_price) else {
            return Ok(I256::ZERO);
        };

        let used = parse_quantity("gasUsed", used)?;
        let price = parse_quantity("gasPrice", price)?;

        used.checked_mul(price).ok_or(BalanceBlocksError::Overflow)
    }
}

/// Net effect of every transfer sharing one `(from, to, blockNumber)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTransfer {
    pub from: String,
    pub to: String,
    pub block_number: u64,
    pub value: I256,
    pub gas_cost: I256,
}

impl MergedTransfer {
    /// Records with a negative value, or with neither value nor cost,
    /// leave the balance untouched and are not accounted.
    pub fn is_material(&self) -> bool {
        !self.value.is_negative() && !(self.value.is_zero() && self.gas_cost.is_zero())
    }
}

impl TryFrom<&Transfer> for MergedTransfer {
    type Error = BalanceBlocksError;

    fn try_from(transfer: &Transfer) -> Result<Self> {
        Ok(Self {
            from: transfer.from.clone(),
            to: transfer.to.clone(),
            block_number: transfer.block_number,
            value: parse_quantity("value", &transfer.value)?,
            gas_cost: transfer.gas_cost()?,
        })
    }
}

/// Parse an exact decimal integer: an optional sign followed by at least
/// one ASCII digit. Surrounding whitespace is ignored, anything else is
/// rejected.
pub fn parse_quantity(field: &'static str, text: &str) -> Result<I256> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(field, text));
    }

    I256::from_dec_str(trimmed).map_err(|_| malformed(field, text))
}

fn malformed(field: &'static str, text: &str) -> BalanceBlocksError {
    BalanceBlocksError::MalformedQuantity {
        field,
        value: text.to_owned(),
    }
}

/// Output row for a finished calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceBlocksReport {
    pub wallet: String,
    pub start_block: u64,
    pub end_block: u64,
    pub balance_blocks: String,
}

impl BalanceBlocksReport {
    pub fn new(wallet: &str, start_block: u64, end_block: u64, balance_blocks: I256) -> Self {
        Self {
            wallet: wallet.to_owned(),
            start_block,
            end_block,
            balance_blocks: balance_blocks.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> I256 {
        I256::try_from(n).unwrap()
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("value", "20").unwrap(), int(20));
        assert_eq!(parse_quantity("value", " 7 ").unwrap(), int(7));
        assert_eq!(parse_quantity("value", "-5").unwrap(), int(-5));
        assert_eq!(parse_quantity("value", "+5").unwrap(), int(5));
        assert_eq!(
            parse_quantity("value", "50673986450000000000").unwrap().to_string(),
            "50673986450000000000"
        );
    }

    #[test]
    fn test_parse_quantity_rejects_garbage() {
        for text in [
            "", "  ", "12a", "1.5", "ten", "-", "+", "_", "-_", "1_000", "--5", "+-5", "- 5",
        ] {
            let err = parse_quantity("value", text).unwrap_err();
            assert_eq!(
                err,
                BalanceBlocksError::MalformedQuantity {
                    field: "value",
                    value: text.to_owned(),
                }
            );
        }
    }

    #[test]
    fn test_gas_cost() {
        let tx = Transfer::new("0xB", "0xA", "100", 10).with_gas("2", "5");
        assert_eq!(tx.gas_cost().unwrap(), int(10));
    }

    #[test]
    fn test_absent_gas_is_free() {
        let mut tx = Transfer::new("0xB", "0xA", "100", 10);
        assert_eq!(tx.gas_cost().unwrap(), I256::ZERO);

        // only one side present still costs nothing
        tx.gas_price = Some("5".to_owned());
        assert_eq!(tx.gas_cost().unwrap(), I256::ZERO);
    }

    #[test]
    fn test_malformed_gas_is_rejected() {
        let tx = Transfer::new("0xB", "0xA", "100", 10).with_gas("two", "5");
        assert!(matches!(
            tx.gas_cost(),
            Err(BalanceBlocksError::MalformedQuantity { field: "gasUsed", .. })
        ));
    }

    #[test]
    fn test_materiality() {
        let base = MergedTransfer {
            from: "0xA".to_owned(),
            to: "0xB".to_owned(),
            block_number: 5,
            value: I256::ZERO,
            gas_cost: I256::ZERO,
        };
        assert!(!base.is_material());

        let gas_only = MergedTransfer {
            gas_cost: int(10),
            ..base.clone()
        };
        assert!(gas_only.is_material());

        let negative = MergedTransfer {
            value: int(-5),
            gas_cost: int(10),
            ..base.clone()
        };
        assert!(!negative.is_material());

        let positive = MergedTransfer { value: int(1), ..base };
        assert!(positive.is_material());
    }
}
