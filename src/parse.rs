//! Balance change and gas cost extraction from a transaction record.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::owner::actual_owner;
use crate::types::{BalanceChange, ParseResult, TransactionRecord};

/// Flattens the transaction's balance changes and gas cost.
///
/// Entries keep their source order and are never merged. An unrecognized owner becomes
/// an empty string. Fails with [`Error::MissingGasInfo`] when the effects carry no gas
/// usage.
pub fn parse_transaction(record: &TransactionRecord) -> Result<ParseResult> {
    let gas_cost = record
        .effects
        .as_ref()
        .and_then(|effects| effects.gas_used.clone())
        .ok_or(Error::MissingGasInfo)?;

    let balance_changes = record
        .balance_changes
        .iter()
        .flatten()
        .map(|change| BalanceChange {
            coin_type: change.coin_type.clone(),
            amount: change.amount.clone(),
            owner: actual_owner(change.owner.as_ref()).unwrap_or_default(),
        })
        .collect();

    Ok(ParseResult {
        balance_changes,
        gas_cost,
    })
}

/// Same as [`parse_transaction`] for a raw JSON transaction response.
pub fn parse_transaction_value(value: &Value) -> Result<ParseResult> {
    let record: TransactionRecord = serde_json::from_value(value.clone())?;
    parse_transaction(&record)
}
