//! Sui transaction balance change extraction.
//!
//! Turns raw transaction records into consumer-facing balance changes and gas cost, and
//! reconstructs the balance changes of objects stored as dynamic fields inside a bag by
//! diffing their versions before and after the transaction.
//!
//! # Components
//!
//! - [`parse_transaction`]: balance changes and gas cost of a transaction record
//! - [`bag_dynamic_field_balance_changes`]: balance diffs of the objects owned by a bag
//! - [`actual_owner`]: canonical owner strings
//! - [`extract_coin_type`]: coin type from `Coin<T>` / `Balance<T>` instantiations
//! - [`extract_balance`]: balance of an object snapshot of unknown shape
//! - [`resolve_decimals`]: cached coin decimals lookup
//! - [`LedgerRpc`]: the RPC seam, implemented over HTTP by `txparse-jsonrpc`

pub mod bag;
pub mod balance_field;
pub mod client;
pub mod coin_type;
pub mod decimals;
pub mod error;
pub mod format;
pub mod owner;
pub mod parse;
pub mod rpc;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bag::bag_dynamic_field_balance_changes;
pub use balance_field::{extract_balance, extract_balance_from_fields};
pub use client::TxParseClient;
pub use coin_type::extract_coin_type;
pub use decimals::{resolve_decimals, DecimalsCache};
pub use error::{Error, Result};
pub use format::format_amount;
pub use owner::actual_owner;
pub use parse::{parse_transaction, parse_transaction_value};
pub use rpc::LedgerRpc;
pub use types::{
    BalanceChange, ChangedObject, CoinMetadata, DynamicFieldBalanceChange, GasCostSummary,
    ObjectChange, ObjectContent, ObjectSnapshot, Owner, ParseResult, RawBalanceChange,
    TransactionEffects, TransactionQueryOptions, TransactionRecord,
};
