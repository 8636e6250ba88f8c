//! Entry points combining an RPC implementation with the parsers.

use crate::bag::bag_dynamic_field_balance_changes;
use crate::error::Result;
use crate::parse::parse_transaction;
use crate::rpc::LedgerRpc;
use crate::types::{DynamicFieldBalanceChange, ParseResult, TransactionQueryOptions};

/// Parses transactions fetched through `R`.
///
/// # Example
///
/// ```rust,ignore
/// use txparse::TxParseClient;
/// use txparse_jsonrpc::JsonRpcLedgerClient;
///
/// let client = TxParseClient::new(JsonRpcLedgerClient::from_url("https://fullnode.mainnet.sui.io:443")?);
/// let parsed = client.parse_transaction("J5BzQREx52w3t75bFSZAy3uRpGne543vx251ZDf6LKmR").await?;
/// ```
#[derive(Debug, Clone)]
pub struct TxParseClient<R> {
    rpc: R,
}

impl<R: LedgerRpc> TxParseClient<R> {
    pub fn new(rpc: R) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Fetches `digest` and returns its balance changes and gas cost.
    pub async fn parse_transaction(&self, digest: &str) -> Result<ParseResult> {
        let record = self
            .rpc
            .transaction(digest, &TransactionQueryOptions::for_balance_parse())
            .await?;
        parse_transaction(&record)
    }

    /// Balance changes of the objects held by `bag_id` in transaction `digest`.
    pub async fn bag_dynamic_field_balance_changes(
        &self,
        digest: &str,
        bag_id: &str,
    ) -> Result<Vec<DynamicFieldBalanceChange>> {
        bag_dynamic_field_balance_changes(&self.rpc, digest, bag_id).await
    }
}
