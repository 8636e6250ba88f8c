//! Abstraction over the ledger RPC service.

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{CoinMetadata, ObjectSnapshot, TransactionQueryOptions, TransactionRecord};

/// Read access to transactions, historical object versions and coin metadata.
///
/// Timeouts, retries and pagination are the implementation's concern; callers treat
/// every error as final.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Fetch a transaction, including only the sections selected in `options`.
    async fn transaction(
        &self,
        digest: &str,
        options: &TransactionQueryOptions,
    ) -> Result<TransactionRecord>;

    /// Fetch an object as it was at `version`.
    async fn past_object(&self, object_id: &str, version: &str) -> Result<ObjectSnapshot>;

    /// Fetch the metadata registered for `coin_type`, `None` if there is none.
    async fn coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMetadata>>;
}

#[async_trait]
impl<T: LedgerRpc + ?Sized> LedgerRpc for std::sync::Arc<T> {
    async fn transaction(
        &self,
        digest: &str,
        options: &TransactionQueryOptions,
    ) -> Result<TransactionRecord> {
        (**self).transaction(digest, options).await
    }

    async fn past_object(&self, object_id: &str, version: &str) -> Result<ObjectSnapshot> {
        (**self).past_object(object_id, version).await
    }

    async fn coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMetadata>> {
        (**self).coin_metadata(coin_type).await
    }
}
