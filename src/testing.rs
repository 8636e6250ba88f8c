//! In-memory [`LedgerRpc`] for tests.
//!
//! Anything not registered is reported as an RPC error, which lets tests exercise the
//! failure paths without extra setup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::rpc::LedgerRpc;
use crate::types::{
    CoinMetadata, ObjectContent, ObjectSnapshot, TransactionQueryOptions, TransactionRecord,
};

#[derive(Default)]
pub struct StubRpc {
    transactions: HashMap<String, TransactionRecord>,
    objects: HashMap<(String, String), ObjectSnapshot>,
    metadata: HashMap<String, Option<CoinMetadata>>,
    transaction_calls: AtomicUsize,
    object_calls: AtomicUsize,
    metadata_calls: AtomicUsize,
}

impl StubRpc {
    pub fn with_transaction(mut self, digest: &str, record: TransactionRecord) -> Self {
        self.transactions.insert(digest.to_string(), record);
        self
    }

    /// Registers a transaction from its JSON-RPC representation.
    pub fn with_transaction_json(self, digest: &str, record: Value) -> Self {
        let record = serde_json::from_value(record).expect("transaction fixture is valid");
        self.with_transaction(digest, record)
    }

    pub fn with_object(mut self, object_id: &str, version: &str, snapshot: ObjectSnapshot) -> Self {
        self.objects
            .insert((object_id.to_string(), version.to_string()), snapshot);
        self
    }

    /// Registers a found Move object with the given type and fields.
    pub fn with_move_object(
        self,
        object_id: &str,
        version: &str,
        object_type: &str,
        fields: Value,
    ) -> Self {
        let snapshot = ObjectSnapshot::Found {
            object_id: object_id.to_string(),
            version: version.to_string(),
            content: Some(ObjectContent {
                data_type: ObjectContent::MOVE_OBJECT.to_string(),
                object_type: Some(object_type.to_string()),
                fields: Some(fields),
            }),
        };
        self.with_object(object_id, version, snapshot)
    }

    pub fn with_metadata(self, coin_type: &str, decimals: Option<u8>) -> Self {
        self.with_coin_metadata(
            coin_type,
            Some(CoinMetadata {
                decimals,
                ..CoinMetadata::default()
            }),
        )
    }

    pub fn with_coin_metadata(mut self, coin_type: &str, metadata: Option<CoinMetadata>) -> Self {
        self.metadata.insert(coin_type.to_string(), metadata);
        self
    }

    pub fn transaction_calls(&self) -> usize {
        self.transaction_calls.load(Ordering::SeqCst)
    }

    pub fn object_calls(&self) -> usize {
        self.object_calls.load(Ordering::SeqCst)
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerRpc for StubRpc {
    async fn transaction(
        &self,
        digest: &str,
        _options: &TransactionQueryOptions,
    ) -> Result<TransactionRecord> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        self.transactions
            .get(digest)
            .cloned()
            .ok_or_else(|| anyhow!("transaction {digest} not found"))
    }

    async fn past_object(&self, object_id: &str, version: &str) -> Result<ObjectSnapshot> {
        self.object_calls.fetch_add(1, Ordering::SeqCst);
        self.objects
            .get(&(object_id.to_string(), version.to_string()))
            .cloned()
            .ok_or_else(|| anyhow!("object {object_id} at version {version} unavailable"))
    }

    async fn coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMetadata>> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.metadata
            .get(coin_type)
            .cloned()
            .ok_or_else(|| anyhow!("metadata lookup for {coin_type} failed"))
    }
}
