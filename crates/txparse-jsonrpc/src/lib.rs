//! Sui JSON-RPC implementation of [`LedgerRpc`].
//!
//! Uses `sui_getTransactionBlock`, `sui_tryGetPastObject` and `suix_getCoinMetadata`
//! over HTTP. Transport failures are retried according to the configured
//! [`RetryPolicy`]; errors reported by the node are returned as is.

pub mod config;
pub mod error;
pub mod retry;
mod wire;

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, trace};
use txparse::{
    CoinMetadata, LedgerRpc, ObjectSnapshot, TransactionQueryOptions, TransactionRecord,
};
use url::Url;

pub use config::{JsonRpcClientConfig, Network};
pub use error::JsonRpcError;
pub use retry::RetryPolicy;

use wire::{PastObjectResponse, RpcResponse};

pub struct JsonRpcLedgerClient {
    rpc_url: Url,
    http: Client,
    retry: RetryPolicy,
    next_id: AtomicU64,
}

impl JsonRpcLedgerClient {
    pub fn new(config: JsonRpcClientConfig) -> Result<Self, JsonRpcError> {
        let rpc_url = Url::parse(&config.rpc_url)?;
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            rpc_url,
            http,
            retry: config.retry_policy(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Client with default settings for `rpc_url`.
    pub fn from_url(rpc_url: impl Into<String>) -> Result<Self, JsonRpcError> {
        Self::new(JsonRpcClientConfig::new(rpc_url))
    }

    /// Uses an existing HTTP client (shared connection pool, custom TLS, ...).
    pub fn with_http_client(
        rpc_url: impl Into<String>,
        http: Client,
        retry: RetryPolicy,
    ) -> Result<Self, JsonRpcError> {
        Ok(Self {
            rpc_url: Url::parse(&rpc_url.into())?,
            http,
            retry,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Performs a JSON-RPC call and returns its `result`, `None` when the node returned
    /// `null`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, JsonRpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        trace!(target: "txparse_jsonrpc", method, id, "sending request");

        let (http, url, payload) = (&self.http, &self.rpc_url, &payload);
        let response: RpcResponse<T> = self
            .retry
            .execute(
                || async move {
                    let response = http
                        .post(url.clone())
                        .json(payload)
                        .send()
                        .await?
                        .error_for_status()?;
                    Ok::<_, JsonRpcError>(response.json::<RpcResponse<T>>().await?)
                },
                JsonRpcError::is_transient,
            )
            .await?;

        if let Some(error) = response.error {
            debug!(
                target: "txparse_jsonrpc",
                method,
                code = error.code,
                message = %error.message,
                "rpc returned an error"
            );
            return Err(JsonRpcError::Rpc {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        Ok(response.result)
    }

    async fn call_required<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, JsonRpcError> {
        self.call(method, params)
            .await?
            .ok_or(JsonRpcError::MissingResult)
    }

    pub async fn get_transaction_block(
        &self,
        digest: &str,
        options: &TransactionQueryOptions,
    ) -> Result<TransactionRecord, JsonRpcError> {
        self.call_required(
            "sui_getTransactionBlock",
            json!([
                digest,
                {
                    "showBalanceChanges": options.show_balance_changes,
                    "showEffects": options.show_effects,
                    "showEvents": options.show_events,
                    "showObjectChanges": options.show_object_changes,
                },
            ]),
        )
        .await
    }

    pub async fn try_get_past_object(
        &self,
        object_id: &str,
        version: &str,
    ) -> Result<ObjectSnapshot, JsonRpcError> {
        let version_number: u64 = version
            .parse()
            .map_err(|_| JsonRpcError::InvalidVersion(version.to_string()))?;

        let response: PastObjectResponse = self
            .call_required(
                "sui_tryGetPastObject",
                json!([
                    object_id,
                    version_number,
                    { "showContent": true, "showType": true },
                ]),
            )
            .await?;

        Ok(response.into_snapshot()?)
    }

    pub async fn get_coin_metadata(
        &self,
        coin_type: &str,
    ) -> Result<Option<CoinMetadata>, JsonRpcError> {
        self.call("suix_getCoinMetadata", json!([coin_type])).await
    }
}

#[async_trait]
impl LedgerRpc for JsonRpcLedgerClient {
    async fn transaction(
        &self,
        digest: &str,
        options: &TransactionQueryOptions,
    ) -> Result<TransactionRecord> {
        Ok(self.get_transaction_block(digest, options).await?)
    }

    async fn past_object(&self, object_id: &str, version: &str) -> Result<ObjectSnapshot> {
        Ok(self.try_get_past_object(object_id, version).await?)
    }

    async fn coin_metadata(&self, coin_type: &str) -> Result<Option<CoinMetadata>> {
        Ok(self.get_coin_metadata(coin_type).await?)
    }
}
