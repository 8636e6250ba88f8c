//! Display decimals lookup with a per-call cache.

use std::collections::HashMap;

use crate::rpc::LedgerRpc;

/// Coin type to decimals, scoped to a single bag diff call.
pub type DecimalsCache = HashMap<String, u8>;

/// Resolves the display decimals of `coin_type`.
///
/// Cached values are returned without an RPC call. Successful lookups are cached, a coin
/// without metadata or without a `decimals` field resolves to 0. A failed lookup also
/// resolves to 0 but is not cached, so the next lookup for the same type retries.
pub async fn resolve_decimals<R>(rpc: &R, coin_type: &str, cache: &mut DecimalsCache) -> u8
where
    R: LedgerRpc + ?Sized,
{
    if let Some(&decimals) = cache.get(coin_type) {
        tracing::trace!(
            target: "txparse::decimals",
            coin_type,
            decimals,
            "Decimals cache hit"
        );
        return decimals;
    }

    match rpc.coin_metadata(coin_type).await {
        Ok(metadata) => {
            let decimals = metadata.and_then(|m| m.decimals).unwrap_or(0);
            cache.insert(coin_type.to_string(), decimals);
            decimals
        }
        Err(e) => {
            tracing::warn!(
                target: "txparse::decimals",
                coin_type,
                error = %e,
                "Failed to fetch coin metadata, using 0 decimals"
            );
            0
        }
    }
}
