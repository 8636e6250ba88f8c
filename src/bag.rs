//! Balance diffs of objects stored inside a bag.
//!
//! Every object owned by the bag that a transaction created or mutated is fetched at its
//! new version and, when mutated, at its previous version. The balance held by each
//! version is extracted and the signed difference reported together with the coin type
//! and its display decimals.

use crate::balance_field::extract_balance;
use crate::coin_type::extract_coin_type;
use crate::decimals::{resolve_decimals, DecimalsCache};
use crate::error::Result;
use crate::format::parse_integer;
use crate::rpc::LedgerRpc;
use crate::types::{ChangedObject, DynamicFieldBalanceChange, TransactionQueryOptions};

/// Reconstructs balance changes of the objects owned by `bag_id` in transaction
/// `tx_digest`.
///
/// Only the initial transaction fetch can fail the call. Objects whose snapshots cannot
/// be fetched, carry no recognizable balance or hold non-integer values are logged and
/// skipped. Objects are processed one at a time in source order.
pub async fn bag_dynamic_field_balance_changes<R>(
    rpc: &R,
    tx_digest: &str,
    bag_id: &str,
) -> Result<Vec<DynamicFieldBalanceChange>>
where
    R: LedgerRpc + ?Sized,
{
    let record = rpc
        .transaction(tx_digest, &TransactionQueryOptions::for_object_changes())
        .await?;

    let Some(object_changes) = record.object_changes else {
        tracing::debug!(
            target: "txparse::bag",
            tx_digest,
            "Transaction has no object changes"
        );
        return Ok(Vec::new());
    };

    let candidates: Vec<ChangedObject<'_>> = object_changes
        .iter()
        .filter_map(|change| change.as_changed_object())
        .filter(|object| object.owner.and_then(|owner| owner.container_id()) == Some(bag_id))
        .collect();

    tracing::debug!(
        target: "txparse::bag",
        tx_digest,
        bag_id,
        object_changes = object_changes.len(),
        candidates = candidates.len(),
        "Filtered bag owned objects"
    );

    let mut cache = DecimalsCache::new();
    let mut balance_changes = Vec::with_capacity(candidates.len());

    for object in &candidates {
        if let Some(change) = process_object(rpc, object, &mut cache).await {
            balance_changes.push(change);
        }
    }

    Ok(balance_changes)
}

/// Computes the change of a single bag entry, `None` when it has to be skipped.
async fn process_object<R>(
    rpc: &R,
    object: &ChangedObject<'_>,
    cache: &mut DecimalsCache,
) -> Option<DynamicFieldBalanceChange>
where
    R: LedgerRpc + ?Sized,
{
    let current = match rpc.past_object(object.object_id, object.version).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(
                target: "txparse::bag",
                object_id = object.object_id,
                version = object.version,
                error = %e,
                "Failed to fetch current object version, skipping"
            );
            return None;
        }
    };

    let Some(current_raw) = extract_balance(&current) else {
        tracing::debug!(
            target: "txparse::bag",
            object_id = object.object_id,
            version = object.version,
            "No balance field in current version, skipping"
        );
        return None;
    };

    let previous_raw = match object.previous_version {
        Some(previous_version) => match rpc.past_object(object.object_id, previous_version).await {
            Ok(snapshot) => extract_balance(&snapshot).unwrap_or_else(|| {
                tracing::debug!(
                    target: "txparse::bag",
                    object_id = object.object_id,
                    version = previous_version,
                    "No balance field in previous version, using 0"
                );
                "0".to_string()
            }),
            Err(e) => {
                tracing::warn!(
                    target: "txparse::bag",
                    object_id = object.object_id,
                    version = previous_version,
                    error = %e,
                    "Failed to fetch previous object version, skipping"
                );
                return None;
            }
        },
        None => "0".to_string(),
    };

    let parsed = (parse_integer(&previous_raw), parse_integer(&current_raw));
    let (previous, current_value) = match parsed {
        (Some(previous), Some(current)) => (previous, current),
        (previous, current) => {
            tracing::warn!(
                target: "txparse::bag",
                object_id = object.object_id,
                previous = %previous_raw,
                current = %current_raw,
                previous_ok = previous.is_some(),
                current_ok = current.is_some(),
                "Balance is not an integer, skipping"
            );
            return None;
        }
    };
    let diff = &current_value - &previous;

    let object_type = current
        .object_type()
        .or(object.object_type)
        .unwrap_or_default();
    let coin_type = extract_coin_type(object_type);
    let decimals = if coin_type.is_empty() {
        0
    } else {
        resolve_decimals(rpc, &coin_type, cache).await
    };

    tracing::trace!(
        target: "txparse::bag",
        object_id = object.object_id,
        coin_type = %coin_type,
        diff = %diff,
        "Computed bag entry balance change"
    );

    Some(DynamicFieldBalanceChange {
        coin_type,
        previous_value: previous.to_string(),
        current_value: current_value.to_string(),
        value_diff: diff.to_string(),
        decimals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubRpc;
    use crate::types::{ObjectContent, ObjectSnapshot};
    use serde_json::{json, Value};

    const BAG: &str = "0xbag";
    const SUI_BALANCE: &str = "0x2::balance::Balance<0x2::sui::SUI>";

    fn tx(object_changes: Value) -> Value {
        json!({ "digest": "0xtx", "objectChanges": object_changes })
    }

    #[tokio::test]
    async fn test_mutated_direct_balance() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([{
                    "type": "mutated",
                    "objectId": "0xa",
                    "version": "11",
                    "previousVersion": "10",
                    "owner": { "ObjectOwner": BAG }
                }])),
            )
            .with_move_object("0xa", "10", SUI_BALANCE, json!({ "balance": "800" }))
            .with_move_object("0xa", "11", SUI_BALANCE, json!({ "balance": "1000" }))
            .with_metadata("0x2::sui::SUI", Some(9));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(
            changes,
            vec![DynamicFieldBalanceChange {
                coin_type: "0x2::sui::SUI".to_string(),
                previous_value: "800".to_string(),
                current_value: "1000".to_string(),
                value_diff: "200".to_string(),
                decimals: 9,
            }]
        );
    }

    #[tokio::test]
    async fn test_created_value_of_value() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([{
                    "type": "created",
                    "objectId": "0xb",
                    "version": "4",
                    "owner": { "ObjectOwner": BAG }
                }])),
            )
            .with_move_object(
                "0xb",
                "4",
                "0x2::dynamic_field::Field<0x1::type_name::TypeName, 0x2::balance::Balance<0xc::usdc::USDC>>",
                json!({ "value": { "value": "500" } }),
            )
            .with_metadata("0xc::usdc::USDC", Some(6));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].coin_type, "0xc::usdc::USDC");
        assert_eq!(changes[0].previous_value, "0");
        assert_eq!(changes[0].current_value, "500");
        assert_eq!(changes[0].value_diff, "500");
        assert_eq!(changes[0].decimals, 6);
        // Created objects have no previous version to fetch.
        assert_eq!(rpc.object_calls(), 1);
    }

    #[tokio::test]
    async fn test_only_objects_of_the_bag_are_considered() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([
                    {
                        "type": "mutated",
                        "objectId": "0xaddr",
                        "version": "2",
                        "previousVersion": "1",
                        "owner": { "AddressOwner": BAG }
                    },
                    {
                        "type": "created",
                        "objectId": "0xother",
                        "version": "2",
                        "owner": { "ObjectOwner": "0xotherbag" }
                    },
                    { "type": "deleted", "objectId": "0xgone", "version": "2" },
                    {
                        "type": "created",
                        "objectId": "0xmine",
                        "version": "2",
                        "owner": { "ObjectOwner": BAG }
                    }
                ])),
            )
            .with_move_object("0xaddr", "1", SUI_BALANCE, json!({ "balance": "1" }))
            .with_move_object("0xaddr", "2", SUI_BALANCE, json!({ "balance": "5" }))
            .with_move_object("0xother", "2", SUI_BALANCE, json!({ "balance": "5" }))
            .with_move_object("0xmine", "2", SUI_BALANCE, json!({ "balance": "3" }))
            .with_metadata("0x2::sui::SUI", Some(9));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].current_value, "3");
        assert_eq!(rpc.object_calls(), 1);
    }

    #[tokio::test]
    async fn test_decimals_looked_up_once_per_coin_type() {
        let changes: Vec<Value> = (0..4)
            .map(|i| {
                json!({
                    "type": "created",
                    "objectId": format!("0x{i}"),
                    "version": "7",
                    "owner": { "ObjectOwner": BAG }
                })
            })
            .collect();

        let mut rpc = StubRpc::default().with_transaction_json("0xtx", tx(Value::Array(changes)));
        for i in 0..4 {
            let object_type = if i % 2 == 0 {
                SUI_BALANCE
            } else {
                "0x2::coin::Coin<0xc::usdc::USDC>"
            };
            rpc = rpc.with_move_object(&format!("0x{i}"), "7", object_type, json!({ "balance": "1" }));
        }
        let rpc = rpc
            .with_metadata("0x2::sui::SUI", Some(9))
            .with_metadata("0xc::usdc::USDC", Some(6));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes.len(), 4);
        assert_eq!(rpc.metadata_calls(), 2);
        let decimals: Vec<u8> = changes.iter().map(|c| c.decimals).collect();
        assert_eq!(decimals, vec![9, 6, 9, 6]);
    }

    #[tokio::test]
    async fn test_failures_skip_only_the_affected_object() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([
                    // Current version unavailable.
                    { "type": "created", "objectId": "0x1", "version": "3", "owner": { "ObjectOwner": BAG } },
                    // Not an integer.
                    { "type": "created", "objectId": "0x2", "version": "3", "owner": { "ObjectOwner": BAG } },
                    // No balance field.
                    { "type": "created", "objectId": "0x3", "version": "3", "owner": { "ObjectOwner": BAG } },
                    // Digit separators are not accepted.
                    { "type": "created", "objectId": "0x6", "version": "3", "owner": { "ObjectOwner": BAG } },
                    // Previous version unavailable.
                    {
                        "type": "mutated",
                        "objectId": "0x4",
                        "version": "3",
                        "previousVersion": "2",
                        "owner": { "ObjectOwner": BAG }
                    },
                    // Healthy.
                    {
                        "type": "mutated",
                        "objectId": "0x5",
                        "version": "3",
                        "previousVersion": "2",
                        "owner": { "ObjectOwner": BAG }
                    }
                ])),
            )
            .with_move_object("0x2", "3", SUI_BALANCE, json!({ "balance": "12abc" }))
            .with_move_object("0x3", "3", SUI_BALANCE, json!({ "name": "no balance" }))
            .with_move_object("0x6", "3", SUI_BALANCE, json!({ "balance": "1_000" }))
            .with_move_object("0x4", "3", SUI_BALANCE, json!({ "balance": "10" }))
            .with_move_object("0x5", "2", SUI_BALANCE, json!({ "balance": "1000" }))
            .with_move_object("0x5", "3", SUI_BALANCE, json!({ "balance": "250" }))
            .with_metadata("0x2::sui::SUI", Some(9));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].previous_value, "1000");
        assert_eq!(changes[0].current_value, "250");
        assert_eq!(changes[0].value_diff, "-750");
    }

    #[tokio::test]
    async fn test_previous_version_without_balance_counts_as_zero() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([{
                    "type": "mutated",
                    "objectId": "0xa",
                    "version": "9",
                    "previousVersion": "8",
                    "owner": { "ObjectOwner": BAG }
                }])),
            )
            .with_object(
                "0xa",
                "8",
                ObjectSnapshot::NotFound {
                    status: "VersionNotFound".to_string(),
                },
            )
            .with_move_object("0xa", "9", SUI_BALANCE, json!({ "balance": "40" }))
            .with_metadata("0x2::sui::SUI", Some(9));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes[0].previous_value, "0");
        assert_eq!(changes[0].value_diff, "40");
    }

    #[tokio::test]
    async fn test_zero_balance_is_reported() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([{
                    "type": "mutated",
                    "objectId": "0xa",
                    "version": "9",
                    "previousVersion": "8",
                    "owner": { "ObjectOwner": BAG }
                }])),
            )
            .with_move_object("0xa", "8", SUI_BALANCE, json!({ "balance": "800" }))
            .with_move_object("0xa", "9", SUI_BALANCE, json!({ "balance": "0" }))
            .with_metadata("0x2::sui::SUI", Some(9));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].current_value, "0");
        assert_eq!(changes[0].value_diff, "-800");
    }

    #[tokio::test]
    async fn test_values_beyond_u64() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([{
                    "type": "mutated",
                    "objectId": "0xa",
                    "version": "9",
                    "previousVersion": "8",
                    "owner": { "ObjectOwner": BAG }
                }])),
            )
            .with_move_object("0xa", "8", SUI_BALANCE, json!({ "balance": "18446744073709551615" }))
            .with_move_object("0xa", "9", SUI_BALANCE, json!({ "balance": "36893488147419103230" }))
            .with_metadata("0x2::sui::SUI", Some(9));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes[0].value_diff, "18446744073709551615");
    }

    #[tokio::test]
    async fn test_type_falls_back_to_object_change() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([{
                    "type": "created",
                    "objectId": "0xa",
                    "version": "9",
                    "owner": { "ObjectOwner": BAG },
                    "objectType": "0x2::coin::Coin<0xd::deep::DEEP>"
                }])),
            )
            .with_object(
                "0xa",
                "9",
                ObjectSnapshot::Found {
                    object_id: "0xa".to_string(),
                    version: "9".to_string(),
                    content: Some(ObjectContent {
                        data_type: "moveObject".to_string(),
                        object_type: None,
                        fields: Some(json!({ "balance": "5" })),
                    }),
                },
            )
            .with_metadata("0xd::deep::DEEP", Some(6));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes[0].coin_type, "0xd::deep::DEEP");
        assert_eq!(changes[0].decimals, 6);
    }

    #[tokio::test]
    async fn test_untyped_object_skips_metadata_lookup() {
        let rpc = StubRpc::default()
            .with_transaction_json(
                "0xtx",
                tx(json!([{
                    "type": "created",
                    "objectId": "0xa",
                    "version": "9",
                    "owner": { "ObjectOwner": BAG }
                }])),
            )
            .with_object(
                "0xa",
                "9",
                ObjectSnapshot::Found {
                    object_id: "0xa".to_string(),
                    version: "9".to_string(),
                    content: Some(ObjectContent {
                        data_type: "moveObject".to_string(),
                        object_type: None,
                        fields: Some(json!({ "balance": "5" })),
                    }),
                },
            );

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].coin_type, "");
        assert_eq!(changes[0].decimals, 0);
        assert_eq!(rpc.metadata_calls(), 0);
    }

    #[tokio::test]
    async fn test_no_object_changes() {
        let rpc = StubRpc::default().with_transaction_json("0xtx", json!({ "digest": "0xtx" }));

        let changes = bag_dynamic_field_balance_changes(&rpc, "0xtx", BAG)
            .await
            .unwrap();

        assert!(changes.is_empty());
        assert_eq!(rpc.object_calls(), 0);
    }

    #[tokio::test]
    async fn test_transaction_fetch_failure_propagates() {
        let rpc = StubRpc::default();
        assert!(bag_dynamic_field_balance_changes(&rpc, "0xmissing", BAG)
            .await
            .is_err());
    }
}
