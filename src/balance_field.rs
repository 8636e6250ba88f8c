//! Balance extraction from object content of unknown shape.
//!
//! Bag entries hold values such as `Balance<T>`, `Coin<T>` or user structs wrapping one
//! of them. Depending on the endpoint, nested Move structs are rendered either bare
//! (`{"value": "5"}`) or wrapped (`{"type": "..", "fields": {"value": "5"}}`). Both are
//! accepted at every level.
//!
//! Shapes are tried in a fixed order, first match wins:
//!
//! | content fields                      | result                |
//! |-------------------------------------|-----------------------|
//! | `balance: { value }`                | `balance.value`       |
//! | `balance: <scalar>`                 | `balance`             |
//! | `value: { balance }`                | `value.balance`       |
//! | `value: { value }`                  | `value.value`         |
//! | `value: <scalar>`                   | `value`               |
//! | anything else                       | not found             |

use serde_json::Value;

use crate::types::ObjectSnapshot;

/// Returns the numeric balance held by the snapshot, or `None` when the object was not
/// found, is not a Move object, or has no recognizable balance field.
pub fn extract_balance(snapshot: &ObjectSnapshot) -> Option<String> {
    let content = snapshot.content()?;
    if !content.is_move_object() {
        return None;
    }
    extract_balance_from_fields(content.fields.as_ref()?)
}

/// Applies the priority table to a raw field map.
pub fn extract_balance_from_fields(fields: &Value) -> Option<String> {
    let fields = struct_fields(fields)?;

    if let Some(balance) = fields.get("balance") {
        let target = struct_fields(balance)
            .and_then(|inner| inner.get("value"))
            .unwrap_or(balance);
        return scalar_text(target);
    }

    if let Some(value) = fields.get("value") {
        let target = struct_fields(value)
            .and_then(|inner| inner.get("balance").or_else(|| inner.get("value")))
            .unwrap_or(value);
        return scalar_text(target);
    }

    None
}

/// Field map of a Move struct rendered either bare or as `{type, fields}`.
fn struct_fields(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    let map = value.as_object()?;
    match map.get("fields") {
        Some(Value::Object(fields)) => Some(fields),
        _ => Some(map),
    }
}

/// Text of a numeric leaf. `u64` and wider integers are serialized as strings, smaller
/// ones as JSON numbers.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => {
            tracing::debug!(
                target: "txparse::balance_field",
                value = %other,
                "Balance field is not a scalar"
            );
            None
        }
    }
}
