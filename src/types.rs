//! Wire and output data structures shared by the parser, the bag diff engine and RPC
//! implementations.
//!
//! Wire types mirror the Sui JSON-RPC representation (camelCase keys). Ownership is
//! converted into the closed [`Owner`] enum once, at deserialization time.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single coin balance change as exposed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub coin_type: String,
    /// Signed integer amount, verbatim from the transaction.
    pub amount: String,
    /// Canonical owner, or an empty string when the owner shape was not recognized.
    pub owner: String,
}

/// Balance change of an object stored as a dynamic field inside a bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldBalanceChange {
    pub coin_type: String,
    pub previous_value: String,
    pub current_value: String,
    pub value_diff: String,
    pub decimals: u8,
}

/// Gas charges taken verbatim from `effects.gasUsed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    pub computation_cost: String,
    pub storage_cost: String,
    pub storage_rebate: String,
    pub non_refundable_storage_fee: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub balance_changes: Vec<BalanceChange>,
    pub gas_cost: GasCostSummary,
}

/// Ownership descriptor of an object or balance change.
///
/// Wire shapes:
/// - `"Immutable"`
/// - `{"AddressOwner": "0x.."}`
/// - `{"ObjectOwner": "0x.."}`
/// - `{"Shared": {"initial_shared_version": 42}}`
/// - `{"ConsensusV2": {"start_version": 77, ...}}`
///
/// Anything else is kept as [`Owner::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Immutable,
    AddressOwner(String),
    ObjectOwner(String),
    Shared { initial_shared_version: String },
    ConsensusV2 { start_version: String },
    Unknown(Value),
}

impl Owner {
    /// Converts the raw JSON representation into an [`Owner`].
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) if s == "Immutable" => Self::Immutable,
            Value::Object(map) if map.len() == 1 => {
                if let Some(Value::String(address)) = map.get("AddressOwner") {
                    return Self::AddressOwner(address.clone());
                }
                if let Some(Value::String(id)) = map.get("ObjectOwner") {
                    return Self::ObjectOwner(id.clone());
                }
                if let Some(version) = map
                    .get("Shared")
                    .and_then(|shared| shared.get("initial_shared_version"))
                    .and_then(version_text)
                {
                    return Self::Shared {
                        initial_shared_version: version,
                    };
                }
                if let Some(version) = map
                    .get("ConsensusV2")
                    .and_then(|consensus| consensus.get("start_version"))
                    .and_then(version_text)
                {
                    return Self::ConsensusV2 {
                        start_version: version,
                    };
                }
                Self::Unknown(value.clone())
            }
            _ => Self::Unknown(value.clone()),
        }
    }

    /// Holder id when the object is owned by another object (e.g. a bag).
    pub fn container_id(&self) -> Option<&str> {
        match self {
            Self::ObjectOwner(id) => Some(id),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Owner {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Versions are serialized either as JSON numbers or decimal strings depending on the
/// endpoint.
fn version_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn deserialize_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    version_text(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid object version: {value}")))
}

fn deserialize_optional_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => version_text(&value).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid object version: {value}"))
        }),
    }
}

/// Which sections of a transaction record to request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionQueryOptions {
    pub show_balance_changes: bool,
    pub show_effects: bool,
    pub show_events: bool,
    pub show_object_changes: bool,
}

impl TransactionQueryOptions {
    /// Sections needed to build a [`ParseResult`].
    pub fn for_balance_parse() -> Self {
        Self {
            show_balance_changes: true,
            show_effects: true,
            show_events: true,
            show_object_changes: false,
        }
    }

    /// Sections needed by the bag diff engine.
    pub fn for_object_changes() -> Self {
        Self {
            show_object_changes: true,
            ..Self::default()
        }
    }
}

/// Transaction record as returned by `sui_getTransactionBlock`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub balance_changes: Option<Vec<RawBalanceChange>>,
    #[serde(default)]
    pub effects: Option<TransactionEffects>,
    #[serde(default)]
    pub object_changes: Option<Vec<ObjectChange>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBalanceChange {
    pub coin_type: String,
    pub amount: String,
    #[serde(default)]
    pub owner: Option<Owner>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    #[serde(default)]
    pub gas_used: Option<GasCostSummary>,
}

/// Entry of a transaction's `objectChanges` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    #[serde(rename_all = "camelCase")]
    Created {
        object_id: String,
        #[serde(deserialize_with = "deserialize_version")]
        version: String,
        #[serde(default)]
        owner: Option<Owner>,
        #[serde(default)]
        object_type: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Mutated {
        object_id: String,
        #[serde(deserialize_with = "deserialize_version")]
        version: String,
        #[serde(default, deserialize_with = "deserialize_optional_version")]
        previous_version: Option<String>,
        #[serde(default)]
        owner: Option<Owner>,
        #[serde(default)]
        object_type: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Bag-relevant view of a created or mutated object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedObject<'a> {
    pub object_id: &'a str,
    pub version: &'a str,
    pub previous_version: Option<&'a str>,
    pub owner: Option<&'a Owner>,
    pub object_type: Option<&'a str>,
}

impl ObjectChange {
    /// Returns the object fields for created/mutated entries, `None` for other kinds.
    pub fn as_changed_object(&self) -> Option<ChangedObject<'_>> {
        match self {
            Self::Created {
                object_id,
                version,
                owner,
                object_type,
            } => Some(ChangedObject {
                object_id,
                version,
                previous_version: None,
                owner: owner.as_ref(),
                object_type: object_type.as_deref(),
            }),
            Self::Mutated {
                object_id,
                version,
                previous_version,
                owner,
                object_type,
            } => Some(ChangedObject {
                object_id,
                version,
                previous_version: previous_version.as_deref(),
                owner: owner.as_ref(),
                object_type: object_type.as_deref(),
            }),
            Self::Other => None,
        }
    }
}

/// Object state at a specific version.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectSnapshot {
    Found {
        object_id: String,
        version: String,
        content: Option<ObjectContent>,
    },
    NotFound {
        status: String,
    },
}

impl ObjectSnapshot {
    pub fn content(&self) -> Option<&ObjectContent> {
        match self {
            Self::Found { content, .. } => content.as_ref(),
            Self::NotFound { .. } => None,
        }
    }

    /// Declared Move type of the object, if the content carries one.
    pub fn object_type(&self) -> Option<&str> {
        self.content()?.object_type.as_deref()
    }
}

/// Parsed object content (`details.content` on the wire).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub data_type: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub fields: Option<Value>,
}

impl ObjectContent {
    pub const MOVE_OBJECT: &'static str = "moveObject";

    pub fn is_move_object(&self) -> bool {
        self.data_type == Self::MOVE_OBJECT
    }
}

/// Coin metadata as returned by `suix_getCoinMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinMetadata {
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_owner_from_wire_shapes() {
        assert_eq!(Owner::from_value(&json!("Immutable")), Owner::Immutable);
        assert_eq!(
            Owner::from_value(&json!({ "AddressOwner": "0x1" })),
            Owner::AddressOwner("0x1".to_string())
        );
        assert_eq!(
            Owner::from_value(&json!({ "ObjectOwner": "0xbag" })),
            Owner::ObjectOwner("0xbag".to_string())
        );
        assert_eq!(
            Owner::from_value(&json!({ "Shared": { "initial_shared_version": 42 } })),
            Owner::Shared {
                initial_shared_version: "42".to_string()
            }
        );
        assert_eq!(
            Owner::from_value(&json!({
                "ConsensusV2": { "start_version": "77", "authenticator": { "SingleOwner": "0x1" } }
            })),
            Owner::ConsensusV2 {
                start_version: "77".to_string()
            }
        );
    }

    #[test]
    fn test_owner_unknown_shapes() {
        let weird = json!({ "Wrapped": {} });
        assert_eq!(Owner::from_value(&weird), Owner::Unknown(weird.clone()));
        assert!(matches!(Owner::from_value(&json!("Frozen")), Owner::Unknown(_)));
        assert!(matches!(Owner::from_value(&json!(7)), Owner::Unknown(_)));
    }

    #[test]
    fn test_object_change_deserialization() {
        let changes: Vec<ObjectChange> = serde_json::from_value(json!([
            {
                "type": "mutated",
                "objectId": "0xa",
                "version": "12",
                "previousVersion": "10",
                "owner": { "ObjectOwner": "0xbag" },
                "objectType": "0x2::balance::Balance<0x2::sui::SUI>"
            },
            {
                "type": "created",
                "objectId": "0xb",
                "version": 12,
                "owner": { "AddressOwner": "0x1" }
            },
            { "type": "deleted", "objectId": "0xc", "version": "12" },
            { "type": "published", "packageId": "0xd", "version": "1", "modules": [] }
        ]))
        .unwrap();

        assert_eq!(changes.len(), 4);
        let mutated = changes[0].as_changed_object().unwrap();
        assert_eq!(mutated.previous_version, Some("10"));
        assert_eq!(mutated.owner.and_then(Owner::container_id), Some("0xbag"));

        let created = changes[1].as_changed_object().unwrap();
        assert_eq!(created.version, "12");
        assert_eq!(created.previous_version, None);

        assert!(changes[2].as_changed_object().is_none());
        assert!(changes[3].as_changed_object().is_none());
    }
}
