//! JSON-RPC envelopes and Sui response shapes that do not leave this crate.

use serde::Deserialize;
use serde_json::Value;
use txparse::{ObjectContent, ObjectSnapshot};

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// `sui_tryGetPastObject` result.
#[derive(Debug, Deserialize)]
pub(crate) struct PastObjectResponse {
    pub status: String,
    #[serde(default)]
    pub details: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectData {
    object_id: String,
    version: Value,
    #[serde(default)]
    content: Option<ObjectContent>,
}

pub(crate) const VERSION_FOUND: &str = "VersionFound";

impl PastObjectResponse {
    /// Converts the response into a snapshot. Only `VersionFound` carries object data;
    /// other statuses (`ObjectNotExists`, `ObjectDeleted`, `VersionNotFound`,
    /// `VersionTooHigh`) become [`ObjectSnapshot::NotFound`].
    pub(crate) fn into_snapshot(self) -> Result<ObjectSnapshot, serde_json::Error> {
        if self.status != VERSION_FOUND {
            return Ok(ObjectSnapshot::NotFound {
                status: self.status,
            });
        }

        let Some(details) = self.details else {
            return Ok(ObjectSnapshot::NotFound {
                status: self.status,
            });
        };

        let data: ObjectData = serde_json::from_value(details)?;
        let version = match data.version {
            Value::String(s) => s,
            other => other.to_string(),
        };

        Ok(ObjectSnapshot::Found {
            object_id: data.object_id,
            version,
            content: data.content,
        })
    }
}
