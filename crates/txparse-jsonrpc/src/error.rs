use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum JsonRpcError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rpc error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },
    #[error("malformed rpc response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
    #[error("rpc response missing result field")]
    MissingResult,
    #[error("invalid object version '{0}'")]
    InvalidVersion(String),
    #[error("invalid rpc url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl JsonRpcError {
    /// Transport failures (connection, timeout, bad gateway) may succeed when retried.
    /// Errors reported by the node itself will not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.is_request()
                    || e.status().is_some_and(|status| status.is_server_error())
            }
            _ => false,
        }
    }
}
