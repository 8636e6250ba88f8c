#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transaction response does not include gas usage information")]
    MissingGasInfo,
    #[error("transaction payload could not be deserialized: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Rpc(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
