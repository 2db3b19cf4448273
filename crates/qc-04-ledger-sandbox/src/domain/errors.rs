use shared_types::Height;
use thiserror::Error;

/// Configuration faults of the sandbox layer.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("Invalid protocol parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to parse protocol parameters: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Faults of a `LedgerStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Delta height mismatch: expected {expected}, got {actual}")]
    HeightMismatch { expected: Height, actual: Height },

    #[error("Invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error(transparent)]
    Sandbox(#[from] SandboxError),
}
