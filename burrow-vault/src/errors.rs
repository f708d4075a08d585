use thiserror::Error;

/// Errors emitted while reading or writing the stored password.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault IO failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("vault JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}
