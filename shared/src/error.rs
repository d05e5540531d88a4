use thiserror::Error;

/// Why a snapshot poll produced nothing. Every variant is handled the same
/// way by the client: log it and keep the current scene.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}
