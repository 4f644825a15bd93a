use thiserror::Error;

/// Failures coming out of the catalog, order and session stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("invalid stored payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}
