use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Update payload is not a JSON object; never leaves the store, see `UpdateOutcome::Undecodable`.
    #[error("decode error: {0}")]
    Decode(String),
}
