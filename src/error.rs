use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client and the local entity model
#[derive(Debug, Error)]
pub enum Error {
    /// Every attempt failed; carries the last observed cause
    #[error("all retries exhausted after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Caller-side mistake caught before any request was sent
    #[error("validation error: {0}")]
    Validation(String),

    /// The entity has no connection to talk to
    #[error("no connection configured for this entity")]
    NoConnection,

    /// JSON did not match the entity model or could not be encoded
    #[error("JSON conversion failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
