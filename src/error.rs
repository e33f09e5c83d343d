//! Crate error type.
//!
//! The cURL parser itself never fails; these errors come from the closed
//! request model and from the stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The method is not one of the verbs the request builder offers.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("unknown body type: {0}")]
    UnknownBodyType(String),

    /// Stored data could not be read or written as JSON.
    #[error("storage data for `{key}` is invalid: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key-value substrate refused an operation.
    #[error("storage backend error: {0}")]
    Storage(String),

    #[error("failed to read command: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
