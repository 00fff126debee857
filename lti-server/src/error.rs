//! Server error types

use thiserror::Error;

/// Errors that can occur in the LTI tool server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration cannot be used to start the server
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<lti_core::Error> for ServerError {
    fn from(err: lti_core::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
