//! OAuth signature error types

use thiserror::Error;

/// Reasons a signed request fails verification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The request carried no `oauth_signature`
    #[error("request is not signed")]
    MissingSignature,

    /// `oauth_signature_method` is absent or not supported
    #[error("unknown signature method: {0:?}")]
    UnknownSignatureMethod(String),

    /// `oauth_consumer_key` does not match the configured key
    #[error("unknown consumer key: {0:?}")]
    ConsumerKeyMismatch(String),

    /// `oauth_timestamp` is missing, malformed or outside the tolerance
    #[error("stale or invalid timestamp: {0}")]
    StaleTimestamp(String),

    /// The recomputed signature differs from the supplied one
    #[error("signature mismatch")]
    Mismatch,
}
