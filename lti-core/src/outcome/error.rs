//! Outcome error types

use thiserror::Error;

/// Problems with a score submission, detected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// A required form field was missing or blank
    #[error("missing form field: {0}")]
    MissingField(&'static str),

    /// No launch session could be found for the submission
    #[error("no active launch for this submission")]
    NoActiveLaunch,
}

/// Failures posting an outcome to the consumer
#[derive(Debug, Error)]
pub enum OutcomeError {
    /// The outcome service URL from the launch is unusable
    #[error("invalid outcome service URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response (connect, TLS, timeout)
    #[error("network error: {0}")]
    Transport(String),

    /// The consumer answered, but not with success
    #[error("outcome rejected with status {status}")]
    Rejected { status: u16, body: String },
}

impl OutcomeError {
    /// Response body returned by the consumer, when there was one
    pub fn body(&self) -> Option<&str> {
        match self {
            OutcomeError::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}
