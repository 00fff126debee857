//! Error types for lti-core
//!
//! Launch, submission and outcome failures carry their own enums
//! ([`crate::LaunchError`], [`crate::SubmissionError`],
//! [`crate::OutcomeError`]) because each is rendered to the user where it
//! happens. This type covers setup failures that abort startup.

use thiserror::Error;

/// Result type alias using the crate's error type
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for lti-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
