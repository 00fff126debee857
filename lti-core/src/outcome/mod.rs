//! LTI Basic Outcomes: reporting a score back to the consumer
//!
//! The tool sends a single message type, `replaceResultRequest`, wrapped in
//! an IMS POX envelope and signed with OAuth 1.0 plus the body hash
//! extension.

mod envelope;
mod error;
mod poster;

pub use envelope::{IMS_OMS_NAMESPACE, ReplaceResultRequest};
pub use error::{OutcomeError, SubmissionError};
pub use poster::{DEFAULT_TIMEOUT, OutcomePoster, PostedOutcome, is_success};

/// Form field carrying the sourced id
pub const SOURCED_ID_FIELD: &str = "sourcedId";
/// Form field carrying the score
pub const SCORE_FIELD: &str = "score";

/// Score typed into the assessment form
///
/// The score is passed through as text; the consumer decides whether it is a
/// valid result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub sourced_id: String,
    pub score: String,
}

impl ScoreSubmission {
    /// Build a submission from optional form values
    ///
    /// Both fields must be present and non-empty. Values are kept verbatim.
    pub fn from_form(
        sourced_id: Option<&str>,
        score: Option<&str>,
    ) -> Result<Self, SubmissionError> {
        let required = |value: Option<&str>, field: &'static str| {
            value
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(SubmissionError::MissingField(field))
        };

        Ok(Self {
            score: required(score, SCORE_FIELD)?,
            sourced_id: required(sourced_id, SOURCED_ID_FIELD)?,
        })
    }
}
