//! Launch error types

use thiserror::Error;

use crate::oauth::SignatureError;

/// Reasons a launch is turned away
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    /// Bad or missing signature, unknown method or unknown consumer
    #[error("launch signature invalid: {0}")]
    SignatureInvalid(#[from] SignatureError),

    /// Verified, but without `lis_outcome_service_url`
    #[error("launch is not an assignment launch")]
    NotAssignmentLaunch,
}

impl LaunchError {
    /// Text shown to the person whose launch was rejected
    ///
    /// `expected_secret` is only named when the caller passes it in.
    pub fn user_message(&self, expected_secret: Option<&str>) -> String {
        match self {
            LaunchError::SignatureInvalid(_) => match expected_secret {
                Some(secret) => format!(
                    r#"unauthorized attempt. make sure you used the consumer secret "{}""#,
                    secret
                ),
                None => "unauthorized attempt. make sure you used the consumer secret \
                         configured for this tool"
                    .to_string(),
            },
            LaunchError::NotAssignmentLaunch => NOT_ASSIGNMENT_MESSAGE.to_string(),
        }
    }
}

const NOT_ASSIGNMENT_MESSAGE: &str = "It looks like this LTI tool wasn't launched as an \
    assignment. Make sure to set up an external tool assignment, so the launch carries an \
    outcome service URL, as outlined in the README for this tool.";
