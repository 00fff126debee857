//! Basic LTI launch verification
//!
//! A launch is a signed form post from the tool consumer. Only launches that
//! come from an assignment carry an outcome service URL, and only those can
//! report a score back, so anything else is turned away with instructions.

mod error;

use url::Url;

use crate::oauth::{OAuthConfig, SignatureVerifier};

pub use error::LaunchError;

/// Outcome service endpoint for the launch's gradebook column
pub const OUTCOME_SERVICE_URL: &str = "lis_outcome_service_url";
/// Learner's full name, present when the consumer shares names
pub const PERSON_NAME_FULL: &str = "lis_person_name_full";
/// Learner's email, present when the consumer shares emails
pub const PERSON_EMAIL: &str = "lis_person_contact_email_primary";

/// Parameters retained from a verified launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    pub outcome_service_url: String,
    pub person_name: Option<String>,
    pub person_email: Option<String>,
}

/// Checks launch signatures and extracts the parameters the tool needs
#[derive(Debug, Clone)]
pub struct LaunchVerifier {
    signatures: SignatureVerifier,
}

impl LaunchVerifier {
    /// Create a verifier from OAuth settings
    pub fn new(config: &OAuthConfig) -> Self {
        Self {
            signatures: SignatureVerifier::from_config(config),
        }
    }

    /// Verify a launch request
    ///
    /// `url` must be the URL the consumer signed, query included. `params`
    /// holds the decoded form body plus any `Authorization` header
    /// parameters.
    pub fn verify(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
    ) -> Result<LaunchParams, LaunchError> {
        self.signatures.verify(method, url, params)?;
        extract(url, params)
    }

    /// [`verify`](Self::verify) against a fixed clock
    pub fn verify_at(
        &self,
        method: &str,
        url: &Url,
        params: &[(String, String)],
        now: i64,
    ) -> Result<LaunchParams, LaunchError> {
        self.signatures.verify_at(method, url, params, now)?;
        extract(url, params)
    }
}

fn extract(url: &Url, params: &[(String, String)]) -> Result<LaunchParams, LaunchError> {
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let value = |name: &str| {
        params
            .iter()
            .chain(query.iter())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let outcome_service_url = value(OUTCOME_SERVICE_URL).ok_or(LaunchError::NotAssignmentLaunch)?;

    Ok(LaunchParams {
        outcome_service_url,
        person_name: value(PERSON_NAME_FULL),
        person_email: value(PERSON_EMAIL),
    })
}
