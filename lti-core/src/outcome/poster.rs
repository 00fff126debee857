//! Delivering outcome messages to the consumer

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::oauth::{OAuthSigner, ToolCredentials};

use super::envelope::ReplaceResultRequest;
use super::error::OutcomeError;
use super::ScoreSubmission;

/// Default bound on a single outcome POST
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const XML_CONTENT_TYPE: &str = "application/xml";

static SUCCESS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsuccess\b").expect("success pattern is valid"));

/// Whether a consumer response reports success
///
/// Consumers answer with an `imsx_POXEnvelopeResponse` whose `imsx_codeMajor`
/// is `success`; the word anywhere in the body counts.
pub fn is_success(body: &str) -> bool {
    SUCCESS_TOKEN.is_match(body)
}

/// A consumer response that reported success
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedOutcome {
    pub status: u16,
    pub body: String,
}

/// Signs and sends `replaceResultRequest` messages
///
/// One call, one request. Nothing is retried.
pub struct OutcomePoster {
    client: reqwest::Client,
    signer: OAuthSigner,
}

impl OutcomePoster {
    /// Create a poster with the given request timeout
    pub fn new(credentials: ToolCredentials, timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lti-tool/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| crate::Error::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            signer: OAuthSigner::new(credentials),
        })
    }

    /// Post a score to the outcome service URL taken from the launch
    pub async fn post_score(
        &self,
        outcome_service_url: &str,
        submission: &ScoreSubmission,
    ) -> Result<PostedOutcome, OutcomeError> {
        let url = Url::parse(outcome_service_url).map_err(|e| OutcomeError::InvalidUrl {
            url: outcome_service_url.to_string(),
            reason: e.to_string(),
        })?;

        let xml = ReplaceResultRequest::new(submission).to_xml();
        let authorization = self
            .signer
            .authorization_for_body("POST", &url, xml.as_bytes());

        tracing::debug!(url = %url, sourced_id = %submission.sourced_id, "Posting outcome");

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .header(AUTHORIZATION, authorization)
            .body(xml)
            .send()
            .await
            .map_err(|e| OutcomeError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OutcomeError::Transport(e.to_string()))?;

        if status.is_success() && is_success(&body) {
            tracing::info!(url = %url, status = status.as_u16(), "Outcome posted");
            Ok(PostedOutcome {
                status: status.as_u16(),
                body,
            })
        } else {
            tracing::warn!(url = %url, status = status.as_u16(), "Outcome rejected by consumer");
            Err(OutcomeError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
