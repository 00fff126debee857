//! Shared application state for the LTI tool server

use chrono::{DateTime, Utc};
use lti_core::{LaunchVerifier, OutcomePoster, SessionStore};
use url::Url;

use crate::{ServerConfig, ServerError};

/// Shared application state accessible by all handlers
pub struct AppState {
    /// Verifies consumer launches
    pub launch_verifier: LaunchVerifier,
    /// Launch sessions keyed by session id
    pub sessions: SessionStore,
    /// Sends scores back to the consumer
    pub outcome_poster: OutcomePoster,
    /// Externally visible base URL, used to rebuild signed URLs
    pub public_url: Option<String>,
    /// Secret named in rejected-launch messages, when echoing is enabled
    secret_hint: Option<String>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build state from server configuration
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        if !config.oauth.is_valid() {
            return Err(ServerError::InvalidConfig(
                "consumer key and secret must not be empty".to_string(),
            ));
        }

        let public_url = config
            .public_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map(|_| raw.trim_end_matches('/').to_string())
                    .map_err(|e| ServerError::InvalidConfig(format!("public_url {raw:?}: {e}")))
            })
            .transpose()?;

        let outcome_poster = OutcomePoster::new(config.oauth.credentials(), config.outcome_timeout)?;

        Ok(Self {
            launch_verifier: LaunchVerifier::new(&config.oauth),
            sessions: SessionStore::new(config.max_sessions),
            outcome_poster,
            public_url,
            secret_hint: config
                .oauth
                .echo_secret_on_failure
                .then(|| config.oauth.consumer_secret.clone()),
            started_at: Utc::now(),
        })
    }

    /// Secret to name when a launch signature is rejected
    pub fn secret_hint(&self) -> Option<&str> {
        self.secret_hint.as_deref()
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
