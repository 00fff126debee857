use std::time::Duration;

use lti_core::OAuthConfig;
use lti_core::outcome::DEFAULT_TIMEOUT;
use lti_core::session::DEFAULT_MAX_SESSIONS;
use lti_server::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
use serde::{Deserialize, Serialize};

/// Placeholder printed instead of the consumer secret
pub const SECRET_MASK: &str = "********";

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawToolConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub oauth: RawOAuthConfig,

    #[serde(default)]
    pub outcomes: RawOutcomesConfig,

    #[serde(default)]
    pub sessions: RawSessionsConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawOAuthConfig {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub timestamp_tolerance_secs: Option<u64>,
    pub echo_secret_on_failure: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawOutcomesConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSessionsConfig {
    pub max_sessions: Option<usize>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub oauth: OAuthConfig,

    #[serde(default)]
    pub outcomes: OutcomesSection,

    #[serde(default)]
    pub sessions: SessionsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Base URL consumers sign launches against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomesSection {
    /// Timeout for each outcome POST, in seconds
    pub timeout_secs: u64,
}

impl Default for OutcomesSection {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsSection {
    /// Launch sessions kept in memory before the oldest is dropped
    pub max_sessions: usize,
}

impl Default for SessionsSection {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ToolConfig {
    /// Server configuration for this tool config
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            public_url: self.server.public_url.clone(),
            oauth: self.oauth.clone(),
            outcome_timeout: Duration::from_secs(self.outcomes.timeout_secs),
            max_sessions: self.sessions.max_sessions,
        }
    }

    /// Copy of the config that is safe to print
    pub fn masked(&self) -> Self {
        let mut config = self.clone();
        config.oauth.consumer_secret = SECRET_MASK.to_string();
        config
    }
}
