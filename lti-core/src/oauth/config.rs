//! Configuration for OAuth 1.0 request signing

use std::fmt;

use serde::{Deserialize, Serialize};

/// Consumer key used by the demo tool
pub const DEFAULT_CONSUMER_KEY: &str = "test";

/// Shared secret used by the demo tool
pub const DEFAULT_CONSUMER_SECRET: &str = "secret";

/// Key and shared secret agreed with the tool consumer
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCredentials {
    /// Consumer key (`oauth_consumer_key`)
    pub consumer_key: String,
    /// Shared consumer secret
    pub consumer_secret: String,
}

impl ToolCredentials {
    /// Create credentials from a key and secret
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }
}

impl Default for ToolCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_CONSUMER_KEY, DEFAULT_CONSUMER_SECRET)
    }
}

impl fmt::Debug for ToolCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"***")
            .finish()
    }
}

/// OAuth settings for verifying launches and signing outcomes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Consumer key (`oauth_consumer_key`)
    #[serde(default = "default_consumer_key")]
    pub consumer_key: String,

    /// Shared consumer secret
    #[serde(default = "default_consumer_secret")]
    pub consumer_secret: String,

    /// Maximum distance between `oauth_timestamp` and now, in seconds.
    /// Unset disables the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_tolerance_secs: Option<u64>,

    /// Whether a rejected launch names the expected secret. Only sensible for
    /// a local demo.
    #[serde(default = "default_echo_secret")]
    pub echo_secret_on_failure: bool,
}

fn default_consumer_key() -> String {
    DEFAULT_CONSUMER_KEY.to_string()
}

fn default_consumer_secret() -> String {
    DEFAULT_CONSUMER_SECRET.to_string()
}

fn default_echo_secret() -> bool {
    true
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            consumer_key: default_consumer_key(),
            consumer_secret: default_consumer_secret(),
            timestamp_tolerance_secs: None,
            echo_secret_on_failure: default_echo_secret(),
        }
    }
}

impl OAuthConfig {
    /// Create a config with the given key and secret and demo defaults otherwise
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            ..Self::default()
        }
    }

    /// Credentials shared by the verifier and the outcome signer
    pub fn credentials(&self) -> ToolCredentials {
        ToolCredentials::new(&self.consumer_key, &self.consumer_secret)
    }

    /// Check that the key and secret are usable
    pub fn is_valid(&self) -> bool {
        !self.consumer_key.is_empty() && !self.consumer_secret.is_empty()
    }
}
