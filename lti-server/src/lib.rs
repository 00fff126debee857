//! lti-server - HTTP server for the LTI demo tool provider
//!
//! Owns the launch verifier, the session store and the outcome poster, and
//! exposes the three assessment routes a tool consumer and learner use.

mod error;
pub mod http;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lti_core::OAuthConfig;
use lti_core::outcome::DEFAULT_TIMEOUT;
use lti_core::session::DEFAULT_MAX_SESSIONS;
use tokio::net::TcpListener;

pub use error::ServerError;
pub use http::create_router;
pub use state::AppState;

/// Default host for the tool server
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port for the tool server
pub const DEFAULT_PORT: u16 = 9292;

/// The LTI tool server
pub struct LtiServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl LtiServer {
    /// Create a new server, building state from the configuration
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let state = Arc::new(AppState::new(&config)?);
        Ok(Self { config, state })
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, binding to the configured address
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        self.run_with_listener(listener).await
    }

    /// Run the server on an already bound listener
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!("LTI tool listening on {}", addr);
        }
        if let Some(public_url) = &self.state.public_url {
            tracing::info!("Verifying launch signatures against {}", public_url);
        }

        let router = create_router(self.state);
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL consumers use to reach the tool (e.g. behind a proxy).
    /// Without it the `Host` header is trusted.
    pub public_url: Option<String>,
    /// Consumer credentials and launch verification settings
    pub oauth: OAuthConfig,
    /// Bound on each outcome POST
    pub outcome_timeout: Duration,
    /// Maximum number of launch sessions kept in memory
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_url: None,
            oauth: OAuthConfig::default(),
            outcome_timeout: DEFAULT_TIMEOUT,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with the specified host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Set the externally visible base URL
    pub fn with_public_url(mut self, public_url: impl Into<String>) -> Self {
        self.public_url = Some(public_url.into());
        self
    }

    /// Set the OAuth settings
    pub fn with_oauth(mut self, oauth: OAuthConfig) -> Self {
        self.oauth = oauth;
        self
    }

    /// Returns the socket address string (e.g., "127.0.0.1:9292")
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
