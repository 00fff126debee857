//! Shared test utilities for lti-server integration tests

use std::sync::Arc;

use axum::http::header::LOCATION;
use axum_test::TestServer;
use lti_core::{OAuthSigner, ToolCredentials};
use lti_server::{AppState, ServerConfig, create_router};
use url::Url;

/// Base URL the simulated consumer signs launches against
pub const PUBLIC_URL: &str = "http://tool.example";

/// Path of the launch endpoint
pub const LAUNCH_PATH: &str = "/assessment/start";

/// Config with demo credentials and a fixed public URL
#[allow(dead_code)]
pub fn test_config() -> ServerConfig {
    ServerConfig::default().with_public_url(PUBLIC_URL)
}

/// Creates a test server with default config, returns state and server
#[allow(dead_code)]
pub fn create_test_server() -> (Arc<AppState>, TestServer) {
    create_test_server_with_config(test_config())
}

/// Creates a test server with custom config
#[allow(dead_code)]
pub fn create_test_server_with_config(config: ServerConfig) -> (Arc<AppState>, TestServer) {
    let state = Arc::new(AppState::new(&config).expect("valid test config"));
    let server = TestServer::new(create_router(Arc::clone(&state))).expect("test server");
    (state, server)
}

/// Launch form parameters signed the way a consumer would sign them
#[allow(dead_code)]
pub fn signed_launch(secret: &str, params: &[(&str, &str)]) -> Vec<(String, String)> {
    let url = Url::parse(&format!("{}{}", PUBLIC_URL, LAUNCH_PATH)).unwrap();
    let params = params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    OAuthSigner::new(ToolCredentials::new("test", secret)).sign_form("POST", &url, params)
}

/// Perform a valid launch and return the redirect location
#[allow(dead_code)]
pub async fn launch(server: &TestServer, params: &[(&str, &str)]) -> String {
    let response = server
        .post(LAUNCH_PATH)
        .form(&signed_launch("secret", params))
        .await;
    assert_eq!(response.status_code(), 302, "launch should redirect");

    response
        .headers()
        .get(LOCATION)
        .expect("redirect location")
        .to_str()
        .unwrap()
        .to_string()
}

/// Session id carried in a redirect location
#[allow(dead_code)]
pub fn session_from_location(location: &str) -> String {
    location
        .split_once("session=")
        .map(|(_, id)| id.to_string())
        .expect("location carries a session")
}
