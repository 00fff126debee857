//! HTTP server module

mod api;
mod assessment;
mod launch;
mod session;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use api::HealthResponse;
pub use assessment::{render_form, render_result};
pub use session::SESSION_COOKIE;

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/assessment/start", post(launch::start))
        .route(
            "/assessment",
            get(assessment::show_form).post(assessment::submit_score),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
