//! Launch endpoint: `POST /assessment/start`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, HOST, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use lti_core::LaunchSession;
use lti_core::oauth::parse_authorization_header;
use url::Url;

use super::session::{assessment_location, cookie_session_id, session_cookie};
use crate::AppState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Verify a consumer launch, remember it and send the learner to the form
///
/// Rejections are answered with an explanation and status 200 so the text
/// shows up inside the consumer's frame.
pub async fn start(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = match signed_url(state.public_url.as_deref(), &headers, &uri) {
        Ok(url) => url,
        Err(reason) => {
            tracing::warn!("Cannot reconstruct launch URL: {}", reason);
            return (StatusCode::BAD_REQUEST, reason).into_response();
        }
    };
    let params = launch_parameters(&headers, &body);

    match state.launch_verifier.verify(method.as_str(), &url, &params) {
        Ok(launch) => {
            let previous = cookie_session_id(&headers);
            let id = state
                .sessions
                .replace(previous, LaunchSession::from_launch(launch))
                .await;
            tracing::info!(session = %id, "Launch verified");

            (
                StatusCode::FOUND,
                [
                    (LOCATION, assessment_location(Some(id))),
                    (SET_COOKIE, session_cookie(&id, url.scheme() == "https")),
                ],
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!(url = %url, "Launch rejected: {}", err);
            err.user_message(state.secret_hint()).into_response()
        }
    }
}

/// The URL the consumer signed
///
/// Built from the configured public URL when there is one, otherwise from
/// the `Host` header and `X-Forwarded-Proto`.
fn signed_url(public_url: Option<&str>, headers: &HeaderMap, uri: &Uri) -> Result<Url, String> {
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let base = match public_url {
        Some(base) => base.to_string(),
        None => {
            let host = headers
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .or_else(|| uri.authority().map(|authority| authority.as_str()))
                .ok_or_else(|| "request has no Host header".to_string())?;
            let scheme = headers
                .get(FORWARDED_PROTO)
                .and_then(|value| value.to_str().ok())
                .or_else(|| uri.scheme_str())
                .unwrap_or("http");
            format!("{}://{}", scheme, host)
        }
    };

    Url::parse(&format!("{}{}", base, path_and_query))
        .map_err(|e| format!("invalid launch URL: {}", e))
}

/// Whether a `Content-Type` names a url-encoded form, ignoring case and parameters
fn is_form_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// Form body and `Authorization` header parameters of a launch
fn launch_parameters(headers: &HeaderMap, body: &[u8]) -> Vec<(String, String)> {
    let is_form = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_none_or(is_form_content_type);

    let mut params: Vec<(String, String)> = if is_form {
        url::form_urlencoded::parse(body).into_owned().collect()
    } else {
        Vec::new()
    };

    if let Some(oauth) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_authorization_header)
    {
        params.extend(oauth);
    }

    params
}
