//! Carrying the launch session id between requests
//!
//! LMSs usually frame the tool, and browsers often drop third-party cookies
//! inside frames. The id is therefore also passed along in the redirect
//! query string and the form, and those take precedence over the cookie.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use lti_core::SessionId;

/// Cookie holding the launch session id
pub const SESSION_COOKIE: &str = "lti_session";

/// Query string and form field holding the launch session id
pub const SESSION_FIELD: &str = "session";

const ASSESSMENT_PATH: &str = "/assessment";

/// `Set-Cookie` value for a session
///
/// Launches arrive as cross-site POSTs inside the consumer's frame, where
/// browsers only keep `SameSite=None` cookies, and those must be `Secure`.
/// Over plain HTTP the cookie falls back to `Lax` and the query string and
/// form field carry the session on their own.
pub fn session_cookie(id: &SessionId, secure: bool) -> String {
    let same_site = if secure { "SameSite=None; Secure" } else { "SameSite=Lax" };
    format!("{}={}; Path=/; HttpOnly; {}", SESSION_COOKIE, id, same_site)
}

/// Session id from the `Cookie` header
pub fn cookie_session_id(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find_map(|value| value.parse().ok())
}

/// Session id from an explicit value, falling back to the cookie
pub fn resolve_session_id(explicit: Option<&str>, headers: &HeaderMap) -> Option<SessionId> {
    explicit
        .and_then(|value| value.parse().ok())
        .or_else(|| cookie_session_id(headers))
}

/// Location of the assessment form, keeping the session when known
pub fn assessment_location(id: Option<SessionId>) -> String {
    match id {
        Some(id) => format!("{}?{}={}", ASSESSMENT_PATH, SESSION_FIELD, id),
        None => ASSESSMENT_PATH.to_string(),
    }
}
