//! Assessment form and score submission: `GET/POST /assessment`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use lti_core::markup::escape;
use lti_core::outcome::{SCORE_FIELD, SOURCED_ID_FIELD};
use lti_core::session::DEFAULT_DISPLAY_NAME;
use lti_core::{
    LaunchSession, OutcomeError, PostedOutcome, ScoreSubmission, SessionId, SubmissionError,
};
use serde::Deserialize;

use super::session::{SESSION_FIELD, assessment_location, resolve_session_id};
use crate::AppState;

/// Query string of `GET /assessment`
#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub session: Option<String>,
}

/// Fields posted by the assessment form
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScoreForm {
    pub score: Option<String>,
    pub sourced_id: Option<String>,
    pub session: Option<String>,
}

impl ScoreForm {
    /// Read the form body, whatever it holds
    ///
    /// Unknown fields are ignored and a repeated field keeps its last value.
    /// A body that is not a form simply yields no fields.
    pub fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            let slot = match key.as_ref() {
                SCORE_FIELD => &mut form.score,
                SOURCED_ID_FIELD => &mut form.sourced_id,
                SESSION_FIELD => &mut form.session,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        form
    }
}

/// Render the form for the current launch
pub async fn show_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FormQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let id = resolve_session_id(query.session.as_deref(), &headers);
    let session = lookup(&state, id).await;

    let name = session
        .as_ref()
        .map(LaunchSession::display_name)
        .unwrap_or(DEFAULT_DISPLAY_NAME);
    let id = session.as_ref().and(id);

    Html(render_form(name, id))
}

/// Relay a submitted score to the consumer's outcome service
pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let form = ScoreForm::parse(&body);
    let id = resolve_session_id(form.session.as_deref(), &headers);

    let submission =
        match ScoreSubmission::from_form(form.sourced_id.as_deref(), form.score.as_deref()) {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!("Score submission incomplete: {}", err);
                return (StatusCode::FOUND, [(LOCATION, assessment_location(id))]).into_response();
            }
        };

    let Some(session) = lookup(&state, id).await else {
        tracing::warn!("Score submitted without an active launch");
        return no_active_launch_message(&SubmissionError::NoActiveLaunch).into_response();
    };

    let result = state
        .outcome_poster
        .post_score(&session.outcome_service_url, &submission)
        .await;
    if let Err(err) = &result {
        tracing::warn!(url = %session.outcome_service_url, "Outcome post failed: {}", err);
    }

    render_result(&result).into_response()
}

async fn lookup(state: &AppState, id: Option<SessionId>) -> Option<LaunchSession> {
    match id {
        Some(id) => state.sessions.get(&id).await,
        None => None,
    }
}

/// HTML page asking the learner for a score
pub fn render_form(name: &str, session: Option<SessionId>) -> String {
    let session_field = session
        .map(|id| format!(r#"<input name="session" type="hidden" value="{}" />"#, id))
        .unwrap_or_default();

    format!(
        r#"<html>
  <head><title>Demo LTI Assessment Tool</title></head>
  <body>
    <h1>Demo LTI Assessment Tool</h1>
    <form action="/assessment" method="post">
      <p>Hi, {name}. On a scale of <code>0.0</code> to <code>1.0</code>, how well would you say you did on this assessment?</p>
      {session_field}
      <label>SourcedId (tool.id-course.id-assignment.id-user.id-hmac_sha1)</label><br />
      <input name="sourcedId" type="text" id="sourcedId" style="width: 350px" /><br />
      <label>Score</label><br />
      <input name="score" type="text" width="5" id="score" value="1" /><br />
      <input type="submit" value="Submit" />
      <p>If you want to enter an invalid score here, you can see how the learning platform will reject it.</p>
    </form>
  </body>
</html>
"#,
        name = escape(name),
        session_field = session_field,
    )
}

/// Plain-text summary of an outcome post
pub fn render_result(result: &Result<PostedOutcome, OutcomeError>) -> String {
    let (verb, body) = match result {
        Ok(posted) => ("been posted", posted.body.clone()),
        Err(OutcomeError::Rejected { body, .. }) => ("failed in posting", body.clone()),
        Err(err) => ("failed in posting", format!("(no response: {})", err)),
    };

    format!(
        "Your score has {} to the learning platform. The response was:\n\n{}\n",
        verb, body
    )
}

fn no_active_launch_message(err: &SubmissionError) -> String {
    format!(
        "{}. Launch this tool from your course again, then submit your score.",
        err
    )
}
