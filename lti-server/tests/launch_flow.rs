//! Launch verification through the HTTP surface
//!
//! A consumer posts a signed launch to `/assessment/start`; a valid
//! assignment launch lands the learner on the form, everything else gets an
//! explanation and leaves the session store alone.

mod common;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderValue;
use lti_server::ServerConfig;
use lti_server::http::{HealthResponse, SESSION_COOKIE};

const OUTCOMES: &str = "http://consumer.example/outcomes";

#[tokio::test]
async fn valid_launch_redirects_to_assessment_with_session() {
    let (state, server) = common::create_test_server();

    let response = server
        .post(common::LAUNCH_PATH)
        .form(&common::signed_launch(
            "secret",
            &[
                ("lis_outcome_service_url", OUTCOMES),
                ("lis_person_name_full", "Jane Doe"),
                ("lis_person_contact_email_primary", "jane@example.edu"),
            ],
        ))
        .await;

    assert_eq!(response.status_code(), 302);
    let location = response.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with("/assessment?session="));

    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with(&format!("{}=", SESSION_COOKIE)));

    let id = common::session_from_location(location).parse().unwrap();
    let session = state.sessions.get(&id).await.unwrap();
    assert_eq!(session.outcome_service_url, OUTCOMES);
    assert_eq!(session.person_name.as_deref(), Some("Jane Doe"));
    assert_eq!(session.person_email.as_deref(), Some("jane@example.edu"));
}

#[tokio::test]
async fn form_greets_launched_learner_by_name() {
    let (_state, server) = common::create_test_server();

    let location = common::launch(
        &server,
        &[
            ("lis_outcome_service_url", OUTCOMES),
            ("lis_person_name_full", "Jane Doe"),
        ],
    )
    .await;

    let response = server.get(&location).await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Hi, Jane Doe."));
    assert!(html.contains(&format!(
        r#"value="{}""#,
        common::session_from_location(&location)
    )));
}

#[tokio::test]
async fn form_falls_back_to_student_without_name() {
    let (_state, server) = common::create_test_server();

    let location = common::launch(&server, &[("lis_outcome_service_url", OUTCOMES)]).await;

    let response = server.get(&location).await;
    response.assert_status_ok();
    assert!(response.text().contains("Hi, Student."));
}

#[tokio::test]
async fn form_finds_session_through_cookie() {
    let (_state, server) = common::create_test_server();

    let location = common::launch(
        &server,
        &[
            ("lis_outcome_service_url", OUTCOMES),
            ("lis_person_name_full", "Cookie Learner"),
        ],
    )
    .await;
    let id = common::session_from_location(&location);

    let response = server
        .get("/assessment")
        .add_header(
            COOKIE,
            HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, id)).unwrap(),
        )
        .await;
    assert!(response.text().contains("Hi, Cookie Learner."));
}

#[tokio::test]
async fn wrong_secret_is_rejected_without_session() {
    let (state, server) = common::create_test_server();

    let response = server
        .post(common::LAUNCH_PATH)
        .form(&common::signed_launch(
            "not-the-secret",
            &[("lis_outcome_service_url", OUTCOMES)],
        ))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.text(),
        r#"unauthorized attempt. make sure you used the consumer secret "secret""#
    );
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn unsigned_launch_is_rejected() {
    let (state, server) = common::create_test_server();

    let response = server
        .post(common::LAUNCH_PATH)
        .form(&[("lis_outcome_service_url", OUTCOMES)])
        .await;

    response.assert_status_ok();
    assert!(response.text().starts_with("unauthorized attempt."));
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn rejection_hides_secret_when_echo_disabled() {
    let mut config = common::test_config();
    config.oauth.echo_secret_on_failure = false;
    let (_state, server) = common::create_test_server_with_config(config);

    let response = server
        .post(common::LAUNCH_PATH)
        .form(&common::signed_launch(
            "wrong",
            &[("lis_outcome_service_url", OUTCOMES)],
        ))
        .await;

    let text = response.text();
    assert!(text.starts_with("unauthorized attempt."));
    assert!(!text.contains("\"secret\""));
}

#[tokio::test]
async fn launch_without_outcome_url_is_not_an_assignment() {
    let (state, server) = common::create_test_server();

    let location = common::launch(
        &server,
        &[
            ("lis_outcome_service_url", OUTCOMES),
            ("lis_person_name_full", "First"),
        ],
    )
    .await;
    let id = common::session_from_location(&location).parse().unwrap();

    let response = server
        .post(common::LAUNCH_PATH)
        .form(&common::signed_launch(
            "secret",
            &[("lis_person_name_full", "Second")],
        ))
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("wasn't launched as an assignment"));
    assert_eq!(state.sessions.len().await, 1);
    assert_eq!(
        state.sessions.get(&id).await.unwrap().person_name.as_deref(),
        Some("First")
    );
}

#[tokio::test]
async fn concurrent_learners_keep_their_own_sessions() {
    let (_state, server) = common::create_test_server();

    let alice = common::launch(
        &server,
        &[
            ("lis_outcome_service_url", OUTCOMES),
            ("lis_person_name_full", "Alice"),
        ],
    )
    .await;
    let bob = common::launch(
        &server,
        &[
            ("lis_outcome_service_url", OUTCOMES),
            ("lis_person_name_full", "Bob"),
        ],
    )
    .await;

    assert!(server.get(&alice).await.text().contains("Hi, Alice."));
    assert!(server.get(&bob).await.text().contains("Hi, Bob."));
}

#[tokio::test]
async fn relaunch_from_same_browser_replaces_session() {
    let (state, server) = common::create_test_server();

    let first = common::launch(&server, &[("lis_outcome_service_url", OUTCOMES)]).await;
    let first_id = common::session_from_location(&first);

    let response = server
        .post(common::LAUNCH_PATH)
        .add_header(
            COOKIE,
            HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, first_id)).unwrap(),
        )
        .form(&common::signed_launch(
            "secret",
            &[("lis_outcome_service_url", OUTCOMES)],
        ))
        .await;
    assert_eq!(response.status_code(), 302);

    assert_eq!(state.sessions.len().await, 1);
    assert!(
        state
            .sessions
            .get(&first_id.parse().unwrap())
            .await
            .is_none()
    );
}

#[tokio::test]
async fn launch_signed_against_other_host_is_rejected() {
    let config = ServerConfig::default().with_public_url("https://elsewhere.example");
    let (state, server) = common::create_test_server_with_config(config);

    let response = server
        .post(common::LAUNCH_PATH)
        .form(&common::signed_launch(
            "secret",
            &[("lis_outcome_service_url", OUTCOMES)],
        ))
        .await;

    assert!(response.text().starts_with("unauthorized attempt."));
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn health_reports_session_count() {
    let (_state, server) = common::create_test_server();
    common::launch(&server, &[("lis_outcome_service_url", OUTCOMES)]).await;

    let health: HealthResponse = server.get("/api/health").await.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.active_sessions, 1);
}

#[tokio::test]
async fn launch_over_http_sets_lax_cookie() {
    let (_state, server) = common::create_test_server();

    let response = server
        .post(common::LAUNCH_PATH)
        .form(&common::signed_launch(
            "secret",
            &[("lis_outcome_service_url", OUTCOMES)],
        ))
        .await;

    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.ends_with("SameSite=Lax"));
}

#[tokio::test]
async fn launch_over_https_sets_cross_site_cookie() {
    let config = ServerConfig::default().with_public_url("https://tool.example");
    let (_state, server) = common::create_test_server_with_config(config);

    let url = url::Url::parse("https://tool.example/assessment/start").unwrap();
    let params = lti_core::OAuthSigner::new(lti_core::ToolCredentials::new("test", "secret"))
        .sign_form(
            "POST",
            &url,
            vec![("lis_outcome_service_url".to_string(), OUTCOMES.to_string())],
        );

    let response = server.post(common::LAUNCH_PATH).form(&params).await;

    assert_eq!(response.status_code(), 302);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.contains("SameSite=None; Secure"));
}

#[tokio::test]
async fn launch_with_mixed_case_form_content_type_is_accepted() {
    let (state, server) = common::create_test_server();

    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(common::signed_launch(
            "secret",
            &[("lis_outcome_service_url", OUTCOMES)],
        ))
        .finish();

    let response = server
        .post(common::LAUNCH_PATH)
        .content_type("Application/X-WWW-Form-Urlencoded; charset=UTF-8")
        .bytes(body.into())
        .await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(state.sessions.len().await, 1);
}
