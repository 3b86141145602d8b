mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use careerwise::security::DEMO_USER_ID;
use careerwise::ui::chat::GREETING;
use common::offline_server;

fn cookie(value: &'static str) -> (HeaderName, HeaderValue) {
    (HeaderName::from_static("cookie"), HeaderValue::from_static(value))
}

#[tokio::test]
async fn test_landing_page() {
    let (server, _) = offline_server();

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("CareerWise"));
    assert!(html.contains(r#"action="/chat""#));
}

#[tokio::test]
async fn test_unknown_page_is_404() {
    let (server, _) = offline_server();

    let response = server.get("/no/such/page").expect_failure().await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("Page not found"));
}

#[tokio::test]
async fn test_new_chat_shows_greeting_and_suggestions() {
    let (server, _) = offline_server();

    let html = server.get("/chat").await.text();
    assert!(html.contains("How can I help you with your career today?"));
    assert!(html.contains("Interview preparation tips"));
    assert!(GREETING.starts_with("Hi! I'm CareerWise AI"));
}

#[tokio::test]
async fn test_chat_prefill_is_escaped() {
    let (server, _) = offline_server();

    let html = server
        .get("/chat")
        .add_query_param("prompt", "<script>")
        .await
        .text();
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn test_chat_round_trip() {
    let (server, state) = offline_server();

    let response = server
        .post("/chat")
        .form(&[("message", "How do I improve my resume?")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    let location = response.header("location");
    let location = location.to_str().unwrap().to_string();
    assert!(location.starts_with("/chat/"));

    let conversations = state.conversations.list_for_user(DEMO_USER_ID);
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].message_count, 2);

    let html = server.get(&location).await.text();
    assert!(html.contains("How do I improve my resume?"));
    assert!(html.contains("<strong>"));

    server
        .post(&location)
        .form(&[("message", "Interview preparation tips")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    // Blank input is ignored.
    server
        .post(&location)
        .form(&[("message", "   ")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let conversations = state.conversations.list_for_user(DEMO_USER_ID);
    assert_eq!(conversations[0].message_count, 4);
}

#[tokio::test]
async fn test_blank_first_message_starts_nothing() {
    let (server, state) = offline_server();

    let response = server.post("/chat").form(&[("message", "")]).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/chat");
    assert!(state.conversations.is_empty());
}

#[tokio::test]
async fn test_missing_chat_is_404() {
    let (server, _) = offline_server();

    server
        .get("/chat/does-not-exist")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_pages() {
    let (server, _) = offline_server();

    let html = server.get("/dashboard").await.text();
    assert!(html.contains("Welcome back, there!"));

    for section in [
        "resume",
        "assessments",
        "interview",
        "learning",
        "goals",
        "analytics",
        "profile",
        "settings",
    ] {
        server
            .get(&format!("/dashboard/{section}"))
            .await
            .assert_status_ok();
    }

    server
        .get("/dashboard/unknown")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_interview_practice_question() {
    let (server, _) = offline_server();

    let html = server
        .get("/dashboard/interview")
        .add_query_param("question", "1")
        .await
        .text();
    assert!(html.contains("Tell me about yourself."));
    assert!(html.contains("Sample Answer Structure"));
}

#[tokio::test]
async fn test_pending_onboarding_redirects_dashboard() {
    let (server, _) = offline_server();
    let (name, value) = cookie("careerwise_onboarding=pending");

    let response = server.get("/dashboard").add_header(name, value).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/onboarding");
}

#[tokio::test]
async fn test_legacy_cookie_is_honoured() {
    let (server, _) = offline_server();
    let (name, value) = cookie("careerwise_needs_onboarding=true");

    let response = server.get("/dashboard/goals").add_header(name, value).await;
    response.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_onboarding_sets_pending() {
    let (server, _) = offline_server();

    let response = server.get("/onboarding").await;
    response.assert_status_ok();
    assert_eq!(response.cookie("careerwise_onboarding").value(), "pending");
    assert!(response.text().contains("Let's get to know you"));
}

#[tokio::test]
async fn test_onboarding_submit_saves_profile() {
    let (server, state) = offline_server();

    let response = server
        .post("/onboarding")
        .form(&[
            ("full_name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("user_type", "professional"),
            ("experience_level", "senior"),
            ("skills", "Math, Engines"),
            ("location", ""),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard");
    assert_eq!(response.cookie("careerwise_onboarding").value(), "completed");

    let profile = state.profiles.get(DEMO_USER_ID).unwrap();
    assert_eq!(profile.skills, vec!["Math".to_string(), "Engines".to_string()]);
    assert!(profile.location.is_none());

    let (name, value) = cookie("careerwise_onboarding=completed");
    let html = server.get("/dashboard").add_header(name, value).await.text();
    assert!(html.contains("Welcome back, Ada!"));
}

#[tokio::test]
async fn test_onboarding_invalid_email_rerenders_form() {
    let (server, state) = offline_server();

    let response = server
        .post("/onboarding")
        .form(&[("full_name", "Ada"), ("email", "nope")])
        .expect_failure()
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains(r#"value="Ada""#));
    assert!(state.profiles.get(DEMO_USER_ID).is_none());
}
