mod common;

use axum::http::StatusCode;
use careerwise::security::{DEMO_USER_ID, UserClaims};
use common::{TEST_SECRET, offline_server, server_with, test_config};
use careerwise::guidance::CareerAdvisor;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

fn token_for(sub: &str) -> String {
    let claims = UserClaims {
        sub: sub.to_string(),
        name: None,
        roles: None,
        exp: 4_102_444_800, // 2100-01-01
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (server, _) = offline_server();

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "careerwise");

    let chat: Value = server.get("/api/v1/chat/health").await.json();
    assert_eq!(chat["status"], "healthy");

    let test: Value = server.get("/api/v1/chat/test").await.json();
    assert_eq!(test["ai_service_available"], false);
    assert_eq!(test["demo_user_id"], DEMO_USER_ID);
}

#[tokio::test]
async fn test_conversation_flow() {
    let (server, _) = offline_server();

    let created: Value = server
        .post("/api/v1/chat/conversation/create")
        .json(&json!({ "title": "Job hunt", "user_type": "graduate" }))
        .await
        .json();
    let id = created["conversation_id"].as_str().unwrap().to_string();
    assert_eq!(created["title"], "Job hunt");
    assert_eq!(created["user_type"], "graduate");
    assert_eq!(created["message_count"], 0);

    let reply: Value = server
        .post(&format!("/api/v1/chat/conversation/{id}/message"))
        .json(&json!({ "content": "How do I improve my resume?" }))
        .await
        .json();
    assert_eq!(reply["conversation_id"], id.as_str());
    assert_eq!(reply["user_type"], "graduate");
    assert!(
        reply["response"]
            .as_str()
            .unwrap()
            .starts_with("Let's optimize your resume")
    );

    let messages: Value = server
        .get(&format!("/api/v1/chat/conversation/{id}/messages"))
        .await
        .json();
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender_type"], "user");
    assert_eq!(messages[1]["sender_type"], "assistant");
    assert_eq!(messages[1]["id"], reply["message_id"]);

    let list: Value = server.get("/api/v1/chat/conversations").await.json();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["message_count"], 2);
}

#[tokio::test]
async fn test_create_conversation_without_body() {
    let (server, _) = offline_server();

    let created: Value = server.post("/api/v1/chat/conversation/create").await.json();
    assert_eq!(created["title"], "New Conversation");
    assert_eq!(created["user_id"], DEMO_USER_ID);
}

#[tokio::test]
async fn test_blank_message_rejected() {
    let (server, state) = offline_server();
    let conversation = state.conversations.create(DEMO_USER_ID, None, None);

    let response = server
        .post(&format!(
            "/api/v1/chat/conversation/{}/message",
            conversation.id()
        ))
        .json(&json!({ "content": "   " }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(conversation.message_count(), 0);
}

#[tokio::test]
async fn test_unknown_conversation_is_not_found() {
    let (server, _) = offline_server();

    server
        .get("/api/v1/chat/conversation/missing/messages")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stream_saves_messages_after_done() {
    let (server, state) = offline_server();
    let conversation = state.conversations.create(DEMO_USER_ID, None, None);

    let body = server
        .post(&format!(
            "/api/v1/chat/conversation/{}/stream",
            conversation.id()
        ))
        .json(&json!({ "content": "Interview preparation tips" }))
        .await
        .text();

    assert!(body.contains("event: message.delta"));
    assert!(body.trim_end().ends_with(r#"data: {"done":true}"#));

    let messages = conversation.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].content.starts_with("Interview preparation is crucial"));
}

#[tokio::test]
async fn test_simple_chat_uses_profile_user_type() {
    let (server, _) = offline_server();

    server
        .post("/api/v1/users/profile")
        .json(&json!({
            "full_name": "Ada Lovelace",
            "email": "ada@example.com",
            "user_type": "entrepreneur"
        }))
        .await
        .assert_status_ok();

    let reply: Value = server
        .post("/api/v1/chat/simple")
        .json(&json!({ "message": "hello" }))
        .await
        .json();
    assert_eq!(reply["user_type"], "entrepreneur");
    assert_eq!(reply["metadata"]["demo_mode"], true);
    assert!(reply["conversation_id"].as_str().unwrap().starts_with("demo-conv-"));

    let explicit: Value = server
        .post("/api/v1/chat/simple")
        .json(&json!({ "message": "hello", "user_type": "student", "conversation_id": "c-1" }))
        .await
        .json();
    assert_eq!(explicit["user_type"], "student");
    assert_eq!(explicit["conversation_id"], "c-1");
}

#[tokio::test]
async fn test_profile_lifecycle() {
    let (server, _) = offline_server();

    server
        .get("/api/v1/users/profile")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let payload = json!({
        "full_name": "Grace Hopper",
        "email": "grace@example.com",
        "skills": ["COBOL"]
    });
    let created: Value = server.post("/api/v1/users/profile").json(&payload).await.json();
    assert_eq!(created["user_type"], "student");

    server
        .post("/api/v1/users/profile")
        .json(&payload)
        .expect_failure()
        .await
        .assert_status(StatusCode::CONFLICT);

    let updated: Value = server
        .put("/api/v1/users/profile")
        .json(&json!({ "location": "Arlington" }))
        .await
        .json();
    assert_eq!(updated["location"], "Arlington");
    assert_eq!(updated["full_name"], "Grace Hopper");
    assert_eq!(updated["id"], created["id"]);

    let deleted: Value = server.delete("/api/v1/users/profile").await.json();
    assert_eq!(deleted["message"], "Profile deleted successfully");

    server
        .delete("/api/v1/users/profile")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_profile_email() {
    let (server, _) = offline_server();

    let response = server
        .post("/api/v1/users/profile")
        .json(&json!({ "full_name": "No Mail", "email": "not-an-email" }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_jwt_required() {
    let (server, _) = server_with(test_config(true), CareerAdvisor::offline());

    let response = server
        .get("/api/v1/chat/conversations")
        .expect_failure()
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    server
        .get("/api/v1/chat/conversations")
        .authorization_bearer("not-a-token")
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let created: Value = server
        .post("/api/v1/chat/conversation/create")
        .authorization_bearer(token_for("user-7"))
        .await
        .json();
    assert_eq!(created["user_id"], "user-7");
}

#[tokio::test]
async fn test_conversations_are_scoped_to_user() {
    let (server, state) = offline_server();
    let other = state.conversations.create("someone-else", None, None);

    server
        .get(&format!("/api/v1/chat/conversation/{}/messages", other.id()))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let mine: Value = server
        .get(&format!("/api/v1/chat/conversation/{}/messages", other.id()))
        .authorization_bearer(token_for("someone-else"))
        .await
        .json();
    assert!(mine.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let mut config = test_config(false);
    config.resilience.rate_limit_enabled = true;
    config.resilience.requests_per_second = 0.001;
    config.resilience.burst_size = 2.0;
    let (server, _) = server_with(config, CareerAdvisor::offline());

    server.get("/api/v1/chat/conversations").await.assert_status_ok();
    server.get("/api/v1/chat/conversations").await.assert_status_ok();

    let response = server
        .get("/api/v1/chat/conversations")
        .expect_failure()
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    // The public chat routes share the bucket.
    server
        .get("/api/v1/chat/health")
        .expect_failure()
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    // Pages are not rate limited.
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_demo_routes_open_when_jwt_required() {
    let (server, _) = server_with(test_config(true), CareerAdvisor::offline());

    let reply: Value = server
        .post("/api/v1/chat/simple")
        .json(&json!({ "message": "What career should I pursue?" }))
        .await
        .json();
    assert_eq!(reply["user_type"], "student");
    assert_eq!(reply["metadata"]["demo_mode"], true);

    server.get("/api/v1/chat/test").await.assert_status_ok();
    server.get("/api/v1/chat/health").await.assert_status_ok();

    // A token that is sent must still verify.
    server
        .post("/api/v1/chat/simple")
        .authorization_bearer("not-a-token")
        .json(&json!({ "message": "hello" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/api/v1/chat/conversation/create")
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_simple_chat_reads_token_profile() {
    let (server, _) = server_with(test_config(true), CareerAdvisor::offline());
    let token = token_for("user-9");

    server
        .post("/api/v1/users/profile")
        .authorization_bearer(&token)
        .json(&json!({
            "full_name": "Katherine Johnson",
            "email": "katherine@example.com",
            "user_type": "professional"
        }))
        .await
        .assert_status_ok();

    let reply: Value = server
        .post("/api/v1/chat/simple")
        .authorization_bearer(&token)
        .json(&json!({ "message": "hello" }))
        .await
        .json();
    assert_eq!(reply["user_type"], "professional");
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    let (server, _) = offline_server();

    let missing_field = server
        .post("/api/v1/chat/simple")
        .json(&json!({}))
        .expect_failure()
        .await;
    missing_field.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = missing_field.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].as_str().unwrap().contains("message"));

    let not_json = server
        .post("/api/v1/chat/simple")
        .bytes(axum::body::Bytes::from_static(b"not json"))
        .content_type("application/json")
        .expect_failure()
        .await;
    not_json.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = not_json.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let wrong_type = server
        .post("/api/v1/users/profile")
        .text("full_name=Ada")
        .expect_failure()
        .await;
    wrong_type.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = wrong_type.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let bad_field = server
        .put("/api/v1/users/profile")
        .json(&json!({ "skills": "not-a-list" }))
        .expect_failure()
        .await;
    bad_field.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = bad_field.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
