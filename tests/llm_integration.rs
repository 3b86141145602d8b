//! Exercises the chat completions driver against a local stand-in for an
//! OpenAI-compatible endpoint.

mod common;

use axum::{
    Json, Router,
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use careerwise::guidance::{APOLOGY, UserType};
use careerwise::llm::{LlmSettings, Provider};
use careerwise::security::DEMO_USER_ID;
use careerwise::server::build_advisor;
use common::{server_with, test_config};
use futures::StreamExt;
use serde_json::{Value, json};

const REPLY_CHUNKS: [&str; 3] = ["Build ", "a portfolio ", "first."];

async fn completions(Json(body): Json<Value>) -> Response {
    let system = body["messages"][0]["content"].as_str().unwrap_or_default();
    assert!(!system.is_empty());

    if body["stream"].as_bool().unwrap_or(false) {
        let mut sse = String::new();
        for chunk in REPLY_CHUNKS {
            let frame = json!({ "choices": [{ "delta": { "content": chunk } }] });
            sse.push_str(&format!("data: {frame}\n\n"));
        }
        sse.push_str("data: [DONE]\n\n");
        ([(header::CONTENT_TYPE, "text/event-stream")], Body::from(sse)).into_response()
    } else {
        Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": REPLY_CHUNKS.concat() } }]
        }))
        .into_response()
    }
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Serve `app` on an ephemeral port and return settings pointing at it.
async fn spawn_llm(app: Router) -> LlmSettings {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    LlmSettings {
        base_url: format!("http://{addr}/v1"),
        api_key: Some("test-key".to_string()),
        model: "stub-model".to_string(),
        provider: Provider::Generic,
        deployment_name: None,
        api_version: None,
    }
}

#[tokio::test]
async fn test_generate_against_stub() {
    let settings = spawn_llm(Router::new().route("/v1/chat/completions", post(completions))).await;
    let advisor = build_advisor(Some(settings));
    assert!(advisor.is_live());

    let reply = advisor
        .generate_response("What next?", &[], UserType::Graduate)
        .await;
    assert_eq!(reply, "Build a portfolio first.");
}

#[tokio::test]
async fn test_stream_against_stub() {
    let settings = spawn_llm(Router::new().route("/v1/chat/completions", post(completions))).await;
    let advisor = build_advisor(Some(settings));

    let chunks: Vec<String> = advisor
        .stream_response("What next?", &[], UserType::Student)
        .await
        .collect()
        .await;
    assert_eq!(chunks, REPLY_CHUNKS.map(ToString::to_string).to_vec());
}

#[tokio::test]
async fn test_upstream_failure_becomes_apology() {
    let settings = spawn_llm(Router::new().route("/v1/chat/completions", post(broken))).await;
    let advisor = build_advisor(Some(settings));

    let reply = advisor.generate_response("Hi", &[], UserType::Student).await;
    assert_eq!(reply, APOLOGY);

    let chunks: Vec<String> = advisor
        .stream_response("Hi", &[], UserType::Student)
        .await
        .collect()
        .await;
    assert_eq!(chunks, vec![APOLOGY.to_string()]);
}

#[tokio::test]
async fn test_api_stream_with_live_model() {
    let settings = spawn_llm(Router::new().route("/v1/chat/completions", post(completions))).await;
    let (server, state) = server_with(test_config(false), build_advisor(Some(settings)));
    let conversation = state.conversations.create(DEMO_USER_ID, None, None);

    let body = server
        .post(&format!(
            "/api/v1/chat/conversation/{}/stream",
            conversation.id()
        ))
        .json(&json!({ "content": "What next?" }))
        .await
        .text();

    assert_eq!(body.matches("event: message.delta").count(), 3);
    assert!(body.contains(r#"data: {"chunk":"a portfolio "}"#));

    let messages = conversation.messages();
    assert_eq!(messages[1].content, "Build a portfolio first.");
}
