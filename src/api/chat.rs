//! Chat endpoints under `/api/v1/chat`.

use std::convert::Infallible;

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderValue, header},
    response::Response,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::conversation::{ChatMessage, Conversation, ConversationSummary, SenderType};
use crate::error::AppError;
use crate::guidance::UserType;
use crate::normalized::{NormalizedEvent, sse_event};
use crate::security::{DEMO_USER_ID, UserContext};

/// Routes that act on a user's conversations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/conversation/create", post(create_conversation))
        .route("/conversations", get(list_conversations))
        .route("/conversation/{id}/message", post(send_message))
        .route("/conversation/{id}/messages", get(get_messages))
        .route("/conversation/{id}/stream", post(stream_message))
}

/// Demo and status routes that never require a token.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/simple", post(simple_chat))
        .route("/test", get(test_endpoint))
        .route("/health", get(chat_health))
}

/// Optional body for conversation creation.
#[derive(Debug, Default, Deserialize)]
pub struct ConversationCreate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
}

/// Body for `/simple`.
#[derive(Debug, Deserialize)]
pub struct SimpleChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
}

/// Body for posting into a conversation.
#[derive(Debug, Deserialize)]
pub struct MessageCreate {
    pub content: String,
    #[serde(default = "default_sender")]
    pub message_type: SenderType,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

fn default_sender() -> SenderType {
    SenderType::User
}

/// Reply returned by the chat endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message_id: String,
    pub conversation_id: String,
    pub response: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

fn parse_user_type(raw: Option<&str>) -> Result<Option<UserType>, AppError> {
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<UserType>())
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))
}

fn require_text(text: &str, field: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn owned_conversation(
    state: &AppState,
    id: &str,
    user: &UserContext,
) -> Result<Conversation, AppError> {
    state
        .conversations
        .get_for_user(id, &user.user_id)
        .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))
}

/// `POST /conversation/create`
///
/// The body is optional; browsers post with none.
async fn create_conversation(
    State(state): State<AppState>,
    user: UserContext,
    body: Bytes,
) -> Result<Json<ConversationSummary>, AppError> {
    let request: ConversationCreate = if body.iter().all(u8::is_ascii_whitespace) {
        ConversationCreate::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("invalid request body: {e}")))?
    };

    let user_type = parse_user_type(request.user_type.as_deref())?;
    let conversation = state
        .conversations
        .create(&user.user_id, request.title, user_type);

    tracing::info!(
        name: "chat.conversation.created",
        conversation_id = %conversation.id(),
        user_id = %user.user_id,
        "Conversation created"
    );

    Ok(Json(conversation.summary()))
}

/// `POST /simple`: one-shot reply without history.
async fn simple_chat(
    State(state): State<AppState>,
    user: UserContext,
    WithRejection(Json(request), _): WithRejection<Json<SimpleChatRequest>, AppError>,
) -> Result<Json<ChatResponse>, AppError> {
    require_text(&request.message, "message")?;

    let user_type = match parse_user_type(request.user_type.as_deref())? {
        Some(t) => t,
        None => state.profiles.user_type_of(&user.user_id),
    };

    let response = state
        .advisor
        .generate_response(&request.message, &[], user_type)
        .await;

    let conversation_id = request
        .conversation_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("demo-conv-{}", Utc::now().timestamp_millis()));

    Ok(Json(ChatResponse {
        message_id: Uuid::new_v4().to_string(),
        conversation_id,
        response,
        user_type,
        metadata: Some(json!({ "demo_mode": true })),
    }))
}

/// `GET /conversations`
async fn list_conversations(
    State(state): State<AppState>,
    user: UserContext,
) -> Json<Vec<ConversationSummary>> {
    Json(state.conversations.list_for_user(&user.user_id))
}

/// `POST /conversation/{id}/message`
async fn send_message(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<MessageCreate>, AppError>,
) -> Result<Json<ChatResponse>, AppError> {
    require_text(&request.content, "content")?;
    let conversation = owned_conversation(&state, &id, &user)?;

    let user_type = conversation
        .user_type()
        .unwrap_or_else(|| state.profiles.user_type_of(&user.user_id));
    // History is captured before the new message so it is not sent twice.
    let history = conversation.history();

    conversation.add_message(request.message_type, &request.content, request.metadata);

    let response = state
        .advisor
        .generate_response(&request.content, &history, user_type)
        .await;

    let reply = conversation.add_assistant_message(
        response.clone(),
        Some(json!({ "user_type": user_type })),
    );

    Ok(Json(ChatResponse {
        message_id: reply.id,
        conversation_id: id,
        response,
        user_type,
        metadata: reply.metadata,
    }))
}

/// `GET /conversation/{id}/messages`
async fn get_messages(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let conversation = owned_conversation(&state, &id, &user)?;
    Ok(Json(conversation.messages()))
}

/// `POST /conversation/{id}/stream`
///
/// Emits one `message.delta` event per chunk, then `done`. Both messages are
/// stored once the reply has been fully streamed.
async fn stream_message(
    State(state): State<AppState>,
    user: UserContext,
    Path(id): Path<String>,
    WithRejection(Json(request), _): WithRejection<Json<MessageCreate>, AppError>,
) -> Result<Response, AppError> {
    require_text(&request.content, "content")?;
    let conversation = owned_conversation(&state, &id, &user)?;

    let user_type = conversation
        .user_type()
        .unwrap_or_else(|| state.profiles.user_type_of(&user.user_id));
    let history = conversation.history();

    let mut chunks = state
        .advisor
        .stream_response(&request.content, &history, user_type)
        .await;

    let body = async_stream::stream! {
        let mut full = String::new();
        while let Some(text) = chunks.next().await {
            full.push_str(&text);
            yield Ok::<_, Infallible>(sse_event(&NormalizedEvent::MessageDelta { text }));
        }

        conversation.add_message(request.message_type, request.content, request.metadata);
        conversation.add_assistant_message(full, Some(json!({ "user_type": user_type })));

        yield Ok(sse_event(&NormalizedEvent::Done));
    };

    Ok(build_sse_response(Body::from_stream(body)))
}

fn build_sse_response(body: Body) -> Response {
    let mut resp = Response::new(body);
    let h = resp.headers_mut();
    h.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/event-stream"));
    h.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    h.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    h.insert("X-Accel-Buffering", HeaderValue::from_static("no"));
    resp
}

#[derive(Debug, Serialize)]
struct TestResponse {
    message: &'static str,
    timestamp: DateTime<Utc>,
    status: &'static str,
    ai_service_available: bool,
    demo_user_id: &'static str,
}

/// `GET /test`
async fn test_endpoint(State(state): State<AppState>) -> Json<TestResponse> {
    Json(TestResponse {
        message: "Chat API is working!",
        timestamp: Utc::now(),
        status: "healthy",
        ai_service_available: state.advisor.is_live(),
        demo_user_id: DEMO_USER_ID,
    })
}

/// `GET /health`
async fn chat_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "services": {
            "ai": state.advisor.is_live(),
            "conversations": state.conversations.len(),
        },
        "timestamp": Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_type() {
        assert_eq!(parse_user_type(None).unwrap(), None);
        assert_eq!(parse_user_type(Some("")).unwrap(), None);
        assert_eq!(
            parse_user_type(Some("entrepreneur")).unwrap(),
            Some(UserType::Entrepreneur)
        );
        assert!(matches!(
            parse_user_type(Some("pirate")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_message_create_defaults_to_user() {
        let req: MessageCreate = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
        assert_eq!(req.message_type, SenderType::User);
        assert!(req.metadata.is_none());
    }

    #[test]
    fn test_sse_headers() {
        let resp = build_sse_response(Body::empty());
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static("text/event-stream")
        );
    }
}
