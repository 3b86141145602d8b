//! Server-rendered chat pages.
//!
//! Plain form posts with a 303 redirect back to the transcript, so a page
//! reload never resubmits a message.

use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::shell::{escape, format_reply, html_shell, query_value};
use crate::AppState;
use crate::conversation::{ChatMessage, Conversation, SenderType};
use crate::security::DEMO_USER_ID;

/// First message of every chat.
pub const GREETING: &str = "Hi! I'm CareerWise AI, your personal career guidance assistant. How can I help you with your career today?";

/// Questions offered under the input box.
pub const SUGGESTIONS: [&str; 3] = [
    "What career should I pursue?",
    "How do I improve my resume?",
    "Interview preparation tips",
];

const INPUT_PLACEHOLDER: &str =
    "Ask about career paths, skills, interview tips, or any career question...";

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatQuery {
    /// Text to pre-fill the input with.
    #[serde(default)]
    pub prompt: Option<String>,
}

fn message_html(sender: SenderType, body_html: &str, time: Option<&str>) -> String {
    let class = match sender {
        SenderType::User => "user",
        SenderType::Assistant => "assistant",
        SenderType::System => "system",
    };
    let time = time
        .map(|t| format!(r#"<time class="message-time">{t}</time>"#))
        .unwrap_or_default();
    format!(r#"<div class="message {class}"><div class="message-body">{body_html}</div>{time}</div>"#)
}

fn render_message(msg: &ChatMessage) -> String {
    let body = match msg.sender_type {
        SenderType::Assistant => format_reply(&msg.content),
        _ => escape(&msg.content),
    };
    let time = msg.created_at.format("%H:%M").to_string();
    message_html(msg.sender_type, &body, Some(&time))
}

/// Render the chat page. `conversation_id` is the form target; `None` posts
/// to `/chat` which starts a new conversation.
fn chat_page(conversation_id: Option<&str>, messages: &[ChatMessage], prefill: &str) -> String {
    let mut transcript = message_html(SenderType::Assistant, &escape(GREETING), None);
    for msg in messages {
        transcript.push_str(&render_message(msg));
    }

    let action = match conversation_id {
        Some(id) => format!("/chat/{}", escape(id)),
        None => "/chat".to_string(),
    };

    let base = conversation_id.map_or_else(|| "/chat".to_string(), |id| format!("/chat/{}", escape(id)));
    let suggestions: String = SUGGESTIONS
        .iter()
        .map(|s| {
            format!(
                r#"<a class="chip" href="{base}?prompt={}">{}</a>"#,
                query_value(s),
                escape(s)
            )
        })
        .collect();

    let content = format!(
        r#"<div class="chat-page">
    <header class="chat-header">
        <a href="/" class="back-link">&larr; Home</a>
        <div>
            <h1>CareerWise AI</h1>
            <p>Your Personal Career Guidance Assistant</p>
        </div>
        <a href="/chat" class="btn btn-outline">New chat</a>
    </header>
    <section id="messages" class="chat-messages">{transcript}</section>
    <form method="post" action="{action}" class="chat-form">
        <input type="text" name="message" value="{prefill}" placeholder="{INPUT_PLACEHOLDER}" autocomplete="off" autofocus>
        <button type="submit" class="btn btn-primary">Send</button>
    </form>
    <nav class="suggestions">{suggestions}</nav>
</div>"#,
        prefill = escape(prefill),
    );

    html_shell("Chat", &content)
}

/// Store the user message and the advisor's reply.
async fn exchange(state: &AppState, conversation: &Conversation, message: &str) {
    let user_type = conversation
        .user_type()
        .unwrap_or_else(|| state.profiles.user_type_of(DEMO_USER_ID));
    let history = conversation.history();

    conversation.add_user_message(message, None);
    let reply = state
        .advisor
        .generate_response(message, &history, user_type)
        .await;
    conversation.add_assistant_message(reply, None);
}

/// `GET /chat`
pub async fn new_chat(Query(query): Query<ChatQuery>) -> Html<String> {
    Html(chat_page(None, &[], query.prompt.as_deref().unwrap_or("")))
}

/// `POST /chat`: start a conversation with the first message.
pub async fn start_chat(State(state): State<AppState>, Form(form): Form<ChatForm>) -> Redirect {
    if form.message.trim().is_empty() {
        return Redirect::to("/chat");
    }

    let conversation = state.conversations.create(DEMO_USER_ID, None, None);
    exchange(&state, &conversation, &form.message).await;
    Redirect::to(&format!("/chat/{}", conversation.id()))
}

/// `GET /chat/{id}`
pub async fn show_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ChatQuery>,
) -> Response {
    match state.conversations.get_for_user(&id, DEMO_USER_ID) {
        Some(conversation) => Html(chat_page(
            Some(conversation.id()),
            &conversation.messages(),
            query.prompt.as_deref().unwrap_or(""),
        ))
        .into_response(),
        None => (StatusCode::NOT_FOUND, Html(super::not_found_page())).into_response(),
    }
}

/// `POST /chat/{id}`: blank input changes nothing.
pub async fn post_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ChatForm>,
) -> Response {
    let Some(conversation) = state.conversations.get_for_user(&id, DEMO_USER_ID) else {
        return (StatusCode::NOT_FOUND, Html(super::not_found_page())).into_response();
    };

    if !form.message.trim().is_empty() {
        exchange(&state, &conversation, &form.message).await;
    }
    Redirect::to(&format!("/chat/{}", conversation.id())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chat_page() {
        let html = chat_page(None, &[], "");
        assert!(html.contains("Hi! I&#39;m CareerWise AI"));
        assert!(html.contains(r#"action="/chat""#));
        for s in SUGGESTIONS {
            assert!(html.contains(&escape(s)));
        }
    }

    #[test]
    fn test_prefill_is_escaped() {
        let html = chat_page(Some("abc"), &[], r#""><script>"#);
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"action="/chat/abc""#));
    }
}
