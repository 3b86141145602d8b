//! Shared types for the SDK.
//!
//! These types mirror the server's API DTOs. Enumerations the server owns
//! (user type, experience level, conversation status) are kept as strings so
//! a newer server does not break older clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Chat session types
// =============================================================================

/// Author of a message in a [`ChatSession`](crate::ChatSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the user.
    User,
    /// Produced by the assistant, including the greeting and fallbacks.
    Assistant,
}

/// One entry of the local chat transcript. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub(crate) fn new(id: impl Into<String>, content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            sender,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Chat API types
// =============================================================================

/// Body of `POST /api/v1/chat/conversation/create`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationCreate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

/// Conversation as listed by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub user_id: String,
    pub title: String,
    pub status: String,
    #[serde(default)]
    pub user_type: Option<String>,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/v1/chat/simple`.
#[derive(Debug, Clone, Serialize)]
pub struct SimpleChatRequest {
    /// The user's message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

/// Assistant reply. Only `message_id` and `response` are guaranteed.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message_id: String,
    pub response: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Body of `POST /api/v1/chat/conversation/{id}/message`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageCreate {
    pub content: String,
}

/// Message stored by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerMessage {
    pub id: String,
    pub conversation_id: String,
    pub content: String,
    /// `user`, `assistant` or `system`.
    pub sender_type: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Users API types
// =============================================================================

/// A user's career profile.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub user_type: String,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub industry_interests: Vec<String>,
    #[serde(default)]
    pub career_goals: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/v1/users/profile`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProfileCreate {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    pub industry_interests: Vec<String>,
    pub career_goals: Vec<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Body of `PUT /api/v1/users/profile`. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_interests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}
