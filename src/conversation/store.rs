//! Conversation threads and the conversation store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::guidance::UserType;
use crate::llm::Message;

/// Title given to conversations created without one.
pub const DEFAULT_TITLE: &str = "New Conversation";

/// Default inactivity timeout (30 minutes).
const DEFAULT_CONVERSATION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    /// Typed by the user.
    User,
    /// Produced by the advisor.
    Assistant,
    /// Injected by the system.
    System,
}

/// A single message in a conversation. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: String,
    /// Conversation this message belongs to.
    pub conversation_id: String,
    /// Message text.
    pub content: String,
    /// Author of the message.
    pub sender_type: SenderType,
    /// Free-form metadata supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Convert to a model message.
    #[must_use]
    pub fn to_llm_message(&self) -> Message {
        match self.sender_type {
            SenderType::User => Message::user(self.content.clone()),
            SenderType::Assistant => Message::assistant(self.content.clone()),
            SenderType::System => Message::system(self.content.clone()),
        }
    }
}

/// Lifecycle state of a conversation.
///
/// Conversations stay active until the expiry sweep drops them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    /// Open for new messages.
    #[default]
    Active,
}

/// Serializable snapshot of a conversation without its messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// Conversation identifier.
    pub conversation_id: String,
    /// Owner.
    pub user_id: String,
    /// Display title.
    pub title: String,
    /// Lifecycle state.
    pub status: ConversationStatus,
    /// Audience the conversation was started for.
    pub user_type: Option<UserType>,
    /// Number of stored messages.
    pub message_count: usize,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last activity time.
    pub updated_at: DateTime<Utc>,
}

/// A single conversation.
///
/// Cloning is cheap; clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct Conversation {
    inner: Arc<ConversationInner>,
}

#[derive(Debug)]
struct ConversationInner {
    id: String,
    user_id: String,
    user_type: Option<UserType>,
    created_at: DateTime<Utc>,
    title: String,
    messages: RwLock<Vec<ChatMessage>>,
    updated_at: RwLock<DateTime<Utc>>,
}

impl Conversation {
    fn new(id: String, user_id: String, title: String, user_type: Option<UserType>) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(ConversationInner {
                id,
                user_id,
                user_type,
                created_at: now,
                title,
                messages: RwLock::new(Vec::new()),
                updated_at: RwLock::new(now),
            }),
        }
    }

    /// Get the conversation ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Get the owning user ID.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.inner.user_id
    }

    /// Audience the conversation was started for, if any.
    #[must_use]
    pub fn user_type(&self) -> Option<UserType> {
        self.inner.user_type
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.inner.title
    }

    /// Append a user message.
    pub fn add_user_message(
        &self,
        content: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) -> ChatMessage {
        self.add_message(SenderType::User, content, metadata)
    }

    /// Append an assistant message.
    pub fn add_assistant_message(
        &self,
        content: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) -> ChatMessage {
        self.add_message(SenderType::Assistant, content, metadata)
    }

    /// Append a message and return the stored copy.
    pub fn add_message(
        &self,
        sender_type: SenderType,
        content: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            conversation_id: self.inner.id.clone(),
            content: content.into(),
            sender_type,
            metadata,
            created_at: Utc::now(),
        };

        let mut guard = self.inner.messages.write().unwrap();
        guard.push(message.clone());
        drop(guard);
        self.touch();

        message
    }

    /// Get all messages in order.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.messages.read().unwrap().clone()
    }

    /// Get the conversation as model messages.
    #[must_use]
    pub fn history(&self) -> Vec<Message> {
        self.inner
            .messages
            .read()
            .unwrap()
            .iter()
            .map(ChatMessage::to_llm_message)
            .collect()
    }

    /// Get the number of messages in the conversation.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.inner.messages.read().unwrap().len()
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Last activity time.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        *self.inner.updated_at.read().unwrap()
    }

    /// Snapshot without messages.
    #[must_use]
    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            conversation_id: self.inner.id.clone(),
            user_id: self.inner.user_id.clone(),
            title: self.inner.title.clone(),
            status: ConversationStatus::Active,
            user_type: self.inner.user_type,
            message_count: self.message_count(),
            created_at: self.inner.created_at,
            updated_at: self.updated_at(),
        }
    }

    /// Update the last activity timestamp.
    fn touch(&self) {
        *self.inner.updated_at.write().unwrap() = Utc::now();
    }

    /// Check if the conversation has been idle longer than the default timeout.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_with_timeout(DEFAULT_CONVERSATION_TIMEOUT)
    }

    /// Check if the conversation has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let idle = Utc::now() - self.updated_at();
        // Negative means clock skew; treat as fresh.
        idle.to_std().is_ok_and(|idle| idle > timeout)
    }
}

/// Thread-safe store for conversations.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    inner: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl ConversationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation for `user_id`. A missing or blank title becomes
    /// [`DEFAULT_TITLE`].
    pub fn create(
        &self,
        user_id: &str,
        title: Option<String>,
        user_type: Option<UserType>,
    ) -> Conversation {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let id = Uuid::new_v4().to_string();
        let conversation = Conversation::new(id.clone(), user_id.to_string(), title, user_type);

        self.inner
            .write()
            .unwrap()
            .insert(id, conversation.clone());
        conversation
    }

    /// Get a conversation by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Conversation> {
        self.inner.read().unwrap().get(id).cloned()
    }

    /// Get a conversation by ID only if it belongs to `user_id`.
    #[must_use]
    pub fn get_for_user(&self, id: &str, user_id: &str) -> Option<Conversation> {
        self.get(id).filter(|c| c.user_id() == user_id)
    }

    /// List a user's conversations, most recently active first.
    #[must_use]
    pub fn list_for_user(&self, user_id: &str) -> Vec<ConversationSummary> {
        let mut summaries: Vec<ConversationSummary> = self
            .inner
            .read()
            .unwrap()
            .values()
            .filter(|c| c.user_id() == user_id)
            .map(Conversation::summary)
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries
    }

    /// Get the number of stored conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    /// Check if there are no conversations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all expired conversations.
    ///
    /// Returns the number of conversations removed.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_with_timeout(DEFAULT_CONVERSATION_TIMEOUT)
    }

    /// Remove conversations idle longer than `timeout`.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.write().unwrap();
        let before = guard.len();
        guard.retain(|_, c| !c.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
