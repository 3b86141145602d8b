//! Client-side chat session.
//!
//! A [`ChatSession`] owns the transcript shown to the user, the text in the
//! input box and whether a send is outstanding. It talks to the server through
//! a [`ChatTransport`], which [`Client`](crate::Client) implements; tests plug
//! in their own.
//!
//! Failures never surface as errors here. A failed conversation create falls
//! back to a local identifier and a failed send appends [`FALLBACK_REPLY`].

use async_trait::async_trait;
use chrono::Utc;

use crate::error::Result;
use crate::types::{ChatMessage, ChatResponse, Sender};

/// First transcript entry of every session.
pub const GREETING: &str = "Hi! I'm CareerWise AI, your personal career guidance assistant. How can I help you with your career today?";

/// Assistant entry appended when a send fails.
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting to the server. Please check if the backend is running and try again.";

/// Questions offered under the input box.
pub const SUGGESTIONS: [&str; 3] = [
    "What career should I pursue?",
    "How do I improve my resume?",
    "Interview preparation tips",
];

/// The two server calls a chat session needs.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Create a conversation and return its identifier.
    async fn create_conversation(&self) -> Result<String>;

    /// Send one message and return the assistant's reply.
    async fn send_simple(&self, message: &str) -> Result<ChatResponse>;
}

/// Identifier used when the server could not create a conversation.
fn local_conversation_id() -> String {
    format!("conv-{}", Utc::now().timestamp_millis())
}

/// One chat with the assistant.
#[derive(Debug)]
pub struct ChatSession<T> {
    transport: T,
    conversation_id: String,
    messages: Vec<ChatMessage>,
    input: String,
    pending: bool,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Create the conversation and start the transcript with [`GREETING`].
    pub async fn open(transport: T) -> Self {
        let conversation_id = match transport.create_conversation().await {
            Ok(id) if !id.trim().is_empty() => id,
            _ => local_conversation_id(),
        };

        Self {
            transport,
            conversation_id,
            messages: vec![ChatMessage::new("greeting", GREETING, Sender::Assistant)],
            input: String::new(),
            pending: false,
        }
    }

    /// Send the current input and wait for the reply.
    ///
    /// Returns `false` when nothing was sent: the input is blank or another
    /// send is outstanding.
    pub async fn send(&mut self) -> bool {
        let Some(message) = self.begin_send() else {
            return false;
        };
        let outcome = self.transport.send_simple(&message).await;
        self.complete_send(outcome);
        true
    }
}

impl<T> ChatSession<T> {
    /// First half of [`send`](Self::send): append the user entry, clear the
    /// input and mark the session pending. Returns the text to send.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.pending || self.input.trim().is_empty() {
            return None;
        }

        let message = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage::new(
            uuid::Uuid::new_v4().to_string(),
            message.clone(),
            Sender::User,
        ));
        self.pending = true;
        Some(message)
    }

    /// Second half of [`send`](Self::send): append exactly one assistant
    /// entry and clear the pending flag.
    ///
    /// Returns `None` and leaves the transcript alone when no send is
    /// outstanding.
    pub fn complete_send(&mut self, outcome: Result<ChatResponse>) -> Option<&ChatMessage> {
        if !self.pending {
            return None;
        }
        let reply = match outcome {
            Ok(reply) => ChatMessage::new(reply.message_id, reply.response, Sender::Assistant),
            Err(_) => ChatMessage::new(
                format!("error-{}", Utc::now().timestamp_millis()),
                FALLBACK_REPLY,
                Sender::Assistant,
            ),
        };
        self.pending = false;
        self.messages.push(reply);
        self.messages.last()
    }

    /// Copy a suggestion into the input. Ignored while a send is pending.
    pub fn use_suggestion(&mut self, suggestion: &str) {
        if !self.pending {
            self.input = suggestion.to_string();
        }
    }

    /// Replace the input text. Ignored while a send is pending.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.pending {
            self.input = text.into();
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether a send is outstanding; the input is disabled meanwhile.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Offline;

    #[async_trait]
    impl ChatTransport for Offline {
        async fn create_conversation(&self) -> Result<String> {
            Err(Error::Api {
                status: 503,
                message: "down".to_string(),
            })
        }

        async fn send_simple(&self, _message: &str) -> Result<ChatResponse> {
            Err(Error::Api {
                status: 503,
                message: "down".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_open_starts_with_greeting() {
        let session = ChatSession::open(Offline).await;
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, GREETING);
        assert!(session.conversation_id().starts_with("conv-"));
    }

    #[tokio::test]
    async fn test_suggestion_ignored_while_pending() {
        let mut session = ChatSession::open(Offline).await;
        session.use_suggestion(SUGGESTIONS[0]);
        assert_eq!(session.input(), SUGGESTIONS[0]);

        session.begin_send().unwrap();
        session.use_suggestion(SUGGESTIONS[1]);
        assert_eq!(session.input(), "");
    }

    #[tokio::test]
    async fn test_complete_without_pending_send_is_ignored() {
        let mut session = ChatSession::open(Offline).await;
        let late = Err(Error::Api {
            status: 503,
            message: "down".to_string(),
        });
        assert!(session.complete_send(late).is_none());
        assert_eq!(session.messages().len(), 1);

        session.set_input("hello");
        session.begin_send().unwrap();
        let first = session.complete_send(Offline.send_simple("hello").await);
        assert_eq!(first.map(|m| m.content.as_str()), Some(FALLBACK_REPLY));

        let again = Offline.send_simple("hello").await;
        assert!(session.complete_send(again).is_none());
        assert_eq!(session.messages().len(), 3);
    }
}
