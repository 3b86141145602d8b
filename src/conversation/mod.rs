//! Conversation and message management.
//!
//! This module provides in-memory storage for chat conversations. Each
//! conversation is identified by UUID, owned by one user, and holds an
//! append-only list of messages.
//!
//! # Architecture
//!
//! - [`Conversation`]: A single conversation and its messages
//! - [`ConversationStore`]: Thread-safe store for all conversations
//!
//! # Example
//!
//! ```rust
//! use careerwise::conversation::{ConversationStore, SenderType};
//!
//! let store = ConversationStore::new();
//! let conversation = store.create("user-1", None, None);
//! conversation.add_user_message("Hello!", None);
//!
//! let messages = conversation.messages();
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].sender_type, SenderType::User);
//! ```

mod store;

pub use store::{
    ChatMessage, Conversation, ConversationStatus, ConversationStore, ConversationSummary,
    DEFAULT_TITLE, SenderType,
};
