//! Normalized event types for streaming advisor responses.
//!
//! Drivers translate provider-specific stream frames into [`NormalizedEvent`]s,
//! and the chat stream endpoint turns them back into Server-Sent Events for
//! the browser.
//!
//! # Wire format
//!
//! Each event is written as an `event:` line followed by a `data:` line.
//! The payloads are the ones browser clients of the chat API already parse:
//!
//! - `message.delta` → `{"chunk": "..."}`
//! - `error` → `{"error": "...", "code": "..."}`
//! - `done` → `{"done": true}`
//!
//! # Example
//!
//! ```rust
//! use careerwise::normalized::{NormalizedEvent, sse_event};
//!
//! let event = NormalizedEvent::MessageDelta {
//!     text: "Hello".to_string(),
//! };
//! let sse = sse_event(&event);
//! assert!(sse.contains(r#"{"chunk":"Hello"}"#));
//! ```

use serde::{Deserialize, Serialize};

/// Normalized streaming events emitted by LLM drivers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum NormalizedEvent {
    /// Incremental text delta from the assistant's response.
    #[serde(rename = "message.delta")]
    MessageDelta {
        /// The text fragment to append.
        text: String,
    },

    /// An error occurred during streaming.
    #[serde(rename = "error")]
    Error {
        /// Error message.
        message: String,
        /// Optional error code for programmatic handling.
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },

    /// Stream has completed.
    #[serde(rename = "done")]
    Done,
}

/// Convert a [`NormalizedEvent`] to an SSE-formatted string.
pub fn sse_event(evt: &NormalizedEvent) -> String {
    let payload = match evt {
        NormalizedEvent::MessageDelta { text } => serde_json::json!({ "chunk": text }),
        NormalizedEvent::Error { message, code } => match code {
            Some(code) => serde_json::json!({ "error": message, "code": code }),
            None => serde_json::json!({ "error": message }),
        },
        NormalizedEvent::Done => serde_json::json!({ "done": true }),
    };

    let event_name = event_name(evt);

    format!("event: {event_name}\ndata: {payload}\n\n")
}

/// Get the SSE event name for a [`NormalizedEvent`].
pub fn event_name(evt: &NormalizedEvent) -> &'static str {
    match evt {
        NormalizedEvent::MessageDelta { .. } => "message.delta",
        NormalizedEvent::Error { .. } => "error",
        NormalizedEvent::Done => "done",
    }
}
