//! Career guidance built on top of an LLM driver.
//!
//! The [`CareerAdvisor`] turns a user message plus recent history into a
//! model request with an audience-specific system prompt. It never surfaces
//! model failures to callers: errors are logged and replaced by [`APOLOGY`].
//! When no driver is configured the advisor answers from a set of canned,
//! keyword-selected replies.

pub mod canned;
pub mod prompts;

use std::fmt;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::llm::{LlmDriver, LlmRequest, Message};
use crate::normalized::NormalizedEvent;

/// Reply used when the model call fails.
pub const APOLOGY: &str =
    "I apologize, but I'm experiencing technical difficulties. Please try again in a moment.";

/// Number of prior messages forwarded to the model.
pub const HISTORY_WINDOW: usize = 10;

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

/// Boxed stream of reply chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Audience the advisor tailors its answers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// High school and university students.
    #[default]
    Student,
    /// Recent graduates and early-career professionals.
    Graduate,
    /// Experienced professionals.
    Professional,
    /// Founders and would-be founders.
    Entrepreneur,
}

impl UserType {
    /// Every audience, in display order.
    pub const ALL: [UserType; 4] = [
        UserType::Student,
        UserType::Graduate,
        UserType::Professional,
        UserType::Entrepreneur,
    ];

    /// Wire name (`student`, `graduate`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Graduate => "graduate",
            Self::Professional => "professional",
            Self::Entrepreneur => "entrepreneur",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Graduate => "Recent Graduate",
            Self::Professional => "Professional",
            Self::Entrepreneur => "Entrepreneur",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown user type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user type: {0}")]
pub struct UnknownUserType(pub String);

impl FromStr for UserType {
    type Err = UnknownUserType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownUserType(s.to_string()))
    }
}

/// Produces career guidance replies.
#[derive(Clone)]
pub struct CareerAdvisor {
    driver: Option<Arc<dyn LlmDriver>>,
}

impl fmt::Debug for CareerAdvisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CareerAdvisor")
            .field("live", &self.is_live())
            .finish()
    }
}

impl CareerAdvisor {
    /// Create an advisor backed by an LLM driver.
    #[must_use]
    pub fn new(driver: Arc<dyn LlmDriver>) -> Self {
        Self {
            driver: Some(driver),
        }
    }

    /// Create an advisor that only uses canned replies.
    #[must_use]
    pub fn offline() -> Self {
        Self { driver: None }
    }

    /// Whether replies come from a model.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.driver.is_some()
    }

    /// Build the model request: system prompt, the last [`HISTORY_WINDOW`]
    /// history entries, then the current message.
    #[must_use]
    pub fn build_request(message: &str, history: &[Message], user_type: UserType) -> LlmRequest {
        let skip = history.len().saturating_sub(HISTORY_WINDOW);

        let mut messages = Vec::with_capacity(HISTORY_WINDOW + 2);
        messages.push(Message::system(prompts::system_prompt(user_type)));
        messages.extend(history.iter().skip(skip).cloned());
        messages.push(Message::user(message));

        LlmRequest {
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }

    /// Generate a full reply.
    pub async fn generate_response(
        &self,
        message: &str,
        history: &[Message],
        user_type: UserType,
    ) -> String {
        let Some(driver) = &self.driver else {
            return canned::reply(message).to_string();
        };

        let req = Self::build_request(message, history, user_type);
        match driver.complete(req).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(
                    name: "advisor.generate.failed",
                    error = %e,
                    user_type = %user_type,
                    "Error generating AI response"
                );
                APOLOGY.to_string()
            }
        }
    }

    /// Stream a reply as text chunks.
    ///
    /// A failure before the first chunk yields [`APOLOGY`] as the only chunk;
    /// a failure mid-stream ends the stream after the chunks already sent.
    pub async fn stream_response(
        &self,
        message: &str,
        history: &[Message],
        user_type: UserType,
    ) -> ChunkStream {
        let Some(driver) = &self.driver else {
            let reply = canned::reply(message).to_string();
            return Box::pin(futures::stream::once(async move { reply }));
        };

        let req = Self::build_request(message, history, user_type);
        let events = match driver.stream(req).await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!(
                    name: "advisor.stream.failed",
                    error = %e,
                    user_type = %user_type,
                    "Error starting streaming AI response"
                );
                return Box::pin(futures::stream::once(async { APOLOGY.to_string() }));
            }
        };

        let chunks = async_stream::stream! {
            let mut sent_any = false;
            futures::pin_mut!(events);
            while let Some(event) = events.next().await {
                match event {
                    Ok(NormalizedEvent::MessageDelta { text }) => {
                        sent_any = true;
                        yield text;
                    }
                    Ok(NormalizedEvent::Done) => break,
                    Ok(NormalizedEvent::Error { message, .. }) => {
                        tracing::error!(name: "advisor.stream.failed", error = %message, "Stream error");
                        break;
                    }
                    Err(e) => {
                        tracing::error!(name: "advisor.stream.failed", error = %e, "Stream error");
                        break;
                    }
                }
            }
            if !sent_any {
                yield APOLOGY.to_string();
            }
        };

        Box::pin(chunks)
    }
}
