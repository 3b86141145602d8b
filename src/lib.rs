//! CareerWise: AI career guidance server.
//!
//! Serves a JSON chat API and server-rendered pages (landing page, chat,
//! dashboard, onboarding) on top of an OpenAI-compatible LLM.
//!
//! # Modules
//!
//! - [`api`]: chat and profile JSON endpoints
//! - [`conversation`]: in-memory conversation store
//! - [`guidance`]: the career advisor, prompts and canned replies
//! - [`llm`]: LLM driver trait and the chat completions driver
//! - [`normalized`]: streaming event model and SSE framing
//! - [`onboarding`]: onboarding status cookie
//! - [`profile`]: user profiles
//! - [`security`]: request identity and rate limiting
//! - [`ui`]: HTML pages

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod guidance;
pub mod llm;
pub mod normalized;
pub mod onboarding;
pub mod profile;
pub mod security;
pub mod server;
pub mod telemetry;
pub mod ui;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::conversation::ConversationStore;
use crate::guidance::CareerAdvisor;
use crate::profile::ProfileStore;
use crate::security::ApiRateLimiter;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Produces replies, live or canned.
    pub advisor: Arc<CareerAdvisor>,
    /// Conversation store.
    pub conversations: ConversationStore,
    /// Profile store.
    pub profiles: ProfileStore,
    /// Global rate limiter
    pub rate_limiter: Arc<ApiRateLimiter>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state with empty stores.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, advisor: CareerAdvisor) -> Self {
        let rate_limiter = Arc::new(ApiRateLimiter::new(
            config.resilience.requests_per_second,
            config.resilience.burst_size,
        ));

        Self {
            advisor: Arc::new(advisor),
            conversations: ConversationStore::new(),
            profiles: ProfileStore::new(),
            rate_limiter,
            config,
        }
    }
}
