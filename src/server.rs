use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api;
use crate::config::AppConfig;
use crate::guidance::CareerAdvisor;
use crate::llm::{ChatCompletionsDriver, LlmSettings};
use crate::ui;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_LIMIT: usize = 1024 * 1024; // 1MB
const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Build the advisor for the given LLM settings; `None` means offline.
#[must_use]
pub fn build_advisor(settings: Option<LlmSettings>) -> CareerAdvisor {
    match settings {
        Some(settings) => {
            info!(
                name: "llm.config.loaded",
                base_url = %settings.base_url,
                model = %settings.model,
                "LLM configuration loaded"
            );
            CareerAdvisor::new(Arc::new(ChatCompletionsDriver::new(settings)))
        }
        None => {
            tracing::warn!(
                name: "llm.config.missing",
                "No LLM configured; answering with canned replies"
            );
            CareerAdvisor::offline()
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.cors.allowed_origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(name: "cors.origin.invalid", origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(origins).allow_credentials(true)
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    // A disabled timeout is a very long one so the layer stack keeps one type.
    let timeout_duration = if config.resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60) // 1 year
    } else {
        REQUEST_TIMEOUT
    };

    Router::new()
        .route("/health", get(api::health))
        .merge(api::router(state.clone()))
        .merge(ui::router())
        .nest_service("/static", ServeDir::new("static"))
        .fallback(ui::not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(
    config: Arc<AppConfig>,
    settings: Option<LlmSettings>,
) -> anyhow::Result<()> {
    let advisor = build_advisor(settings);
    let state = AppState::new(config.clone(), advisor);

    let conversations = state.conversations.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = conversations.cleanup_expired();
            if removed > 0 {
                tracing::debug!(name: "conversation.sweep", removed, "Expired conversations removed");
            }
        }
    });

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        environment = %config.server.environment,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
