//! JSON API.
//!
//! Every route here runs behind the rate limiter and an auth middleware, so
//! handlers can take a [`UserContext`](crate::security::UserContext) directly.
//! `/simple`, `/test` and `/health` under `/api/v1/chat` stay open even when
//! tokens are required.

pub mod chat;
pub mod users;

use axum::{Json, Router, middleware::from_fn_with_state};
use chrono::Utc;
use serde_json::json;

use crate::AppState;
use crate::security::{auth_middleware, optional_auth_middleware, rate_limit_middleware};

/// Build the `/api/v1` router.
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/api/v1/chat", chat::router())
        .nest("/api/v1/users", users::router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let public = Router::new()
        .nest("/api/v1/chat", chat::public_router())
        .route_layer(from_fn_with_state(state.clone(), optional_auth_middleware));

    protected
        .merge(public)
        .route_layer(from_fn_with_state(state, rate_limit_middleware))
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "careerwise",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}
