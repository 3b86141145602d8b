//! Server-rendered HTML pages.
//!
//! Pages are plain HTML strings built with `format!`; every piece of
//! user-supplied text goes through [`shell::escape`].

pub mod chat;
pub mod dashboard;
pub mod landing;
pub mod onboarding;
pub mod shell;

use axum::{
    Router,
    http::StatusCode,
    response::Html,
    routing::get,
};

use crate::AppState;
use shell::{html_shell, site_header};

/// Page routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing::landing))
        .route("/chat", get(chat::new_chat).post(chat::start_chat))
        .route("/chat/{id}", get(chat::show_chat).post(chat::post_chat))
        .route("/dashboard", get(dashboard::overview))
        .route("/dashboard/{section}", get(dashboard::section))
        .route(
            "/onboarding",
            get(onboarding::show).post(onboarding::submit),
        )
}

/// Body of the 404 page.
pub fn not_found_page() -> String {
    let content = format!(
        r#"{}
<main class="container narrow section center">
    <h1>Page not found</h1>
    <p class="muted">The page you're looking for doesn't exist or has moved.</p>
    <a href="/" class="btn btn-primary">Back to home</a>
</main>"#,
        site_header()
    );
    html_shell("Not Found", &content)
}

/// Fallback handler.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(not_found_page()))
}
