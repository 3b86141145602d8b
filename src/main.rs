//! CareerWise server entry point.

use std::sync::Arc;

use dotenvy::dotenv;
use mimalloc::MiMalloc;

use careerwise::config::{AppConfig, load_llm_settings};
use careerwise::{server, telemetry};

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present) before anything reads the environment.
    let _ = dotenv();

    telemetry::init();

    let config = Arc::new(AppConfig::load()?);

    let settings = match load_llm_settings() {
        Ok(s) => s,
        Err(msg) => {
            tracing::error!(name: "llm.config.invalid", error = %msg, "Configuration error");
            std::process::exit(1);
        }
    };

    server::start_server(config, settings).await
}
