#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use careerwise::AppState;
use careerwise::config::{AppConfig, CorsConfig, ResilienceConfig, SecurityConfig, ServerConfig};
use careerwise::guidance::CareerAdvisor;
use careerwise::server::build_router;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config(jwt_required: bool) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            environment: "test".to_string(),
        },
        security: SecurityConfig {
            jwt_required,
            jwt_secret: TEST_SECRET.to_string(),
        },
        resilience: ResilienceConfig {
            rate_limit_enabled: false,
            timeout_disabled: false,
            requests_per_second: 20.0,
            burst_size: 40.0,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    }
}

pub fn server_with(config: AppConfig, advisor: CareerAdvisor) -> (TestServer, AppState) {
    let state = AppState::new(Arc::new(config), advisor);
    let server = TestServer::new(build_router(state.clone())).unwrap();
    (server, state)
}

/// Offline advisor, no auth, no rate limiting.
pub fn offline_server() -> (TestServer, AppState) {
    server_with(test_config(false), CareerAdvisor::offline())
}
