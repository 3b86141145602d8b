//! Application configuration.
//!
//! Sources, lowest priority first: built-in defaults, the config file
//! (`--config` / `CONFIG_FILE`, else `./config.yaml` when present),
//! `CAREERWISE_` prefixed environment variables (`CAREERWISE_SERVER__PORT`),
//! then explicit CLI flags.
//!
//! LLM connection settings are read separately by [`load_llm_settings`].

use std::env;
use std::path::Path;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::llm::{LlmSettings, Provider};

const ENV_PREFIX: &str = "CAREERWISE";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const DEV_JWT_SECRET: &str = "careerwise-dev-secret";

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
const DEEPSEEK_MODEL: &str = "deepseek-chat";
const AZURE_API_VERSION: &str = "2024-08-01-preview";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Host to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Require JWT authentication
    #[arg(long, env = "JWT_REQUIRED")]
    pub jwt_required: Option<bool>,

    /// Enable rate limiting
    #[arg(long, env = "RATE_LIMIT_ENABLED")]
    pub rate_limit_enabled: Option<bool>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub resilience: ResilienceConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    pub jwt_required: bool,
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub rate_limit_enabled: bool,
    pub timeout_disabled: bool,
    pub requests_per_second: f32,
    pub burst_size: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.environment", "development")?
            .set_default("security.jwt_required", false)?
            .set_default("security.jwt_secret", DEV_JWT_SECRET)?
            .set_default("resilience.rate_limit_enabled", true)?
            .set_default("resilience.timeout_disabled", false)?
            .set_default("resilience.requests_per_second", 20.0)?
            .set_default("resilience.burst_size", 40.0)?
            .set_default(
                "cors.allowed_origins",
                vec![
                    "http://localhost:5173",
                    "http://localhost:3000",
                    "http://127.0.0.1:5173",
                    "http://127.0.0.1:3000",
                ],
            )?;

        // An explicit path must exist; the cwd fallback is optional.
        match &cli.config {
            Some(path) => builder = builder.add_source(File::with_name(path).required(true)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
            None => {}
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(jwt) = cli.jwt_required {
            builder = builder.set_override("security.jwt_required", jwt)?;
        }
        if let Some(rl) = cli.rate_limit_enabled {
            builder = builder.set_override("resilience.rate_limit_enabled", rl)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;

        if config.is_production() {
            let secret = config.security.jwt_secret.trim();
            if secret.is_empty() || secret == DEV_JWT_SECRET {
                return Err(config::ConfigError::Message(
                    "security.jwt_secret must be set to a non-default value in production"
                        .to_string(),
                ));
            }
        }

        Ok(config)
    }

    /// Whether the server runs in a production environment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.server.environment.eq_ignore_ascii_case("production")
    }
}

/// Load LLM settings from the process environment.
///
/// Returns `Ok(None)` when no provider is configured; the advisor then runs
/// in offline mode.
pub fn load_llm_settings() -> Result<Option<LlmSettings>, String> {
    llm_settings_from(|key| env::var(key).ok())
}

/// Resolve LLM settings through `lookup`.
///
/// `LLM_BASE_URL` + `LLM_MODEL` take precedence, then `GROQ_API_KEY`, then
/// `DEEPSEEK_API_KEY`. Blank values count as unset.
pub fn llm_settings_from<F>(lookup: F) -> Result<Option<LlmSettings>, String>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let (base_url, model, api_key) = if let Some(base_url) = var("LLM_BASE_URL") {
        let model = var("LLM_MODEL").ok_or_else(|| {
            "LLM_MODEL is required when LLM_BASE_URL is set".to_string()
        })?;
        (base_url, model, var("LLM_API_KEY"))
    } else if let Some(key) = var("GROQ_API_KEY") {
        (
            var("GROQ_BASE_URL").unwrap_or_else(|| GROQ_BASE_URL.to_string()),
            var("GROQ_MODEL").unwrap_or_else(|| GROQ_MODEL.to_string()),
            Some(key),
        )
    } else if let Some(key) = var("DEEPSEEK_API_KEY") {
        (
            var("DEEPSEEK_BASE_URL").unwrap_or_else(|| DEEPSEEK_BASE_URL.to_string()),
            var("DEEPSEEK_MODEL").unwrap_or_else(|| DEEPSEEK_MODEL.to_string()),
            Some(key),
        )
    } else {
        return Ok(None);
    };

    let mut provider = Provider::detect_from_url(&base_url);

    let deployment_name = var("AZURE_DEPLOYMENT_NAME");
    let api_version = var("AZURE_API_VERSION");

    if let Provider::AzureOpenAI { .. } = &provider
        && let Some(deployment) = &deployment_name
    {
        provider = Provider::AzureOpenAI {
            deployment_name: deployment.clone(),
            api_version: api_version
                .clone()
                .unwrap_or_else(|| AZURE_API_VERSION.to_string()),
        };
    }

    Ok(Some(LlmSettings {
        base_url,
        api_key,
        model,
        provider,
        deployment_name,
        api_version,
    }))
}
