//! Provider-specific configuration and detection.
//!
//! This module handles differences between OpenAI-compatible providers,
//! mostly the shape of the chat completions URL.

/// Supported LLM providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// `OpenAI` (api.openai.com)
    OpenAI,
    /// Azure `OpenAI` Service
    AzureOpenAI {
        /// Deployment name (required for Azure)
        deployment_name: String,
        /// API version (e.g., "2024-08-01-preview")
        api_version: String,
    },
    /// Groq (groq.com)
    Groq,
    /// `DeepSeek` (deepseek.com)
    DeepSeek,
    /// `OpenRouter` (openrouter.ai)
    OpenRouter,
    /// Together AI (together.ai, together.xyz)
    TogetherAI,
    /// Generic OpenAI-compatible provider
    Generic,
}

impl Provider {
    /// Detect provider from base URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use careerwise::llm::Provider;
    ///
    /// let provider = Provider::detect_from_url("https://api.groq.com/openai/v1");
    /// assert_eq!(provider, Provider::Groq);
    /// ```
    #[must_use]
    pub fn detect_from_url(base_url: &str) -> Self {
        let lower = base_url.to_lowercase();

        if lower.contains("azure.com") {
            Self::AzureOpenAI {
                deployment_name: String::new(),
                api_version: "2024-08-01-preview".to_string(),
            }
        } else if lower.contains("groq.com") {
            Self::Groq
        } else if lower.contains("deepseek.com") {
            Self::DeepSeek
        } else if lower.contains("openrouter.ai") {
            Self::OpenRouter
        } else if lower.contains("together.ai") || lower.contains("together.xyz") {
            Self::TogetherAI
        } else if lower.contains("openai.com") {
            Self::OpenAI
        } else {
            Self::Generic
        }
    }

    /// Build the chat completions URL for this provider.
    ///
    /// Base URLs that already carry the `/v1` segment (Groq's
    /// `https://api.groq.com/openai/v1`, for instance) are not given a second one.
    #[must_use]
    pub fn build_chat_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');

        match self {
            Self::AzureOpenAI {
                deployment_name,
                api_version,
            } => {
                format!(
                    "{base}/openai/deployments/{deployment_name}/chat/completions?api-version={api_version}"
                )
            }
            _ if base.ends_with("/v1") => format!("{base}/chat/completions"),
            _ => format!("{base}/v1/chat/completions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_openai() {
        let provider = Provider::detect_from_url("https://api.openai.com");
        assert_eq!(provider, Provider::OpenAI);
    }

    #[test]
    fn test_detect_azure() {
        let provider = Provider::detect_from_url("https://my-resource.openai.azure.com");
        assert!(matches!(provider, Provider::AzureOpenAI { .. }));
    }

    #[test]
    fn test_detect_groq_and_deepseek() {
        assert_eq!(
            Provider::detect_from_url("https://api.groq.com/openai/v1"),
            Provider::Groq
        );
        assert_eq!(
            Provider::detect_from_url("https://api.deepseek.com"),
            Provider::DeepSeek
        );
    }

    #[test]
    fn test_detect_generic() {
        let provider = Provider::detect_from_url("http://127.0.0.1:11434");
        assert_eq!(provider, Provider::Generic);
    }

    #[test]
    fn test_build_url_appends_version() {
        let url = Provider::DeepSeek.build_chat_url("https://api.deepseek.com/");
        assert_eq!(url, "https://api.deepseek.com/v1/chat/completions");
    }

    #[test]
    fn test_build_url_keeps_existing_version() {
        let url = Provider::Groq.build_chat_url("https://api.groq.com/openai/v1");
        assert_eq!(url, "https://api.groq.com/openai/v1/chat/completions");
    }

    #[test]
    fn test_build_url_azure() {
        let provider = Provider::AzureOpenAI {
            deployment_name: "gpt-4".to_string(),
            api_version: "2024-08-01-preview".to_string(),
        };
        let url = provider.build_chat_url("https://my-resource.openai.azure.com");
        assert_eq!(
            url,
            "https://my-resource.openai.azure.com/openai/deployments/gpt-4/chat/completions?api-version=2024-08-01-preview"
        );
    }
}
