//! OpenAI Chat Completions API driver.
//!
//! This module implements the [`LlmDriver`] trait for the OpenAI Chat Completions
//! API (`/v1/chat/completions`), supporting both one-shot and streaming responses.

use anyhow::Context;
use futures::StreamExt;
use serde::Deserialize;

use crate::normalized::NormalizedEvent;

use super::{EventStream, LlmDriver, LlmRequest, LlmSettings, Provider};

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Driver for the OpenAI Chat Completions API.
///
/// Connects to `/v1/chat/completions` and either returns the whole reply or
/// streams it as [`NormalizedEvent`]s.
#[derive(Clone)]
pub struct ChatCompletionsDriver {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl std::fmt::Debug for ChatCompletionsDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsDriver")
            .field("base_url", &self.settings.base_url)
            .field("model", &self.settings.model)
            .field("provider", &self.settings.provider)
            .finish_non_exhaustive()
    }
}

impl ChatCompletionsDriver {
    /// Create a new Chat Completions driver with the given settings.
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        Self::with_client(settings, reqwest::Client::new())
    }

    /// Create a driver that reuses an existing HTTP client.
    #[must_use]
    pub fn with_client(settings: LlmSettings, http: reqwest::Client) -> Self {
        Self { http, settings }
    }

    fn request(&self, req: &LlmRequest, stream: bool) -> reqwest::RequestBuilder {
        let url = self.settings.provider.build_chat_url(&self.settings.base_url);

        let body = serde_json::json!({
            "model": self.settings.model,
            "stream": stream,
            "messages": req.messages,
            "max_tokens": req.max_tokens,
            "temperature": req.temperature,
            "top_p": req.top_p,
        });

        let mut rb = self.http.post(&url).json(&body);
        if let Some(k) = &self.settings.api_key {
            rb = match self.settings.provider {
                Provider::AzureOpenAI { .. } => rb.header("api-key", k),
                _ => rb.bearer_auth(k),
            };
        }
        rb
    }
}

#[async_trait::async_trait]
impl LlmDriver for ChatCompletionsDriver {
    async fn complete(&self, req: LlmRequest) -> anyhow::Result<String> {
        let resp = self.request(&req, false).send().await?.error_for_status()?;
        let parsed: CompletionResponse = resp.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.is_empty())
            .context("LLM returned empty content")
    }

    async fn stream(&self, req: LlmRequest) -> anyhow::Result<EventStream> {
        let resp = self.request(&req, true).send().await?.error_for_status()?;
        let byte_stream = resp.bytes_stream();

        let out = async_stream::try_stream! {
            let mut buf = Vec::<u8>::new();
            let mut finished = false;

            futures::pin_mut!(byte_stream);
            while let Some(chunk) = byte_stream.next().await {
                let chunk = chunk?;
                buf.extend_from_slice(&chunk);

                while let Some(pos) = find_double_newline(&buf) {
                    let frame = buf.drain(..pos + 2).collect::<Vec<_>>();
                    let text = String::from_utf8_lossy(&frame);

                    for line in text.lines() {
                        let line = line.trim();
                        if !line.starts_with("data:") {
                            continue;
                        }
                        let data = line.trim_start_matches("data:").trim();

                        if data == "[DONE]" {
                            finished = true;
                            yield NormalizedEvent::Done;
                            continue;
                        }

                        let v: serde_json::Value = serde_json::from_str(data)?;
                        if let Some(s) = v["choices"][0]["delta"]
                            .get("content")
                            .and_then(|x| x.as_str())
                            && !s.is_empty()
                        {
                            yield NormalizedEvent::MessageDelta { text: s.to_string() };
                        }
                    }
                }
            }

            // Some providers close the connection without a [DONE] sentinel.
            if !finished {
                yield NormalizedEvent::Done;
            }
        };

        Ok(Box::pin(out))
    }
}

/// Find the position of a double newline in the buffer.
fn find_double_newline(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_double_newline() {
        assert_eq!(find_double_newline(b"data: x\n\nrest"), Some(7));
        assert_eq!(find_double_newline(b"data: x\n"), None);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let driver = ChatCompletionsDriver::new(LlmSettings {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: Some("secret-key".to_string()),
            model: "llama-3.1-8b-instant".to_string(),
            provider: Provider::Groq,
            deployment_name: None,
            api_version: None,
        });
        let debug = format!("{driver:?}");
        assert!(debug.contains("llama-3.1-8b-instant"));
        assert!(!debug.contains("secret-key"));
    }
}
