//! HTTP client for interacting with the server.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::{
    error::{Error, Result},
    session::ChatTransport,
    types::*,
};

/// HTTP client for the API.
///
/// # Example
///
/// ```rust,no_run
/// use careerwise_sdk::Client;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("http://localhost:8000")?;
///
/// let conversation = client.chat().create_conversation(Default::default()).await?;
/// let reply = client
///     .chat()
///     .send_message(&conversation.conversation_id, "How do I improve my resume?")
///     .await?;
/// println!("{}", reply.response);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl Client {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the server (e.g., "http://localhost:8000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            http,
            token: None,
        })
    }

    /// Send `token` as a bearer token on every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Access the Chat API.
    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi { client: self }
    }

    /// Access the Users API.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let rb = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut rb = self.request(method, path);
        if let Some(body) = body {
            rb = rb.json(body);
        }
        Self::handle_response(rb.send().await?).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            // Server errors look like {"error": {"code": ..., "message": ...}}.
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(ToString::to_string))
                .unwrap_or(text);
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

// =============================================================================
// Chat API
// =============================================================================

/// Chat API client.
#[derive(Debug)]
pub struct ChatApi<'a> {
    client: &'a Client,
}

impl ChatApi<'_> {
    /// Create a conversation.
    pub async fn create_conversation(&self, req: ConversationCreate) -> Result<ConversationSummary> {
        self.client
            .send(Method::POST, "/api/v1/chat/conversation/create", Some(&req))
            .await
    }

    /// One-shot reply without server-side history.
    pub async fn simple(&self, message: impl Into<String>) -> Result<ChatResponse> {
        let req = SimpleChatRequest {
            message: message.into(),
            conversation_id: None,
            user_type: None,
        };
        self.client
            .send(Method::POST, "/api/v1/chat/simple", Some(&req))
            .await
    }

    /// List the caller's conversations, most recently updated first.
    pub async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        self.client
            .send::<_, ()>(Method::GET, "/api/v1/chat/conversations", None)
            .await
    }

    /// Send a message in a conversation and wait for the reply.
    pub async fn send_message(
        &self,
        conversation_id: &str,
        content: impl Into<String>,
    ) -> Result<ChatResponse> {
        let req = MessageCreate {
            content: content.into(),
        };
        self.client
            .send(
                Method::POST,
                &format!("/api/v1/chat/conversation/{conversation_id}/message"),
                Some(&req),
            )
            .await
    }

    /// Messages of a conversation, oldest first.
    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<ServerMessage>> {
        self.client
            .send::<_, ()>(
                Method::GET,
                &format!("/api/v1/chat/conversation/{conversation_id}/messages"),
                None,
            )
            .await
    }

    /// URL of the SSE reply stream for a conversation.
    pub fn stream_url(&self, conversation_id: &str) -> String {
        self.client
            .url(&format!("/api/v1/chat/conversation/{conversation_id}/stream"))
            .to_string()
    }
}

// =============================================================================
// Users API
// =============================================================================

/// Users API client.
#[derive(Debug)]
pub struct UsersApi<'a> {
    client: &'a Client,
}

impl UsersApi<'_> {
    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.client
            .send::<_, ()>(Method::GET, "/api/v1/users/profile", None)
            .await
    }

    pub async fn create_profile(&self, profile: &UserProfileCreate) -> Result<UserProfile> {
        self.client
            .send(Method::POST, "/api/v1/users/profile", Some(profile))
            .await
    }

    pub async fn update_profile(&self, update: &UserProfileUpdate) -> Result<UserProfile> {
        self.client
            .send(Method::PUT, "/api/v1/users/profile", Some(update))
            .await
    }

    pub async fn delete_profile(&self) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .send::<_, ()>(Method::DELETE, "/api/v1/users/profile", None)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for Client {
    async fn create_conversation(&self) -> Result<String> {
        let summary = self
            .chat()
            .create_conversation(ConversationCreate::default())
            .await?;
        Ok(summary.conversation_id)
    }

    async fn send_simple(&self, message: &str) -> Result<ChatResponse> {
        self.chat().simple(message).await
    }
}
