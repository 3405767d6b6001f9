use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use stride_core::config::{LlmConfig, LlmProvider};
use stride_core::domain::history::{ChatTurn, Role};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

impl From<&ChatTurn> for ChatMessage {
    fn from(turn: &ChatTurn) -> Self {
        let role = match turn.role {
            Role::User => ChatRole::User,
            Role::Assistant => ChatRole::Assistant,
        };
        Self { role, content: turn.content.clone() }
    }
}

#[derive(Clone, Debug)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Failure kinds a generation collaborator can surface. All of them are
/// recoverable: callers substitute a deterministic fallback and continue.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation backend unreachable: {0}")]
    Network(String),
    #[error("generation request timed out after {0}s")]
    Timeout(u64),
    #[error("generation quota or rate limit exhausted: {0}")]
    Quota(String),
    #[error("generation backend returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// Narrow seam to the free-form generation and plan-synthesis backend.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError>;

    /// False when the client has no usable backend and every call will
    /// fall back. Surfaced through the assistant health check.
    fn is_configured(&self) -> bool {
        true
    }
}

#[async_trait]
impl LlmClient for Arc<dyn LlmClient> {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        self.as_ref().complete(request).await
    }

    fn is_configured(&self) -> bool {
        self.as_ref().is_configured()
    }
}

/// Maps a friendly model label to the concrete API model id. Unrecognized
/// labels pass through unchanged so raw ids keep working.
pub fn resolve_model(label: &str) -> String {
    match label.trim() {
        "" => "gpt-3.5-turbo".to_string(),
        "GPT-3.5 Turbo" => "gpt-3.5-turbo".to_string(),
        "GPT-4" => "gpt-4".to_string(),
        "GPT-4 Turbo" => "gpt-4-turbo-preview".to_string(),
        other => other.to_string(),
    }
}

/// Client for any OpenAI-compatible chat-completions endpoint (OpenAI
/// itself, or a local Ollama server).
#[derive(Clone, Debug)]
pub struct HttpLlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    timeout_secs: u64,
}

impl HttpLlmClient {
    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Self> {
        let default_base = match config.provider {
            LlmProvider::OpenAi => "https://api.openai.com/v1",
            LlmProvider::Ollama => "http://localhost:11434/v1",
        };
        let base_url =
            normalize_base_url(config.base_url.as_deref().unwrap_or(default_base));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            model: resolve_model(&config.model),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GenerationError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let mut http_request =
            self.http.post(format!("{}/chat/completions", self.base_url)).json(&body);
        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key.expose_secret());
        }

        let response = http_request.send().await.map_err(|error| {
            if error.is_timeout() {
                GenerationError::Timeout(self.timeout_secs)
            } else {
                GenerationError::Network(error.to_string())
            }
        })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(GenerationError::Quota(format!("backend returned {status}")));
        }
        if !status.is_success() {
            return Err(GenerationError::Network(format!("backend returned {status}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|error| GenerationError::InvalidResponse(error.to_string()))?;

        payload
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                GenerationError::InvalidResponse(
                    "response carries no choices[0].message.content".to_string(),
                )
            })
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}

/// Client used when no generation backend is configured. Every call fails
/// with a network-kind error, which routes callers onto their deterministic
/// fallbacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineLlmClient;

#[async_trait]
impl LlmClient for OfflineLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Network("no generation backend configured".to_string()))
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Scripted client for tests: serves canned results in order, repeating the
/// last one once exhausted.
#[derive(Debug, Default)]
pub struct StaticLlmClient {
    replies: Vec<Result<String, GenerationError>>,
    cursor: AtomicUsize,
}

impl StaticLlmClient {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self { replies: vec![Ok(reply.into())], cursor: AtomicUsize::new(0) }
    }

    pub fn with_replies(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self { replies, cursor: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl LlmClient for StaticLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, GenerationError> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.replies
            .get(index)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_else(|| {
                Err(GenerationError::InvalidResponse("no scripted reply".to_string()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_base_url, resolve_model, LlmClient, OfflineLlmClient, StaticLlmClient};
    use super::{CompletionRequest, GenerationError};

    fn empty_request() -> CompletionRequest {
        CompletionRequest { messages: Vec::new(), max_tokens: 16, temperature: 0.0 }
    }

    #[test]
    fn friendly_model_labels_resolve_to_api_ids() {
        assert_eq!(resolve_model("GPT-3.5 Turbo"), "gpt-3.5-turbo");
        assert_eq!(resolve_model("GPT-4 Turbo"), "gpt-4-turbo-preview");
        assert_eq!(resolve_model("llama3.1"), "llama3.1");
        assert_eq!(resolve_model(""), "gpt-3.5-turbo");
    }

    #[test]
    fn base_urls_are_normalized_to_the_v1_root() {
        assert_eq!(normalize_base_url("http://localhost:11434"), "http://localhost:11434/v1");
        assert_eq!(normalize_base_url("http://localhost:11434/"), "http://localhost:11434/v1");
        assert_eq!(normalize_base_url("https://api.openai.com/v1"), "https://api.openai.com/v1");
    }

    #[tokio::test]
    async fn offline_client_reports_unconfigured_and_fails_softly() {
        let client = OfflineLlmClient;
        assert!(!client.is_configured());
        let error = client.complete(empty_request()).await.expect_err("offline client");
        assert!(matches!(error, GenerationError::Network(_)));
    }

    #[tokio::test]
    async fn static_client_serves_replies_in_order_then_repeats() {
        let client = StaticLlmClient::with_replies(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
        ]);
        assert_eq!(client.complete(empty_request()).await.expect("first"), "first");
        assert_eq!(client.complete(empty_request()).await.expect("second"), "second");
        assert_eq!(client.complete(empty_request()).await.expect("repeat"), "second");
    }
}
