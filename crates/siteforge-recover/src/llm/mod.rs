//! Model access: the [`CompletionClient`] seam plus an HTTP client for Anthropic,
//! OpenAI and OpenAI-compatible APIs.

mod providers;

pub use providers::LlmProvider;

use std::future::Future;
use std::time::Duration;

use providers::{AnthropicRequest, AnthropicResponse, Message, OpenAIRequest, OpenAIResponse};
use siteforge_core::config::LlmConfig;

/// Errors from a model call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("network error: {0}")]
    Network(String),
    /// The endpoint could not be reached at all (refused, DNS, blocked origin).
    #[error("cannot reach model endpoint: {0}")]
    Connectivity(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("empty response from model")]
    EmptyResponse,
    #[error("model not configured: {0}")]
    NotConfigured(String),
}

impl ModelError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ModelError::Network(_) => true,
            ModelError::Api { status, .. } => *status == 429 || *status >= 500,
            ModelError::Connectivity(_) | ModelError::EmptyResponse | ModelError::NotConfigured(_) => {
                false
            }
        }
    }
}

/// Anything that can answer a system + user prompt with text.
pub trait CompletionClient: Send + Sync {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}

/// A client that never reaches a model; every call ends in fallback synthesis.
#[derive(Debug, Clone, Default)]
pub struct OfflineClient;

impl CompletionClient for OfflineClient {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, ModelError> {
        Err(ModelError::NotConfigured("offline mode".to_string()))
    }
}

/// HTTP client for the configured provider.
pub struct LlmClient {
    provider: LlmProvider,
    http: reqwest::Client,
    max_tokens: u32,
}

impl LlmClient {
    pub fn new(provider: LlmProvider, config: &LlmConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::NotConfigured(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            provider,
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Resolve the provider from config plus environment and build a client.
    pub fn from_config(config: &LlmConfig) -> Result<Self, ModelError> {
        Self::new(LlmProvider::from_env(config)?, config)
    }

    /// Human-readable provider name.
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Model name in use.
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    async fn complete_anthropic(
        &self,
        api_key: &str,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, ModelError> {
        let req = AnthropicRequest {
            model,
            max_tokens: self.max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };

        let resp = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&req)
            .send()
            .await
            .map_err(transport_error)?;

        let body: AnthropicResponse = read_json(resp).await?;
        let text: String = body.content.into_iter().map(|c| c.text).collect();
        non_empty(text)
    }

    async fn complete_openai(
        &self,
        url: &str,
        api_key: &str,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, ModelError> {
        let req = OpenAIRequest {
            model,
            max_tokens: self.max_tokens,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
        };

        let resp = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("content-type", "application/json")
            .json(&req)
            .send()
            .await
            .map_err(transport_error)?;

        let body: OpenAIResponse = read_json(resp).await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        non_empty(text)
    }
}

impl CompletionClient for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ModelError> {
        tracing::debug!(
            provider = self.provider_name(),
            model = self.model_name(),
            prompt_chars = user.len(),
            "calling model"
        );
        match &self.provider {
            LlmProvider::Anthropic { api_key, model } => {
                self.complete_anthropic(api_key, model, system, user).await
            }
            LlmProvider::OpenAI { api_key, model } => {
                self.complete_openai(
                    "https://api.openai.com/v1/chat/completions",
                    api_key,
                    model,
                    system,
                    user,
                )
                .await
            }
            LlmProvider::OpenAICompatible {
                api_key,
                base_url,
                model,
            } => {
                let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
                self.complete_openai(&url, api_key, model, system, user).await
            }
        }
    }
}

/// Connection failures are not worth retrying; everything else on the wire is.
fn transport_error(err: reqwest::Error) -> ModelError {
    if err.is_connect() {
        ModelError::Connectivity(err.to_string())
    } else {
        ModelError::Network(err.to_string())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ModelError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(ModelError::Api {
            status: status.as_u16(),
            message: truncate(&message, 500),
        });
    }
    resp.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            ModelError::Api {
                status: status.as_u16(),
                message: format!("unreadable response body: {e}"),
            }
        } else {
            transport_error(e)
        }
    })
}

fn non_empty(text: String) -> Result<String, ModelError> {
    if text.trim().is_empty() {
        Err(ModelError::EmptyResponse)
    } else {
        Ok(text)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
