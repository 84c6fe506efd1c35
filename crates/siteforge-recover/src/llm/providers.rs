//! LLM provider resolution and API request/response types.

use serde::{Deserialize, Serialize};
use siteforge_core::config::LlmConfig;

use super::ModelError;

const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// LLM provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic {
        api_key: String,
        model: String,
    },
    OpenAI {
        api_key: String,
        model: String,
    },
    /// Any OpenAI-compatible API with Bearer token auth (OpenRouter, Together, vLLM, ...).
    OpenAICompatible {
        api_key: String,
        base_url: String,
        model: String,
    },
}

impl LlmProvider {
    /// Resolve from config and the process environment.
    pub fn from_env(config: &LlmConfig) -> Result<Self, ModelError> {
        Self::resolve(config, |var| std::env::var(var).ok())
    }

    /// Resolve a provider.
    ///
    /// Priority chain:
    /// 1. `config.provider` forced -> that provider (its key must be set)
    /// 2. `ANTHROPIC_API_KEY` -> Anthropic
    /// 3. `OPENAI_API_KEY` -> OpenAI
    /// 4. `SITEFORGE_API_KEY` plus a base URL -> OpenAI-compatible
    /// 5. `ModelError::NotConfigured`
    pub fn resolve(
        config: &LlmConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ModelError> {
        let key = |var: &str| lookup(var).filter(|k| !k.trim().is_empty());

        if let Some(forced) = config.provider.as_deref() {
            return match forced {
                "anthropic" => key("ANTHROPIC_API_KEY")
                    .map(|api_key| Self::anthropic(api_key, config))
                    .ok_or_else(|| missing_key(forced, "ANTHROPIC_API_KEY")),
                "openai" => key("OPENAI_API_KEY")
                    .map(|api_key| Self::openai(api_key, config))
                    .ok_or_else(|| missing_key(forced, "OPENAI_API_KEY")),
                "openai-compatible" => {
                    let api_key =
                        key("SITEFORGE_API_KEY").ok_or_else(|| missing_key(forced, "SITEFORGE_API_KEY"))?;
                    let base_url = base_url(config, &lookup).ok_or_else(|| {
                        ModelError::NotConfigured(
                            "provider openai-compatible needs llm.base_url or SITEFORGE_BASE_URL"
                                .to_string(),
                        )
                    })?;
                    Ok(Self::openai_compatible(api_key, base_url, config))
                }
                other => Err(ModelError::NotConfigured(format!(
                    "unknown provider '{other}'. Valid: anthropic, openai, openai-compatible"
                ))),
            };
        }

        if let Some(api_key) = key("ANTHROPIC_API_KEY") {
            return Ok(Self::anthropic(api_key, config));
        }
        if let Some(api_key) = key("OPENAI_API_KEY") {
            return Ok(Self::openai(api_key, config));
        }
        if let Some(api_key) = key("SITEFORGE_API_KEY")
            && let Some(base_url) = base_url(config, &lookup)
        {
            return Ok(Self::openai_compatible(api_key, base_url, config));
        }

        Err(ModelError::NotConfigured(
            "no LLM API key found. Set ANTHROPIC_API_KEY, OPENAI_API_KEY, or SITEFORGE_API_KEY \
             with SITEFORGE_BASE_URL"
                .to_string(),
        ))
    }

    fn anthropic(api_key: String, config: &LlmConfig) -> Self {
        Self::Anthropic {
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()),
        }
    }

    fn openai(api_key: String, config: &LlmConfig) -> Self {
        Self::OpenAI {
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        }
    }

    fn openai_compatible(api_key: String, base_url: String, config: &LlmConfig) -> Self {
        Self::OpenAICompatible {
            api_key,
            base_url,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        }
    }

    /// Human-readable provider name.
    pub fn provider_name(&self) -> &str {
        match self {
            Self::Anthropic { .. } => "Anthropic",
            Self::OpenAI { .. } => "OpenAI",
            Self::OpenAICompatible { .. } => "OpenAI-Compatible",
        }
    }

    /// Model name in use.
    pub fn model_name(&self) -> &str {
        match self {
            Self::Anthropic { model, .. }
            | Self::OpenAI { model, .. }
            | Self::OpenAICompatible { model, .. } => model,
        }
    }
}

fn base_url(config: &LlmConfig, lookup: &impl Fn(&str) -> Option<String>) -> Option<String> {
    lookup("SITEFORGE_BASE_URL")
        .or_else(|| config.base_url.clone())
        .filter(|url| !url.trim().is_empty())
}

fn missing_key(provider: &str, var: &str) -> ModelError {
    ModelError::NotConfigured(format!("provider {provider} selected but {var} is not set"))
}

// ---------------------------------------------------------------------------
// API Request / Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub(crate) struct AnthropicRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
pub(crate) struct OpenAIRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
pub(crate) struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct AnthropicResponse {
    pub content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
pub(crate) struct AnthropicContent {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
pub(crate) struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
pub(crate) struct OpenAIChoice {
    pub message: OpenAIChoiceMessage,
}

#[derive(Deserialize)]
pub(crate) struct OpenAIChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
