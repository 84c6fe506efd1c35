//! Configuration for model access and the recovery pipeline.
//!
//! Load order: `.siteforge/config.toml` → environment variables → defaults.
//! The loaded value is handed to the client and orchestrator at construction;
//! nothing reads configuration from global state afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard upper bound on additional model attempts after the first call.
pub const MAX_MODEL_RETRIES: u32 = 2;

/// Upper bound on the linear backoff step between model attempts.
pub const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

/// Top-level SiteForge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteforgeConfig {
    pub llm: LlmConfig,
    pub generation: GenerationConfig,
}

/// Generative model access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Force a provider: `anthropic`, `openai`, or `openai-compatible`.
    /// When unset the provider is picked from whichever API key is present.
    pub provider: Option<String>,
    /// Model override; each provider has its own default.
    pub model: Option<String>,
    /// Base URL for `openai-compatible` servers.
    pub base_url: Option<String>,
    pub max_tokens: u32,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
}

/// Recovery pipeline tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Additional model attempts on transient failures (at most 2).
    pub max_retries: u32,
    /// Linear backoff step: attempt `n` waits `n * retry_backoff_ms`.
    pub retry_backoff_ms: u64,
    /// Artifacts scoring below this are passed through the enhancer.
    pub quality_threshold: u8,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: None,
            model: None,
            base_url: None,
            max_tokens: 8192,
            timeout_secs: 120,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_MODEL_RETRIES,
            retry_backoff_ms: 1000,
            quality_threshold: 70,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    target: &mut T,
) {
    if let Some(v) = lookup(var)
        && let Ok(n) = v.trim().parse()
    {
        *target = n;
    }
}

impl SiteforgeConfig {
    /// Load config from `.siteforge/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".siteforge").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("invalid config at {}", config_path.display()))?
        } else {
            Self::default()
        };

        config.apply_overrides(|var| std::env::var(var).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `SITEFORGE_*` overrides from `lookup` (normally the process environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        env_override(
            &lookup,
            "SITEFORGE_MAX_RETRIES",
            &mut self.generation.max_retries,
        );
        env_override(
            &lookup,
            "SITEFORGE_RETRY_BACKOFF_MS",
            &mut self.generation.retry_backoff_ms,
        );
        env_override(
            &lookup,
            "SITEFORGE_QUALITY_THRESHOLD",
            &mut self.generation.quality_threshold,
        );
        env_override(&lookup, "SITEFORGE_MAX_TOKENS", &mut self.llm.max_tokens);
        env_override(&lookup, "SITEFORGE_TIMEOUT_SECS", &mut self.llm.timeout_secs);

        if let Some(model) = lookup("SITEFORGE_MODEL").filter(|m| !m.trim().is_empty()) {
            self.llm.model = Some(model.trim().to_string());
        }
    }

    /// Reject values the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.generation.max_retries > MAX_MODEL_RETRIES {
            anyhow::bail!(
                "max_retries ({}) exceeds the limit of {} additional model attempts",
                self.generation.max_retries,
                MAX_MODEL_RETRIES
            );
        }
        if self.generation.retry_backoff_ms > MAX_RETRY_BACKOFF_MS {
            anyhow::bail!(
                "retry_backoff_ms ({}) exceeds the limit of {} ms",
                self.generation.retry_backoff_ms,
                MAX_RETRY_BACKOFF_MS
            );
        }
        if self.generation.quality_threshold > 100 {
            anyhow::bail!(
                "quality_threshold ({}) must be between 0 and 100",
                self.generation.quality_threshold
            );
        }
        Ok(())
    }
}
