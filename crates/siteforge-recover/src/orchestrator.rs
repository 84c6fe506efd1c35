//! Orchestrator: sequences model call, recovery, scoring and fallback.
//!
//! ```text
//! Start → model call → Extracting → Repairing → Validating → Scoring → (Enhancing)? → Validated
//!             └──────────────┴────────────┴────────────┴──→ FallingBack → Fallback
//! ```
//!
//! Only the model call suspends; everything after it is synchronous string
//! work. The orchestrator holds immutable configuration and the client, so
//! concurrent runs share nothing mutable.

use std::fmt;
use std::time::Duration;

use siteforge_core::config::{GenerationConfig, MAX_MODEL_RETRIES, MAX_RETRY_BACKOFF_MS};
use siteforge_core::{Artifact, QualityReport, Requirements};
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::extract::extract;
use crate::fallback::synthesize;
use crate::llm::{CompletionClient, ModelError};
use crate::prompt::{SYSTEM_PROMPT, user_prompt};
use crate::quality::{enhance, score};
use crate::repair::repair;
use crate::validate::{RecoveryError, validate};

/// Why the fallback synthesizer produced the artifact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FallbackReason {
    #[error("model call failed: {0}")]
    Model(#[from] ModelError),
    #[error("model output could not be recovered: {0}")]
    Recovery(#[from] RecoveryError),
}

/// Terminal state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// The model's output survived recovery.
    Validated {
        artifact: Artifact,
        report: QualityReport,
        /// Whether the enhancer changed the stylesheet.
        enhanced: bool,
    },
    /// Synthesized without the model.
    Fallback {
        artifact: Artifact,
        reason: FallbackReason,
    },
}

impl RecoveryOutcome {
    pub fn artifact(&self) -> &Artifact {
        match self {
            RecoveryOutcome::Validated { artifact, .. }
            | RecoveryOutcome::Fallback { artifact, .. } => artifact,
        }
    }

    pub fn into_artifact(self) -> Artifact {
        match self {
            RecoveryOutcome::Validated { artifact, .. }
            | RecoveryOutcome::Fallback { artifact, .. } => artifact,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RecoveryOutcome::Fallback { .. })
    }
}

/// Pipeline stages, as they appear in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    CallingModel,
    Extracting,
    Repairing,
    Validating,
    Scoring,
    Enhancing,
    FallingBack,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PipelineStage::CallingModel => "calling-model",
            PipelineStage::Extracting => "extracting",
            PipelineStage::Repairing => "repairing",
            PipelineStage::Validating => "validating",
            PipelineStage::Scoring => "scoring",
            PipelineStage::Enhancing => "enhancing",
            PipelineStage::FallingBack => "falling-back",
        })
    }
}

/// Extract → repair → validate over raw model output. Pure; usable offline.
pub fn recover(raw: &str) -> Result<Artifact, RecoveryError> {
    debug!(stage = %PipelineStage::Extracting, raw_chars = raw.len());
    let candidate = extract(raw);

    debug!(stage = %PipelineStage::Repairing, candidate_chars = candidate.len());
    let repaired = repair(&candidate);

    debug!(stage = %PipelineStage::Validating, repaired_chars = repaired.len());
    validate(&repaired)
}

/// Drives one generation request end to end.
pub struct Orchestrator<C> {
    client: C,
    config: GenerationConfig,
}

impl<C: CompletionClient> Orchestrator<C> {
    pub fn new(client: C, config: GenerationConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run the pipeline and report how the artifact was obtained.
    pub async fn run(&self, user_text: &str) -> RecoveryOutcome {
        let requirements = classify(user_text);
        debug!(
            website_type = %requirements.website_type,
            sections = requirements.sections.len(),
            "classified request"
        );

        let prompt = user_prompt(user_text, &requirements);
        let raw = match self.call_model(&prompt).await {
            Ok(raw) => raw,
            Err(err) => return fall_back(&requirements, user_text, err.into()),
        };

        match recover(&raw) {
            Ok(artifact) => self.finish(artifact),
            Err(err) => fall_back(&requirements, user_text, err.into()),
        }
    }

    /// Always produces an artifact that satisfies the required-file contract.
    pub async fn generate(&self, user_text: &str) -> Artifact {
        self.run(user_text).await.into_artifact()
    }

    /// One call plus up to `max_retries` (never more than two) retries on
    /// transient failures, with linear backoff.
    async fn call_model(&self, prompt: &str) -> Result<String, ModelError> {
        let retries = self.config.max_retries.min(MAX_MODEL_RETRIES);

        debug!(stage = %PipelineStage::CallingModel, attempt = 1);
        let mut result = self.client.complete(SYSTEM_PROMPT, prompt).await;
        for attempt in 1..=retries {
            match &result {
                Err(err) if err.is_transient() => {
                    let delay_ms = backoff_ms(self.config.retry_backoff_ms, attempt);
                    warn!(
                        attempt,
                        retries,
                        delay_ms,
                        error = %err,
                        "model call failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    debug!(stage = %PipelineStage::CallingModel, attempt = attempt + 1);
                    result = self.client.complete(SYSTEM_PROMPT, prompt).await;
                }
                _ => break,
            }
        }
        result
    }

    fn finish(&self, artifact: Artifact) -> RecoveryOutcome {
        debug!(stage = %PipelineStage::Scoring, files = artifact.len());
        let report = score(&artifact);
        if report.meets(self.config.quality_threshold) {
            info!(score = report.score, "validated model output");
            return RecoveryOutcome::Validated {
                artifact,
                report,
                enhanced: false,
            };
        }

        debug!(
            stage = %PipelineStage::Enhancing,
            score = report.score,
            threshold = self.config.quality_threshold
        );
        let enhanced_artifact = enhance(&artifact);
        let enhanced = enhanced_artifact != artifact;
        let report = if enhanced {
            score(&enhanced_artifact)
        } else {
            report
        };
        info!(score = report.score, enhanced, "validated model output");
        RecoveryOutcome::Validated {
            artifact: enhanced_artifact,
            report,
            enhanced,
        }
    }
}

/// Linear backoff before retry `attempt`, with the step clamped to
/// [`MAX_RETRY_BACKOFF_MS`].
fn backoff_ms(step_ms: u64, attempt: u32) -> u64 {
    step_ms
        .min(MAX_RETRY_BACKOFF_MS)
        .saturating_mul(u64::from(attempt))
}

fn fall_back(requirements: &Requirements, user_text: &str, reason: FallbackReason) -> RecoveryOutcome {
    warn!(
        stage = %PipelineStage::FallingBack,
        website_type = %requirements.website_type,
        reason = %reason,
        "using fallback synthesis"
    );
    RecoveryOutcome::Fallback {
        artifact: synthesize(requirements, user_text),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteforge_core::RequiredFile;

    #[test]
    fn test_recover_fenced_response() {
        let raw = r#"Sure! Here's the site:
```json
{
  "/src/App.js": {"code": "export default function App() { return <h1>Hi</h1>; }"},
  "/src/index.js": {"code": "import App from './App';"},
  "/src/styles.css": {"code": "body { margin: 0; }"},
  "/public/index.html": {"code": "<div id=\"root\"></div>"},
  "/package.json": {"code": "{\"name\": \"hi\"}"}
}
```
Let me know if you'd like any changes."#;
        let artifact = recover(raw).unwrap();
        assert_eq!(
            artifact.required(RequiredFile::Stylesheet),
            Some("body { margin: 0; }")
        );
    }

    #[test]
    fn test_recover_prose_is_parse_error() {
        let err = recover("I'm sorry, I can't generate that.").unwrap_err();
        assert!(matches!(err, RecoveryError::Parse(_)));
    }

    #[test]
    fn test_outcome_accessors() {
        let artifact = Artifact::new().with_file("/a", "b");
        let outcome = RecoveryOutcome::Fallback {
            artifact: artifact.clone(),
            reason: FallbackReason::Model(ModelError::EmptyResponse),
        };
        assert!(outcome.is_fallback());
        assert_eq!(outcome.artifact(), &artifact);
        assert_eq!(outcome.into_artifact(), artifact);
    }

    #[test]
    fn test_backoff_is_linear_and_clamped() {
        assert_eq!(backoff_ms(250, 1), 250);
        assert_eq!(backoff_ms(250, 2), 500);
        assert_eq!(backoff_ms(0, 2), 0);
        assert_eq!(backoff_ms(u64::MAX, 2), 2 * MAX_RETRY_BACKOFF_MS);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(PipelineStage::FallingBack.to_string(), "falling-back");
    }
}
