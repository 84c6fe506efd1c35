//! Turns noisy model output into a validated multi-file web project.
//!
//! Pipeline, leaves first:
//!
//! - [`classify`]: user text → [`Requirements`](siteforge_core::Requirements)
//! - [`extract`]: isolate the JSON payload from raw model text
//! - [`repair`]: idempotent textual fixes for common encoding defects
//! - [`validate`]: parse and enforce the required-file contract
//! - [`quality`]: heuristic score plus additive stylesheet enhancement
//! - [`fallback`]: deterministic, model-free synthesis
//! - [`orchestrator`]: sequencing, bounded retry, and the fallback decision
//!
//! [`Orchestrator::generate`] never fails: when the model or recovery does,
//! the fallback synthesizer supplies the artifact.

pub mod classify;
pub mod extract;
pub mod fallback;
pub mod llm;
pub mod orchestrator;
pub mod prompt;
pub mod quality;
pub mod repair;
pub mod validate;

pub use classify::classify;
pub use extract::extract;
pub use fallback::synthesize;
pub use llm::{CompletionClient, LlmClient, LlmProvider, ModelError, OfflineClient};
pub use orchestrator::{FallbackReason, Orchestrator, PipelineStage, RecoveryOutcome, recover};
pub use quality::{enhance, score};
pub use repair::repair;
pub use validate::{FileShape, RecoveryError, validate};
