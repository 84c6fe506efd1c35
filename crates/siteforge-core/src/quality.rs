//! Quality report attached to a validated artifact.

use serde::{Deserialize, Serialize};

/// Heuristic 0–100 estimate of design/engineering completeness.
///
/// Always derived from an [`crate::artifact::Artifact`]; stale as soon as the
/// artifact changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub score: u8,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub has_accessibility: bool,
    pub has_responsive_design: bool,
    #[serde(rename = "hasSEO")]
    pub has_seo: bool,
    #[serde(rename = "hasModernCSS")]
    pub has_modern_css: bool,
}

impl QualityReport {
    /// Whether the score clears `threshold`.
    pub fn meets(&self, threshold: u8) -> bool {
        self.score >= threshold
    }
}
