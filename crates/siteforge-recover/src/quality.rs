//! Quality scoring and enhancement of validated artifacts.
//!
//! The score is a keyword-evidence heuristic: it starts at 100 and each
//! category without evidence subtracts its penalty. It never inspects
//! whether the code works, only whether the usual markers of a finished
//! design are present.

use std::fmt;

use siteforge_core::{Artifact, QualityReport, RequiredFile};

/// One scored concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityCategory {
    Accessibility,
    ResponsiveDesign,
    Seo,
    ModernCss,
    DarkTheme,
    Motion,
    StateManagement,
}

impl QualityCategory {
    pub const ALL: [QualityCategory; 7] = [
        QualityCategory::Accessibility,
        QualityCategory::ResponsiveDesign,
        QualityCategory::Seo,
        QualityCategory::ModernCss,
        QualityCategory::DarkTheme,
        QualityCategory::Motion,
        QualityCategory::StateManagement,
    ];

    pub const fn penalty(self) -> u8 {
        match self {
            QualityCategory::Accessibility | QualityCategory::ModernCss => 15,
            QualityCategory::ResponsiveDesign | QualityCategory::DarkTheme => 20,
            QualityCategory::Seo | QualityCategory::Motion | QualityCategory::StateManagement => {
                10
            }
        }
    }

    /// Lower-case markers; any one of them counts as evidence.
    pub const fn evidence(self) -> &'static [&'static str] {
        match self {
            QualityCategory::Accessibility => {
                &["aria-", "alt=", "role=", "<label", "sr-only", "tabindex"]
            }
            QualityCategory::ResponsiveDesign => &[
                "@media",
                "display: flex",
                "display:flex",
                "display: grid",
                "display:grid",
                "minmax(",
                "clamp(",
            ],
            QualityCategory::Seo => &["name=\"description\"", "property=\"og:", "<title"],
            QualityCategory::ModernCss => {
                &["var(--", ":root", "clamp(", "backdrop-filter", "gap:"]
            }
            QualityCategory::DarkTheme => &[
                "prefers-color-scheme",
                "dark",
                "#0f172a",
                "#111827",
                "#0a0a0a",
            ],
            QualityCategory::Motion => &["transition", "@keyframes", "animation"],
            QualityCategory::StateManagement => {
                &["usestate", "usereducer", "usecontext", "createcontext"]
            }
        }
    }

    pub const fn suggestion(self) -> &'static str {
        match self {
            QualityCategory::Accessibility => {
                "Add ARIA labels, alt text and form labels for assistive technology"
            }
            QualityCategory::ResponsiveDesign => {
                "Use flexbox or grid layouts with media queries for small screens"
            }
            QualityCategory::Seo => "Add a <title>, a meta description and Open Graph tags",
            QualityCategory::ModernCss => {
                "Define design tokens as CSS custom properties on :root"
            }
            QualityCategory::DarkTheme => {
                "Support dark mode with a prefers-color-scheme media query"
            }
            QualityCategory::Motion => "Add transitions or keyframe animations for feedback",
            QualityCategory::StateManagement => {
                "Manage interactive state with React hooks such as useState"
            }
        }
    }

    fn is_evident_in(self, haystack: &str) -> bool {
        self.evidence().iter().any(|marker| haystack.contains(marker))
    }
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityCategory::Accessibility => write!(f, "missing accessibility features"),
            QualityCategory::ResponsiveDesign => write!(f, "no responsive layout detected"),
            QualityCategory::Seo => write!(f, "missing SEO metadata"),
            QualityCategory::ModernCss => write!(f, "no modern CSS features"),
            QualityCategory::DarkTheme => write!(f, "no dark theme support"),
            QualityCategory::Motion => write!(f, "no transitions or animations"),
            QualityCategory::StateManagement => write!(f, "no interactive state management"),
        }
    }
}

/// Score an artifact. Pure and deterministic.
pub fn score(artifact: &Artifact) -> QualityReport {
    let haystack = evidence_text(artifact);

    let mut score: u8 = 100;
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();
    let mut present = |category: QualityCategory| {
        let found = category.is_evident_in(&haystack);
        if !found {
            score = score.saturating_sub(category.penalty());
            issues.push(category.to_string());
            suggestions.push(category.suggestion().to_string());
        }
        found
    };

    let has_accessibility = present(QualityCategory::Accessibility);
    let has_responsive_design = present(QualityCategory::ResponsiveDesign);
    let has_seo = present(QualityCategory::Seo);
    let has_modern_css = present(QualityCategory::ModernCss);
    present(QualityCategory::DarkTheme);
    present(QualityCategory::Motion);
    present(QualityCategory::StateManagement);

    QualityReport {
        score,
        issues,
        suggestions,
        has_accessibility,
        has_responsive_design,
        has_seo,
        has_modern_css,
    }
}

/// Lower-cased concatenation of every file except the manifest.
///
/// Extra source files count: a model that splits its UI into
/// `/src/components/*.js` still gets credit for the markup it wrote there.
fn evidence_text(artifact: &Artifact) -> String {
    artifact
        .files()
        .filter(|(path, _)| *path != RequiredFile::Manifest.path())
        .map(|(_, file)| file.code.to_lowercase())
        .collect::<Vec<_>>()
        .join("\n")
}

const TOKENS_MARKER: &str = "/* siteforge:design-tokens */";
const MOTION_MARKER: &str = "/* siteforge:motion */";

const DESIGN_TOKENS: &str = r"/* siteforge:design-tokens */
:root {
  --color-bg: #ffffff;
  --color-surface: #f8fafc;
  --color-text: #0f172a;
  --color-muted: #64748b;
  --color-accent: #6366f1;
  --radius: 0.75rem;
  --space: clamp(1rem, 2vw, 1.5rem);
  --font-sans: system-ui, -apple-system, 'Segoe UI', sans-serif;
}

@media (prefers-color-scheme: dark) {
  :root {
    --color-bg: #0f172a;
    --color-surface: #1e293b;
    --color-text: #f1f5f9;
    --color-muted: #94a3b8;
  }
}
";

const MOTION: &str = r"/* siteforge:motion */
a,
button {
  transition: color 0.2s ease, background-color 0.2s ease, transform 0.2s ease;
}

section {
  animation: siteforge-fade-in 0.6s ease both;
}

@keyframes siteforge-fade-in {
  from {
    opacity: 0;
    transform: translateY(12px);
  }
  to {
    opacity: 1;
    transform: none;
  }
}

@media (prefers-reduced-motion: reduce) {
  * {
    animation: none !important;
    transition: none !important;
  }
}
";

/// Add design tokens and motion to the stylesheet where they are missing.
///
/// Additive and idempotent; no file other than the stylesheet changes.
pub fn enhance(artifact: &Artifact) -> Artifact {
    let path = RequiredFile::Stylesheet.path();
    let Some(css) = artifact.code(path) else {
        return artifact.clone();
    };
    let lower = css.to_lowercase();

    let mut enhanced = css.to_string();
    if !css.contains(TOKENS_MARKER) && !lower.contains(":root") {
        enhanced = format!("{DESIGN_TOKENS}\n{enhanced}");
    }
    if !css.contains(MOTION_MARKER)
        && !["transition", "animation", "@keyframes"]
            .iter()
            .any(|marker| lower.contains(marker))
    {
        if !enhanced.ends_with('\n') {
            enhanced.push('\n');
        }
        enhanced.push('\n');
        enhanced.push_str(MOTION);
    }

    if enhanced == css {
        return artifact.clone();
    }
    artifact.clone().with_file(path, enhanced)
}
