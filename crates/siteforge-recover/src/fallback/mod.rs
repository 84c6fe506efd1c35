//! Fallback synthesis: a deterministic, model-free artifact for any request.
//!
//! Used whenever the model call or recovery fails. Output always satisfies
//! the required-file contract and is byte-identical for identical inputs.

pub mod blueprint;
mod categories;
mod game;
pub mod render;

use std::sync::OnceLock;

use regex::Regex;
use siteforge_core::{Artifact, Requirements, WebsiteType};

pub use blueprint::{Item, PageBlueprint, Palette, SectionCopy};

/// Longest display name taken from the request, in characters.
const MAX_NAME_CHARS: usize = 60;

/// Synthesize a complete site for `requirements`.
///
/// `original_user_text` is only mined for a display name (and, for games, a
/// prize pool); classification is the caller's job.
pub fn synthesize(requirements: &Requirements, original_user_text: &str) -> Artifact {
    let brand = display_name(original_user_text)
        .unwrap_or_else(|| fallback_name(requirements.website_type).to_string());
    tracing::debug!(
        website_type = %requirements.website_type,
        brand = %brand,
        sections = requirements.sections.len(),
        "synthesizing fallback artifact"
    );

    let blueprint = match requirements.website_type {
        WebsiteType::Business => categories::business(requirements, &brand),
        WebsiteType::Ecommerce => categories::ecommerce(requirements, &brand),
        WebsiteType::Restaurant => categories::restaurant(requirements, &brand),
        WebsiteType::Portfolio => categories::portfolio(requirements, &brand),
        WebsiteType::Healthcare => categories::healthcare(requirements, &brand),
        WebsiteType::Landing => categories::landing(requirements, &brand),
        WebsiteType::Blog => categories::blog(requirements, &brand),
        WebsiteType::Education => categories::education(requirements, &brand),
        WebsiteType::Game => return game::render(requirements, &brand, original_user_text),
    };
    render::assemble(&blueprint)
}

/// Name taken from "... for <name> website ...", trimmed and capped.
pub fn display_name(user_text: &str) -> Option<String> {
    static NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = NAME_RE
        .get_or_init(|| Regex::new(r"(?i)\bfor\s+(.+?)\s+website\b").ok())
        .as_ref()?;

    let name = re.captures(user_text)?.get(1)?.as_str().trim();
    let name: String = name.chars().take(MAX_NAME_CHARS).collect();
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn fallback_name(website_type: WebsiteType) -> &'static str {
    match website_type {
        WebsiteType::Business => "Summit Partners",
        WebsiteType::Ecommerce => "Northwind Goods",
        WebsiteType::Restaurant => "The Olive Table",
        WebsiteType::Portfolio => "Studio Atlas",
        WebsiteType::Healthcare => "Harbor Health",
        WebsiteType::Landing => "Launchpad",
        WebsiteType::Game => "Arena League",
        WebsiteType::Blog => "Field Notes",
        WebsiteType::Education => "Brightpath Academy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::validate::validate;
    use siteforge_core::RequiredFile;

    #[test]
    fn test_display_name() {
        assert_eq!(
            display_name("Build a landing page for Acme Rockets website please"),
            Some("Acme Rockets".into())
        );
        assert_eq!(
            display_name("make one FOR   Joe's Pizza   WEBSITE"),
            Some("Joe's Pizza".into())
        );
        assert_eq!(display_name("a website for my bakery"), None);
    }

    #[test]
    fn test_display_name_capped() {
        let long = format!("for {} website", "x".repeat(100));
        assert_eq!(display_name(&long).unwrap().chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_every_category_validates() {
        for website_type in WebsiteType::ALL {
            let requirements = Requirements {
                website_type,
                sections: siteforge_core::Section::ALL.to_vec(),
                ..Requirements::default()
            };
            let artifact = synthesize(&requirements, "a site");
            let json = serde_json::to_string(&artifact).unwrap();
            let validated = validate(&json)
                .unwrap_or_else(|e| panic!("{website_type} fallback invalid: {e}"));
            assert_eq!(validated, artifact);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Create a restaurant website for Luna Trattoria website with online booking";
        let requirements = classify(text);
        assert_eq!(synthesize(&requirements, text), synthesize(&requirements, text));
    }

    #[test]
    fn test_fallback_name_used_without_match() {
        let artifact = synthesize(&Requirements::default(), "something vague");
        let html = artifact.required(RequiredFile::HtmlShell).unwrap();
        assert!(html.contains("<title>Summit Partners</title>"));
    }

    #[test]
    fn test_tournament_scenario() {
        let text = "Create a tournament website with leaderboard and 50000 prize pool";
        let requirements = classify(text);
        assert_eq!(requirements.website_type, WebsiteType::Game);

        let artifact = synthesize(&requirements, text);
        for file in RequiredFile::ALL {
            assert!(artifact.required(file).is_some_and(|c| !c.trim().is_empty()));
        }
        let app = artifact.required(RequiredFile::AppEntry).unwrap();
        assert!(app.contains("function Leaderboard()"));
        assert!(app.contains("rankPlayers"));
        assert!(app.contains("$50,000"));
    }
}
