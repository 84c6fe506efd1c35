//! Prompt construction for site generation.

use siteforge_core::{Requirements, Section};

/// System prompt describing the five-file JSON contract.
pub const SYSTEM_PROMPT: &str = include_str!("prompts/system.md");

/// Render the user prompt from the request text and its classification.
pub fn user_prompt(user_text: &str, requirements: &Requirements) -> String {
    let mut prompt = format!("## Request\n\n{}\n\n", user_text.trim());
    prompt.push_str("## Interpreted requirements\n\n");
    prompt.push_str(&format!("- Website type: {}\n", requirements.website_type));
    prompt.push_str(&format!("- Industry: {}\n", requirements.industry));
    prompt.push_str(&format!("- Audience: {}\n", requirements.audience));
    prompt.push_str(&format!("- Visual style: {}\n", requirements.style));

    let sections: Vec<&str> = requirements
        .sections
        .iter()
        .map(|s| match s {
            Section::Hero => "hero",
            other => other.title(),
        })
        .collect();
    prompt.push_str(&format!("- Sections, in order: {}\n", sections.join(", ")));

    if !requirements.key_features.is_empty() {
        let features: Vec<&str> = requirements.key_features.iter().map(String::as_str).collect();
        prompt.push_str(&format!("- Key features: {}\n", features.join(", ")));
    }

    prompt.push_str(
        "\nBuild the complete site now. Return only the JSON object mapping file paths to {\"code\": ...}.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteforge_core::WebsiteType;

    #[test]
    fn test_system_prompt_names_required_files() {
        for path in siteforge_core::RequiredFile::paths() {
            assert!(SYSTEM_PROMPT.contains(path), "system prompt misses {path}");
        }
    }

    #[test]
    fn test_user_prompt_includes_requirements() {
        let mut requirements = Requirements {
            website_type: WebsiteType::Restaurant,
            industry: "italian dining".into(),
            sections: vec![Section::Hero, Section::Menu, Section::Contact],
            ..Requirements::default()
        };
        requirements.key_features.insert("online menu".into());

        let prompt = user_prompt("  Pasta place site  ", &requirements);
        assert!(prompt.starts_with("## Request\n\nPasta place site\n"));
        assert!(prompt.contains("- Website type: restaurant"));
        assert!(prompt.contains("- Sections, in order: hero, Menu, Contact"));
        assert!(prompt.contains("- Key features: online menu"));
    }

    #[test]
    fn test_user_prompt_layout() {
        let requirements = Requirements {
            sections: vec![Section::Hero, Section::Contact],
            ..Requirements::default()
        };
        let prompt = user_prompt("A law firm", &requirements);
        assert!(prompt.contains("A law firm\n\n## Interpreted requirements\n\n- Website type: business\n"));
        assert!(prompt.contains("- Sections, in order: hero, Contact\n\nBuild the complete site now."));
        assert!(!prompt.contains("Key features"));
    }
}
