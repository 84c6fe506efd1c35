//! Page blueprints: the content a category generator hands to the renderer.

use serde::Serialize;
use siteforge_core::{Requirements, Section};

/// Colour scheme for one generated site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: &'static str,
    pub accent_soft: &'static str,
    /// Background used in dark mode.
    pub ink: &'static str,
}

impl Palette {
    pub const INDIGO: Palette = Palette {
        accent: "#4f46e5",
        accent_soft: "#e0e7ff",
        ink: "#0f172a",
    };
    pub const EMBER: Palette = Palette {
        accent: "#c2410c",
        accent_soft: "#ffedd5",
        ink: "#1c1917",
    };
    pub const EMERALD: Palette = Palette {
        accent: "#047857",
        accent_soft: "#d1fae5",
        ink: "#022c22",
    };
    pub const TEAL: Palette = Palette {
        accent: "#0f766e",
        accent_soft: "#ccfbf1",
        ink: "#042f2e",
    };
    pub const ROSE: Palette = Palette {
        accent: "#be123c",
        accent_soft: "#ffe4e6",
        ink: "#1f0a12",
    };
    pub const SLATE: Palette = Palette {
        accent: "#334155",
        accent_soft: "#e2e8f0",
        ink: "#0a0a0a",
    };
    pub const VIOLET: Palette = Palette {
        accent: "#7c3aed",
        accent_soft: "#ede9fe",
        ink: "#111827",
    };
    pub const AMBER: Palette = Palette {
        accent: "#b45309",
        accent_soft: "#fef3c7",
        ink: "#1c1917",
    };
    pub const NEON: Palette = Palette {
        accent: "#22d3ee",
        accent_soft: "#164e63",
        ink: "#0a0a0a",
    };
}

/// One card inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}

impl Item {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            meta: None,
        }
    }

    #[must_use]
    pub fn meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }
}

/// Copy for one page section, serialized straight into the app entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCopy {
    pub id: &'static str,
    pub title: &'static str,
    pub heading: String,
    pub intro: String,
    pub items: Vec<Item>,
}

impl SectionCopy {
    pub fn new(section: Section, heading: impl Into<String>, intro: impl Into<String>) -> Self {
        Self {
            id: section.as_str(),
            title: section.title(),
            heading: heading.into(),
            intro: intro.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items = items.into_iter().collect();
        self
    }
}

/// Everything the renderer needs for one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBlueprint {
    pub brand: String,
    pub tagline: String,
    pub description: String,
    pub palette: Palette,
    pub cta: String,
    pub sections: Vec<SectionCopy>,
}

impl PageBlueprint {
    pub fn new(brand: &str, tagline: impl Into<String>, palette: Palette) -> Self {
        Self {
            brand: brand.to_string(),
            tagline: tagline.into(),
            description: String::new(),
            palette,
            cta: "Get in touch".to_string(),
            sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn cta(mut self, cta: impl Into<String>) -> Self {
        self.cta = cta.into();
        self
    }

    /// Fill one section per requested (non-hero) section. `custom` supplies
    /// category copy; anything it declines gets the generic copy.
    #[must_use]
    pub fn with_sections(
        mut self,
        requirements: &Requirements,
        custom: impl Fn(Section) -> Option<SectionCopy>,
    ) -> Self {
        self.sections = requirements
            .sections
            .iter()
            .filter(|section| **section != Section::Hero)
            .map(|section| custom(*section).unwrap_or_else(|| generic_copy(*section, requirements)))
            .collect();
        self
    }

    /// Anchor the hero call-to-action points at.
    pub fn cta_target(&self) -> String {
        let target = self
            .sections
            .iter()
            .find(|s| s.id == Section::Contact.as_str() || s.id == Section::Booking.as_str())
            .or_else(|| self.sections.first())
            .map_or("top", |s| s.id);
        format!("#{target}")
    }
}

/// Copy used when a category has nothing specific to say about a section.
pub fn generic_copy(section: Section, requirements: &Requirements) -> SectionCopy {
    let industry = &requirements.industry;
    let audience = &requirements.audience;
    match section {
        Section::Hero => SectionCopy::new(section, "Welcome", ""),
        Section::About => SectionCopy::new(
            section,
            "About us",
            format!("A small, dedicated team working in {industry}, built around {audience}."),
        )
        .items([
            Item::new("Experience", "Years of hands-on work behind every project."),
            Item::new("Care", "Clear communication from first call to final delivery."),
            Item::new("Results", "Work measured by what it does for you."),
        ]),
        Section::Services => SectionCopy::new(
            section,
            "What we do",
            "Focused services with transparent scope and timelines.",
        )
        .items([
            Item::new("Consulting", "Understand the problem before proposing a fix."),
            Item::new("Delivery", "Hands-on execution with weekly check-ins."),
            Item::new("Support", "We stay available after launch."),
        ]),
        Section::Features => {
            let items: Vec<Item> = if requirements.key_features.is_empty() {
                vec![
                    Item::new("Fast", "Loads quickly on every device."),
                    Item::new("Accessible", "Usable with keyboard and screen readers."),
                    Item::new("Responsive", "Adapts from phones to wide screens."),
                ]
            } else {
                requirements
                    .key_features
                    .iter()
                    .map(|feature| {
                        Item::new(capitalize(feature), format!("Built in: {feature}."))
                    })
                    .collect()
            };
            SectionCopy::new(section, "Features", "Everything you need, nothing you don't.")
                .items(items)
        }
        Section::Menu => SectionCopy::new(section, "Menu", "Seasonal dishes, updated weekly.")
            .items([
                Item::new("House special", "Ask us what the kitchen is excited about.").meta("$18"),
                Item::new("Daily soup", "Made fresh every morning.").meta("$8"),
                Item::new("Dessert", "A sweet finish.").meta("$9"),
            ]),
        Section::Products => SectionCopy::new(
            section,
            "Featured products",
            "Hand-picked favourites from our catalog.",
        )
        .items([
            Item::new("Starter kit", "Everything to get going.").meta("$29"),
            Item::new("Pro bundle", "For people who want more.").meta("$79"),
            Item::new("Gift card", "Let them choose.").meta("$50"),
        ]),
        Section::Gallery => SectionCopy::new(section, "Gallery", "A look at recent work.").items(
            ["One", "Two", "Three", "Four", "Five", "Six"]
                .into_iter()
                .map(|n| Item::new(format!("Project {n}"), "Placeholder for an image caption.")),
        ),
        Section::Tournaments => SectionCopy::new(
            section,
            "Tournaments",
            "Upcoming competitions open for registration.",
        )
        .items([
            Item::new("Weekly cup", "Open bracket, every Saturday.").meta("Free entry"),
            Item::new("Monthly major", "Seeded bracket for ranked players.").meta("Invite"),
        ]),
        Section::Leaderboard => SectionCopy::new(
            section,
            "Leaderboard",
            "Current standings across all events.",
        ),
        Section::Courses => SectionCopy::new(
            section,
            "Courses",
            "Structured learning paths with real projects.",
        )
        .items([
            Item::new("Foundations", "Start from zero with guided lessons.").meta("6 weeks"),
            Item::new("Intermediate", "Build on the basics with projects.").meta("8 weeks"),
            Item::new("Advanced", "Deep dives and mentoring.").meta("10 weeks"),
        ]),
        Section::Posts => SectionCopy::new(section, "Latest articles", "Notes, guides and news.")
            .items([
                Item::new("Getting started", "A short guide for newcomers.").meta("5 min read"),
                Item::new("Behind the scenes", "How we work day to day.").meta("7 min read"),
                Item::new("What's next", "Plans for the months ahead.").meta("4 min read"),
            ]),
        Section::Pricing => SectionCopy::new(
            section,
            "Pricing",
            "Simple plans. Upgrade or cancel at any time.",
        )
        .items([
            Item::new("Starter", "For individuals trying things out.").meta("$0 / month"),
            Item::new("Growth", "For small teams that need more.").meta("$19 / month"),
            Item::new("Scale", "For organisations with custom needs.").meta("Contact us"),
        ]),
        Section::Testimonials => SectionCopy::new(
            section,
            "What people say",
            format!("Feedback from {audience}."),
        )
        .items([
            Item::new("\u{201c}Exactly what we needed.\u{201d}", "Alex P."),
            Item::new("\u{201c}Friendly, fast and reliable.\u{201d}", "Sam R."),
            Item::new("\u{201c}We recommend them to everyone.\u{201d}", "Jordan K."),
        ]),
        Section::Team => SectionCopy::new(section, "Meet the team", "The people behind the work.")
            .items([
                Item::new("Morgan Lee", "Founder"),
                Item::new("Riley Chen", "Lead designer"),
                Item::new("Casey Brooks", "Operations"),
            ]),
        Section::Faq => SectionCopy::new(section, "Frequently asked questions", "").items([
            Item::new("How do I get started?", "Send us a message and we reply within a day."),
            Item::new("What does it cost?", "Pricing depends on scope; quotes are free."),
            Item::new("Can I change my plan?", "Yes, at any time."),
        ]),
        Section::Booking => SectionCopy::new(
            section,
            "Book a time",
            "Pick a slot that works for you and we'll confirm by email.",
        )
        .items([
            Item::new("Choose", "Select a service and a preferred time."),
            Item::new("Confirm", "We confirm availability within hours."),
            Item::new("Visit", "Arrive a few minutes early. That's it."),
        ]),
        Section::Contact => SectionCopy::new(
            section,
            "Contact",
            "Questions, ideas or feedback? We'd love to hear from you.",
        ),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_sections_skips_hero_and_prefers_custom() {
        let requirements = Requirements {
            sections: vec![Section::Hero, Section::Menu, Section::Contact],
            ..Requirements::default()
        };
        let blueprint = PageBlueprint::new("Cafe", "Coffee", Palette::EMBER).with_sections(
            &requirements,
            |section| {
                (section == Section::Menu)
                    .then(|| SectionCopy::new(section, "Our coffee", "Roasted in house."))
            },
        );
        let ids: Vec<&str> = blueprint.sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["menu", "contact"]);
        assert_eq!(blueprint.sections[0].heading, "Our coffee");
        assert_eq!(blueprint.cta_target(), "#contact");
    }

    #[test]
    fn test_cta_target_without_sections() {
        let blueprint = PageBlueprint::new("X", "Y", Palette::SLATE);
        assert_eq!(blueprint.cta_target(), "#top");
    }

    #[test]
    fn test_features_use_key_features() {
        let mut requirements = Requirements::default();
        requirements.key_features.insert("online booking".into());
        let copy = generic_copy(Section::Features, &requirements);
        assert_eq!(copy.items.len(), 1);
        assert_eq!(copy.items[0].title, "Online booking");
    }

    #[test]
    fn test_item_meta_omitted_when_absent() {
        let json = serde_json::to_string(&Item::new("a", "b")).unwrap();
        assert_eq!(json, r#"{"title":"a","detail":"b"}"#);
    }
}
