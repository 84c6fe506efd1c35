//! Structured interpretation of a free-form generation request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Closed set of project categories.
///
/// Every category has its own fallback generator, so adding a variant here
/// forces the synthesizer dispatch to handle it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebsiteType {
    #[default]
    Business,
    Ecommerce,
    Restaurant,
    Portfolio,
    Healthcare,
    Landing,
    Game,
    Blog,
    Education,
}

impl WebsiteType {
    pub const ALL: [WebsiteType; 9] = [
        WebsiteType::Business,
        WebsiteType::Ecommerce,
        WebsiteType::Restaurant,
        WebsiteType::Portfolio,
        WebsiteType::Healthcare,
        WebsiteType::Landing,
        WebsiteType::Game,
        WebsiteType::Blog,
        WebsiteType::Education,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Ecommerce => "ecommerce",
            Self::Restaurant => "restaurant",
            Self::Portfolio => "portfolio",
            Self::Healthcare => "healthcare",
            Self::Landing => "landing",
            Self::Game => "game",
            Self::Blog => "blog",
            Self::Education => "education",
        }
    }
}

impl fmt::Display for WebsiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page sections, declared in the fixed order they are emitted in.
///
/// The derived `Ord` follows declaration order, which is what keeps section
/// lists deterministic regardless of how the request was phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Hero,
    About,
    Services,
    Features,
    Menu,
    Products,
    Gallery,
    Tournaments,
    Leaderboard,
    Courses,
    Posts,
    Pricing,
    Testimonials,
    Team,
    Faq,
    Booking,
    Contact,
}

impl Section {
    pub const ALL: [Section; 17] = [
        Section::Hero,
        Section::About,
        Section::Services,
        Section::Features,
        Section::Menu,
        Section::Products,
        Section::Gallery,
        Section::Tournaments,
        Section::Leaderboard,
        Section::Courses,
        Section::Posts,
        Section::Pricing,
        Section::Testimonials,
        Section::Team,
        Section::Faq,
        Section::Booking,
        Section::Contact,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Services => "services",
            Self::Features => "features",
            Self::Menu => "menu",
            Self::Products => "products",
            Self::Gallery => "gallery",
            Self::Tournaments => "tournaments",
            Self::Leaderboard => "leaderboard",
            Self::Courses => "courses",
            Self::Posts => "posts",
            Self::Pricing => "pricing",
            Self::Testimonials => "testimonials",
            Self::Team => "team",
            Self::Faq => "faq",
            Self::Booking => "booking",
            Self::Contact => "contact",
        }
    }

    /// Navigation label shown in generated pages.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::About => "About",
            Self::Services => "Services",
            Self::Features => "Features",
            Self::Menu => "Menu",
            Self::Products => "Shop",
            Self::Gallery => "Gallery",
            Self::Tournaments => "Tournaments",
            Self::Leaderboard => "Leaderboard",
            Self::Courses => "Courses",
            Self::Posts => "Articles",
            Self::Pricing => "Pricing",
            Self::Testimonials => "Reviews",
            Self::Team => "Team",
            Self::Faq => "FAQ",
            Self::Booking => "Book",
            Self::Contact => "Contact",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output for one generation request. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub website_type: WebsiteType,
    pub industry: String,
    pub key_features: BTreeSet<String>,
    /// Always starts with [`Section::Hero`].
    pub sections: Vec<Section>,
    pub style: String,
    pub audience: String,
}

impl Requirements {
    pub fn has_section(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            website_type: WebsiteType::Business,
            industry: "professional services".to_string(),
            key_features: BTreeSet::new(),
            sections: vec![Section::Hero],
            style: "modern".to_string(),
            audience: "general public".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order_matches_declaration() {
        let mut shuffled = vec![Section::Contact, Section::Hero, Section::Leaderboard];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Section::Hero, Section::Leaderboard, Section::Contact]
        );
        assert!(Section::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_website_type_serializes_lowercase() {
        let json = serde_json::to_string(&WebsiteType::Ecommerce).unwrap();
        assert_eq!(json, "\"ecommerce\"");
        let parsed: WebsiteType = serde_json::from_str("\"game\"").unwrap();
        assert_eq!(parsed, WebsiteType::Game);
    }

    #[test]
    fn test_requirements_camel_case() {
        let json = serde_json::to_value(Requirements::default()).unwrap();
        assert_eq!(json["websiteType"], "business");
        assert_eq!(json["sections"][0], "hero");
        assert!(json.get("keyFeatures").is_some());
    }
}
