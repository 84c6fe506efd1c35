//! Request classification: map free-form intent text to [`Requirements`].
//!
//! Keyword tables are checked in a fixed precedence and the first match wins;
//! nothing is scored or ranked. Gaming terms come first so a "tournament
//! platform" never falls through to ecommerce or landing-page keywords.

use siteforge_core::{Requirements, Section, WebsiteType};
use std::collections::{BTreeSet, HashSet};

/// Website-type precedence. Order matters: first matching row wins.
const TYPE_RULES: &[(WebsiteType, &[&str])] = &[
    (
        WebsiteType::Game,
        &[
            "tournament",
            "leaderboard",
            "esports",
            "e-sports",
            "gaming",
            "game",
            "gamer",
            "arcade",
            "prize pool",
            "clan",
            "guild",
            "speedrun",
        ],
    ),
    (
        WebsiteType::Ecommerce,
        &[
            "ecommerce",
            "e-commerce",
            "online store",
            "shop",
            "store",
            "cart",
            "checkout",
            "boutique",
            "merch",
            "marketplace",
        ],
    ),
    (
        WebsiteType::Restaurant,
        &[
            "restaurant",
            "cafe",
            "café",
            "bistro",
            "dining",
            "bakery",
            "pizza",
            "pizzeria",
            "coffee",
            "catering",
            "sushi",
            "food",
        ],
    ),
    (
        WebsiteType::Healthcare,
        &[
            "clinic",
            "healthcare",
            "health",
            "medical",
            "doctor",
            "hospital",
            "dental",
            "dentist",
            "therapy",
            "pharmacy",
            "wellness",
        ],
    ),
    (
        WebsiteType::Education,
        &[
            "school",
            "academy",
            "education",
            "course",
            "tutor",
            "tutoring",
            "university",
            "bootcamp",
            "lesson",
        ],
    ),
    (
        WebsiteType::Portfolio,
        &[
            "portfolio",
            "photographer",
            "photography",
            "designer",
            "resume",
            "artist",
            "freelancer",
            "showcase",
        ],
    ),
    (
        WebsiteType::Blog,
        &["blog", "magazine", "journal", "articles", "vlog", "podcast"],
    ),
    (
        WebsiteType::Landing,
        &[
            "landing page",
            "landing",
            "launch",
            "waitlist",
            "saas",
            "startup",
            "app",
            "beta",
        ],
    ),
];

const INDUSTRY_RULES: &[(&str, &[&str])] = &[
    (
        "esports",
        &["esports", "e-sports", "tournament", "gaming", "gamer"],
    ),
    (
        "food & beverage",
        &[
            "restaurant",
            "cafe",
            "café",
            "food",
            "bakery",
            "pizza",
            "coffee",
            "dining",
        ],
    ),
    (
        "healthcare",
        &["clinic", "medical", "doctor", "dental", "hospital", "health"],
    ),
    (
        "fitness",
        &["gym", "fitness", "yoga", "trainer", "workout", "pilates"],
    ),
    (
        "fashion",
        &["fashion", "clothing", "apparel", "boutique", "jewelry", "sneaker"],
    ),
    (
        "real estate",
        &["real estate", "realty", "property", "apartment", "realtor"],
    ),
    (
        "finance",
        &["finance", "bank", "accounting", "investment", "insurance", "crypto"],
    ),
    ("legal", &["law firm", "lawyer", "legal", "attorney"]),
    (
        "education",
        &["school", "course", "academy", "tutor", "university", "bootcamp"],
    ),
    (
        "creative",
        &["photographer", "photography", "designer", "artist", "studio"],
    ),
    ("travel", &["travel", "hotel", "tour", "resort", "hostel"]),
    (
        "technology",
        &["saas", "software", "tech", "ai", "startup", "app", "platform"],
    ),
];

const FEATURE_RULES: &[(&str, &[&str])] = &[
    ("contact form", &["contact", "form", "enquiry", "inquiry"]),
    (
        "online booking",
        &["booking", "book", "appointment", "reservation", "reserve"],
    ),
    ("shopping cart", &["cart", "checkout", "shop", "store", "buy"]),
    ("product catalog", &["product", "catalog", "catalogue", "inventory"]),
    ("leaderboard", &["leaderboard", "ranking", "standings"]),
    ("tournament brackets", &["tournament", "bracket"]),
    ("prize pool", &["prize pool", "prize", "reward"]),
    ("image gallery", &["gallery", "photo", "image", "portfolio"]),
    ("testimonials", &["testimonial", "review"]),
    ("pricing plans", &["pricing", "price", "plan", "subscription"]),
    ("newsletter signup", &["newsletter", "subscribe", "waitlist"]),
    ("articles", &["blog", "article", "post"]),
    ("search", &["search", "filter"]),
    ("location map", &["map", "location", "directions", "address"]),
    ("online menu", &["menu"]),
    ("team profiles", &["team", "staff", "instructor"]),
    ("faq", &["faq", "questions"]),
    ("dark mode", &["dark mode", "dark theme"]),
];

const STYLE_RULES: &[(&str, &[&str])] = &[
    ("dark", &["dark", "neon", "cyberpunk"]),
    ("minimal", &["minimal", "minimalist", "clean", "simple"]),
    ("elegant", &["elegant", "luxury", "premium", "classy"]),
    ("playful", &["playful", "fun", "colorful", "vibrant"]),
    ("corporate", &["corporate", "professional", "enterprise"]),
    ("bold", &["bold", "striking"]),
];

const AUDIENCE_RULES: &[(&str, &[&str])] = &[
    ("gamers", &["gamer", "player", "esports", "gaming", "streamer"]),
    ("students", &["student", "learner", "pupil"]),
    ("families", &["family", "families", "kid", "children", "parent"]),
    ("patients", &["patient"]),
    ("developers", &["developer", "engineer", "programmer"]),
    (
        "professionals",
        &["professional", "executive", "b2b", "business", "enterprise"],
    ),
    ("shoppers", &["shopper", "customer", "buyer"]),
];

/// Lower-cased request text plus its word tokens.
struct Signals {
    lower: String,
    tokens: HashSet<String>,
}

impl Signals {
    fn new(text: &str) -> Self {
        let lower = text.to_lowercase();
        let tokens = lower
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .map(|t| t.trim_matches('-'))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { lower, tokens }
    }

    /// Multi-word keywords match as substrings; single words match whole
    /// tokens, tolerating a plural `s`/`es`.
    fn mentions(&self, keyword: &str) -> bool {
        if keyword.contains(' ') {
            return self.lower.contains(keyword);
        }
        self.tokens.contains(keyword)
            || self.tokens.contains(&format!("{keyword}s"))
            || self.tokens.contains(&format!("{keyword}es"))
    }

    fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.mentions(k))
    }

    fn first_label<'a>(&self, rules: &[(&'a str, &[&str])]) -> Option<&'a str> {
        rules
            .iter()
            .find(|(_, keywords)| self.mentions_any(keywords))
            .map(|(label, _)| *label)
    }
}

/// Classify a generation request. Total: unmatched input yields `business`.
pub fn classify(user_text: &str) -> Requirements {
    let signals = Signals::new(user_text);

    let website_type = TYPE_RULES
        .iter()
        .find(|(_, keywords)| signals.mentions_any(keywords))
        .map_or(WebsiteType::Business, |(ty, _)| *ty);

    let industry = signals
        .first_label(INDUSTRY_RULES)
        .unwrap_or_else(|| default_industry(website_type))
        .to_string();

    let key_features: BTreeSet<String> = FEATURE_RULES
        .iter()
        .filter(|(_, keywords)| signals.mentions_any(keywords))
        .map(|(name, _)| (*name).to_string())
        .collect();

    let style = signals
        .first_label(STYLE_RULES)
        .unwrap_or_else(|| default_style(website_type))
        .to_string();

    let audience = signals
        .first_label(AUDIENCE_RULES)
        .unwrap_or_else(|| default_audience(website_type))
        .to_string();

    Requirements {
        website_type,
        industry,
        key_features,
        sections: sections_for(&signals, website_type),
        style,
        audience,
    }
}

/// Hero first, then every requested or category-default section in the
/// fixed [`Section`] scan order.
fn sections_for(signals: &Signals, website_type: WebsiteType) -> Vec<Section> {
    let defaults = default_sections(website_type);
    let mut sections = vec![Section::Hero];
    sections.extend(Section::ALL.into_iter().filter(|&section| {
        section != Section::Hero
            && (defaults.contains(&section) || signals.mentions_any(section_keywords(section)))
    }));
    sections
}

fn section_keywords(section: Section) -> &'static [&'static str] {
    match section {
        Section::Hero => &[],
        Section::About => &["about", "story", "mission", "history"],
        Section::Services => &["service", "consulting", "solution"],
        Section::Features => &["feature", "benefit"],
        Section::Menu => &["menu", "dish"],
        Section::Products => &["product", "catalog", "merch"],
        Section::Gallery => &["gallery", "photo", "showcase"],
        Section::Tournaments => &["tournament", "bracket", "match"],
        Section::Leaderboard => &["leaderboard", "ranking", "standings"],
        Section::Courses => &["course", "class", "curriculum", "lesson"],
        Section::Posts => &["blog", "article", "post", "news"],
        Section::Pricing => &["pricing", "price", "plan", "subscription", "tier"],
        Section::Testimonials => &["testimonial", "review"],
        Section::Team => &["team", "staff", "founder", "instructor"],
        Section::Faq => &["faq", "questions"],
        Section::Booking => &["booking", "book", "appointment", "reservation"],
        Section::Contact => &["contact", "email", "phone", "location", "address"],
    }
}

fn default_sections(website_type: WebsiteType) -> &'static [Section] {
    match website_type {
        WebsiteType::Business => &[
            Section::About,
            Section::Services,
            Section::Testimonials,
            Section::Contact,
        ],
        WebsiteType::Ecommerce => &[
            Section::Products,
            Section::Features,
            Section::Testimonials,
            Section::Contact,
        ],
        WebsiteType::Restaurant => &[
            Section::About,
            Section::Menu,
            Section::Gallery,
            Section::Booking,
            Section::Contact,
        ],
        WebsiteType::Portfolio => &[
            Section::About,
            Section::Gallery,
            Section::Testimonials,
            Section::Contact,
        ],
        WebsiteType::Healthcare => &[
            Section::About,
            Section::Services,
            Section::Team,
            Section::Booking,
            Section::Contact,
        ],
        WebsiteType::Landing => &[
            Section::Features,
            Section::Pricing,
            Section::Testimonials,
            Section::Faq,
        ],
        WebsiteType::Game => &[Section::Tournaments, Section::Leaderboard, Section::Faq],
        WebsiteType::Blog => &[Section::About, Section::Posts, Section::Contact],
        WebsiteType::Education => &[
            Section::About,
            Section::Courses,
            Section::Team,
            Section::Faq,
            Section::Contact,
        ],
    }
}

fn default_industry(website_type: WebsiteType) -> &'static str {
    match website_type {
        WebsiteType::Business => "professional services",
        WebsiteType::Ecommerce => "retail",
        WebsiteType::Restaurant => "food & beverage",
        WebsiteType::Portfolio => "creative",
        WebsiteType::Healthcare => "healthcare",
        WebsiteType::Landing => "technology",
        WebsiteType::Game => "esports",
        WebsiteType::Blog => "media",
        WebsiteType::Education => "education",
    }
}

fn default_style(website_type: WebsiteType) -> &'static str {
    match website_type {
        WebsiteType::Game => "dark",
        WebsiteType::Portfolio | WebsiteType::Blog => "minimal",
        WebsiteType::Restaurant => "elegant",
        _ => "modern",
    }
}

fn default_audience(website_type: WebsiteType) -> &'static str {
    match website_type {
        WebsiteType::Business => "local customers",
        WebsiteType::Ecommerce => "shoppers",
        WebsiteType::Restaurant => "local diners",
        WebsiteType::Portfolio => "potential clients",
        WebsiteType::Healthcare => "patients",
        WebsiteType::Landing => "early adopters",
        WebsiteType::Game => "gamers",
        WebsiteType::Blog => "readers",
        WebsiteType::Education => "students",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_request_is_game() {
        let req = classify("Create a tournament website with leaderboard and 50000 prize pool");
        assert_eq!(req.website_type, WebsiteType::Game);
        assert!(req.key_features.contains("leaderboard"));
        assert!(req.key_features.contains("prize pool"));
        assert!(req.has_section(Section::Leaderboard));
    }

    #[test]
    fn test_gaming_wins_over_platform_and_shop() {
        let req = classify("An ecommerce platform app for esports tournament leaderboard and shop");
        assert_eq!(req.website_type, WebsiteType::Game);
    }

    #[test]
    fn test_default_is_business() {
        let req = classify("");
        assert_eq!(req.website_type, WebsiteType::Business);
        assert_eq!(req.sections[0], Section::Hero);

        let req = classify("something completely unrelated");
        assert_eq!(req.website_type, WebsiteType::Business);
    }

    #[test]
    fn test_category_keywords() {
        assert_eq!(
            classify("Build an online store for handmade candles").website_type,
            WebsiteType::Ecommerce
        );
        assert_eq!(
            classify("Website for my pizza restaurant").website_type,
            WebsiteType::Restaurant
        );
        assert_eq!(
            classify("A dental clinic with appointment booking").website_type,
            WebsiteType::Healthcare
        );
        assert_eq!(
            classify("Photographer portfolio").website_type,
            WebsiteType::Portfolio
        );
        assert_eq!(
            classify("Landing page for our SaaS launch").website_type,
            WebsiteType::Landing
        );
        assert_eq!(
            classify("Coding bootcamp with online courses").website_type,
            WebsiteType::Education
        );
        assert_eq!(
            classify("Personal travel blog").website_type,
            WebsiteType::Blog
        );
    }

    #[test]
    fn test_whole_word_matching() {
        // "happy" must not match "app"
        let req = classify("a happy consultancy");
        assert_eq!(req.website_type, WebsiteType::Business);
    }

    #[test]
    fn test_plural_tolerance() {
        assert_eq!(classify("retro games").website_type, WebsiteType::Game);
        assert_eq!(
            classify("three clinics in town").website_type,
            WebsiteType::Healthcare
        );
    }

    #[test]
    fn test_sections_follow_scan_order_not_input_order() {
        let a = classify("contact us, see our pricing, read the faq, meet the team");
        let b = classify("meet the team, read the faq, see our pricing, contact us");
        assert_eq!(a.sections, b.sections);
        assert_eq!(a.sections[0], Section::Hero);
        let mut sorted = a.sections.clone();
        sorted.sort();
        assert_eq!(a.sections, sorted);
    }

    #[test]
    fn test_sections_are_unique() {
        let req = classify("restaurant menu with menu photos and booking booking");
        let unique: HashSet<_> = req.sections.iter().collect();
        assert_eq!(unique.len(), req.sections.len());
    }

    #[test]
    fn test_style_and_audience() {
        let req = classify("elegant bakery site for families");
        assert_eq!(req.style, "elegant");
        assert_eq!(req.audience, "families");

        let req = classify("tournament hub");
        assert_eq!(req.style, "dark");
        assert_eq!(req.audience, "gamers");
    }

    #[test]
    fn test_industry_table_and_default() {
        assert_eq!(classify("yoga studio business").industry, "fitness");
        assert_eq!(classify("a shop").industry, "retail");
    }

    #[test]
    fn test_deterministic() {
        let text = "Modern SaaS landing page with pricing, testimonials and a waitlist";
        assert_eq!(classify(text), classify(text));
    }
}
