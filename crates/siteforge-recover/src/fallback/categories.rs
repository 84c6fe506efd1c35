//! Per-category blueprints for every website type except games.

use siteforge_core::{Requirements, Section};

use super::blueprint::{Item, PageBlueprint, Palette, SectionCopy};

pub fn business(requirements: &Requirements, brand: &str) -> PageBlueprint {
    PageBlueprint::new(
        brand,
        format!("Trusted {} for growing teams.", requirements.industry),
        Palette::INDIGO,
    )
    .description(format!(
        "{brand} delivers {} with clear scope and dependable results.",
        requirements.industry
    ))
    .cta("Book a consultation")
    .with_sections(requirements, |section| match section {
        Section::Services => Some(
            SectionCopy::new(section, "Services", "Practical help, priced up front.").items([
                Item::new("Strategy", "Workshops that turn goals into a plan."),
                Item::new("Implementation", "We build it with you, not for you."),
                Item::new("Ongoing support", "Monthly reviews and quick fixes."),
            ]),
        ),
        _ => None,
    })
}

pub fn ecommerce(requirements: &Requirements, brand: &str) -> PageBlueprint {
    PageBlueprint::new(
        brand,
        "Quality goods, shipped fast.",
        Palette::EMERALD,
    )
    .description(format!(
        "Shop {brand}: curated {} products with free returns.",
        requirements.industry
    ))
    .cta("Shop now")
    .with_sections(requirements, |section| match section {
        Section::Products => Some(
            SectionCopy::new(section, "Bestsellers", "Our most-loved products this month.")
                .items([
                    Item::new("Everyday tote", "Durable canvas, built to last.").meta("$39"),
                    Item::new("Ceramic mug", "Hand-glazed, dishwasher safe.").meta("$18"),
                    Item::new("Linen throw", "Soft, breathable, stonewashed.").meta("$64"),
                    Item::new("Gift box", "A little of everything.").meta("$85"),
                ]),
        ),
        Section::Features => Some(
            SectionCopy::new(section, "Why shop with us", "").items([
                Item::new("Free shipping", "On every order over $50."),
                Item::new("Easy returns", "30 days, no questions asked."),
                Item::new("Secure checkout", "All major cards and wallets."),
            ]),
        ),
        _ => None,
    })
}

pub fn restaurant(requirements: &Requirements, brand: &str) -> PageBlueprint {
    PageBlueprint::new(
        brand,
        "Seasonal plates, served warm.",
        Palette::EMBER,
    )
    .description(format!(
        "{brand} serves seasonal {} in a relaxed dining room. Reserve a table online.",
        requirements.industry
    ))
    .cta("Reserve a table")
    .with_sections(requirements, |section| match section {
        Section::Menu => Some(
            SectionCopy::new(section, "Tonight's menu", "Sourced locally, cooked to order.")
                .items([
                    Item::new("Burrata", "Heirloom tomato, basil oil, sea salt.").meta("$14"),
                    Item::new("Wood-fired chicken", "Lemon, garlic, charred greens.").meta("$26"),
                    Item::new("Wild mushroom risotto", "Parmesan, thyme, brown butter.")
                        .meta("$22"),
                    Item::new("Olive oil cake", "Citrus glaze, whipped cream.").meta("$10"),
                ]),
        ),
        Section::Booking => Some(
            SectionCopy::new(
                section,
                "Reservations",
                "Tables for up to eight. Larger groups, please call ahead.",
            )
            .items([
                Item::new("Lunch", "Tuesday to Sunday").meta("12:00 - 15:00"),
                Item::new("Dinner", "Every evening").meta("17:30 - 22:30"),
            ]),
        ),
        _ => None,
    })
}

pub fn portfolio(requirements: &Requirements, brand: &str) -> PageBlueprint {
    PageBlueprint::new(
        brand,
        "Selected work in design and craft.",
        Palette::SLATE,
    )
    .description(format!(
        "Portfolio of {brand}: {} projects, case studies and contact details.",
        requirements.industry
    ))
    .cta("See the work")
    .with_sections(requirements, |section| match section {
        Section::Gallery => Some(
            SectionCopy::new(section, "Selected work", "A few recent projects.").items([
                Item::new("Brand refresh", "Identity system for a local roastery.").meta("2024"),
                Item::new("Field guide", "Editorial design, 120 pages.").meta("2023"),
                Item::new("Product launch", "Campaign visuals and landing page.").meta("2023"),
                Item::new("Annual report", "Data storytelling for a nonprofit.").meta("2022"),
            ]),
        ),
        Section::About => Some(SectionCopy::new(
            section,
            "About",
            format!(
                "Independent {} practice working with {}.",
                requirements.industry, requirements.audience
            ),
        )),
        _ => None,
    })
}

pub fn healthcare(requirements: &Requirements, brand: &str) -> PageBlueprint {
    PageBlueprint::new(
        brand,
        "Compassionate care, close to home.",
        Palette::TEAL,
    )
    .description(format!(
        "{brand} offers {} services with same-week appointments.",
        requirements.industry
    ))
    .cta("Book an appointment")
    .with_sections(requirements, |section| match section {
        Section::Services => Some(
            SectionCopy::new(section, "Our services", "Care for every stage of life.").items([
                Item::new("General check-ups", "Preventive care and screenings."),
                Item::new("Specialist referrals", "Coordinated with trusted partners."),
                Item::new("Telehealth", "Video visits for follow-ups."),
            ]),
        ),
        Section::Team => Some(
            SectionCopy::new(section, "Our clinicians", "Experienced, board-certified staff.")
                .items([
                    Item::new("Dr. Amara Patel", "Family medicine"),
                    Item::new("Dr. Lucas Moreau", "Internal medicine"),
                    Item::new("Nadia Okafor, RN", "Nurse practitioner"),
                ]),
        ),
        _ => None,
    })
}

pub fn landing(requirements: &Requirements, brand: &str) -> PageBlueprint {
    PageBlueprint::new(
        brand,
        "The simplest way to get started.",
        Palette::VIOLET,
    )
    .description(format!(
        "{brand}: {} made simple. Join the waitlist today.",
        requirements.industry
    ))
    .cta("Join the waitlist")
    .with_sections(requirements, |section| match section {
        Section::Features => Some(
            SectionCopy::new(section, "Why it works", "Built for speed from day one.").items([
                Item::new("Set up in minutes", "No credit card, no configuration."),
                Item::new("Works everywhere", "Desktop, tablet and phone."),
                Item::new("Private by default", "Your data stays yours."),
            ]),
        ),
        _ => None,
    })
}

pub fn blog(requirements: &Requirements, brand: &str) -> PageBlueprint {
    PageBlueprint::new(
        brand,
        "Stories, notes and ideas worth sharing.",
        Palette::ROSE,
    )
    .description(format!(
        "{brand}: writing about {} for {}.",
        requirements.industry, requirements.audience
    ))
    .cta("Start reading")
    .with_sections(requirements, |section| match section {
        Section::Posts => Some(
            SectionCopy::new(section, "Latest posts", "Fresh from the desk.").items([
                Item::new("Why we slowed down", "Lessons from a year of fewer, better posts.")
                    .meta("6 min read"),
                Item::new("A field guide to focus", "Small habits that add up.")
                    .meta("8 min read"),
                Item::new("Reader questions, answered", "Your most common questions.")
                    .meta("5 min read"),
            ]),
        ),
        _ => None,
    })
}

pub fn education(requirements: &Requirements, brand: &str) -> PageBlueprint {
    PageBlueprint::new(
        brand,
        "Learn by doing, at your own pace.",
        Palette::AMBER,
    )
    .description(format!(
        "{brand} offers {} courses for {} with mentors and real projects.",
        requirements.industry, requirements.audience
    ))
    .cta("Browse courses")
    .with_sections(requirements, |section| match section {
        Section::Courses => Some(
            SectionCopy::new(section, "Courses", "Cohort-based and self-paced options.").items([
                Item::new("Foundations", "Core concepts with weekly exercises.").meta("6 weeks"),
                Item::new("Applied projects", "Build three portfolio pieces.").meta("8 weeks"),
                Item::new("Mentored capstone", "One-to-one guidance to the finish.")
                    .meta("10 weeks"),
            ]),
        ),
        Section::Team => Some(
            SectionCopy::new(section, "Instructors", "Practitioners who love to teach.").items([
                Item::new("Priya Raman", "Curriculum lead"),
                Item::new("Tom Adeyemi", "Senior instructor"),
                Item::new("Elena Sousa", "Mentor"),
            ]),
        ),
        _ => None,
    })
}
