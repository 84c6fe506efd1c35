//! Shared assembler: renders a [`PageBlueprint`] into the five required files.
//!
//! Templates carry `__PLACEHOLDER__` tokens filled in a single pass, so a
//! substituted value is never scanned for further tokens. Every string that
//! came from the user reaches JavaScript as a JSON literal and HTML through
//! [`escape_html`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::{Value, json};
use siteforge_core::{Artifact, RequiredFile};

use super::blueprint::PageBlueprint;

pub(crate) const APP_IMPORTS: &str = "import React, { useState } from 'react';\nimport './styles.css';\n";

/// Components shared by every generated app entry. Expects `BRAND` and
/// `SECTIONS` constants in scope.
pub(crate) const SHARED_COMPONENTS: &str = r##"
function Nav() {
  const [open, setOpen] = useState(false);
  return (
    <header className="nav">
      <a className="nav__brand" href="#top">{BRAND}</a>
      <button
        className="nav__toggle"
        aria-label="Toggle navigation"
        aria-expanded={open}
        onClick={() => setOpen(!open)}
      >
        Menu
      </button>
      <nav className={open ? 'nav__links nav__links--open' : 'nav__links'} aria-label="Main">
        {SECTIONS.map((section) => (
          <a key={section.id} href={`#${section.id}`} onClick={() => setOpen(false)}>
            {section.title}
          </a>
        ))}
      </nav>
    </header>
  );
}

function ContactForm() {
  const [sent, setSent] = useState(false);
  if (sent) {
    return <p role="status">Thanks! We will be in touch shortly.</p>;
  }
  return (
    <form
      className="form"
      onSubmit={(event) => {
        event.preventDefault();
        setSent(true);
      }}
    >
      <label htmlFor="name">Name</label>
      <input id="name" name="name" autoComplete="name" required />
      <label htmlFor="email">Email</label>
      <input id="email" name="email" type="email" autoComplete="email" required />
      <label htmlFor="message">Message</label>
      <textarea id="message" name="message" rows="4" />
      <button className="button" type="submit">Send message</button>
    </form>
  );
}

function Section({ section }) {
  return (
    <section id={section.id} className="section" aria-labelledby={`${section.id}-title`}>
      <h2 id={`${section.id}-title`}>{section.heading}</h2>
      {section.intro && <p className="section__intro">{section.intro}</p>}
      {section.items.length > 0 && (
        <div className="grid">
          {section.items.map((item) => (
            <article key={item.title} className="card">
              <h3>{item.title}</h3>
              <p>{item.detail}</p>
              {item.meta && <span className="card__meta">{item.meta}</span>}
            </article>
          ))}
        </div>
      )}
      {section.id === 'contact' && <ContactForm />}
    </section>
  );
}

function Footer() {
  return (
    <footer className="footer">
      <p>
        &copy; {new Date().getFullYear()} {BRAND}. All rights reserved.
      </p>
    </footer>
  );
}
"##;

const GENERIC_APP: &str = r##"
const BRAND = __BRAND__;
const TAGLINE = __TAGLINE__;
const CTA = __CTA__;
const CTA_TARGET = __CTA_TARGET__;
const SECTIONS = __SECTIONS__;
__SHARED__
export default function App() {
  return (
    <>
      <Nav />
      <main id="top">
        <section className="hero" aria-label="Introduction">
          <h1>{BRAND}</h1>
          <p className="hero__tagline">{TAGLINE}</p>
          <a className="button" href={CTA_TARGET}>
            {CTA}
          </a>
        </section>
        {SECTIONS.map((section) => (
          <Section key={section.id} section={section} />
        ))}
      </main>
      <Footer />
    </>
  );
}
"##;

const INDEX_JS: &str = r"import React from 'react';
import { createRoot } from 'react-dom/client';
import App from './App';
import './styles.css';

const root = createRoot(document.getElementById('root'));
root.render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <meta name="theme-color" content="__ACCENT__" />
    <meta name="description" content="__DESCRIPTION__" />
    <meta property="og:title" content="__BRAND__" />
    <meta property="og:description" content="__DESCRIPTION__" />
    <meta property="og:type" content="website" />
    <title>__BRAND__</title>
  </head>
  <body>
    <noscript>You need to enable JavaScript to run this app.</noscript>
    <div id="root"></div>
  </body>
</html>
"#;

const STYLESHEET: &str = r":root {
  --color-accent: __ACCENT__;
  --color-accent-soft: __ACCENT_SOFT__;
  --color-bg: #ffffff;
  --color-surface: #f8fafc;
  --color-text: #0f172a;
  --color-muted: #64748b;
  --radius: 0.75rem;
  --space: clamp(1rem, 3vw, 2rem);
  --font-sans: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
}

@media (prefers-color-scheme: dark) {
  :root {
    --color-bg: __INK__;
    --color-surface: #1e293b;
    --color-text: #f1f5f9;
    --color-muted: #94a3b8;
  }
}

*,
*::before,
*::after {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: var(--font-sans);
  background: var(--color-bg);
  color: var(--color-text);
  line-height: 1.6;
}

a {
  color: var(--color-accent);
  transition: color 0.2s ease;
}

.sr-only {
  position: absolute;
  width: 1px;
  height: 1px;
  overflow: hidden;
  clip: rect(0 0 0 0);
  white-space: nowrap;
}

.nav {
  position: sticky;
  top: 0;
  z-index: 10;
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 1rem;
  padding: 1rem var(--space);
  background: color-mix(in srgb, var(--color-bg) 85%, transparent);
  backdrop-filter: blur(8px);
}

.nav__brand {
  font-weight: 700;
  text-decoration: none;
  color: var(--color-text);
}

.nav__links {
  display: flex;
  gap: 1.25rem;
}

.nav__links a {
  text-decoration: none;
  color: var(--color-muted);
}

.nav__links a:hover,
.nav__links a:focus-visible {
  color: var(--color-accent);
}

.nav__toggle {
  display: none;
}

.hero {
  display: grid;
  place-items: center;
  gap: 1rem;
  min-height: 60vh;
  padding: var(--space);
  text-align: center;
  background: linear-gradient(135deg, var(--color-accent-soft), var(--color-bg));
}

.hero h1 {
  margin: 0;
  font-size: clamp(2.25rem, 6vw, 4rem);
}

.hero__tagline {
  max-width: 40rem;
  color: var(--color-muted);
  font-size: 1.25rem;
}

.button {
  display: inline-block;
  padding: 0.75rem 1.5rem;
  border: none;
  border-radius: var(--radius);
  background: var(--color-accent);
  color: #ffffff;
  font: inherit;
  text-decoration: none;
  cursor: pointer;
  transition: transform 0.2s ease, box-shadow 0.2s ease;
}

.button:hover,
.button:focus-visible {
  transform: translateY(-2px);
  box-shadow: 0 8px 24px rgb(0 0 0 / 0.15);
}

.section {
  max-width: 72rem;
  margin: 0 auto;
  padding: calc(var(--space) * 2) var(--space);
}

.section__intro {
  color: var(--color-muted);
}

.grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr));
  gap: 1.5rem;
}

.card {
  padding: 1.5rem;
  border-radius: var(--radius);
  background: var(--color-surface);
  animation: fade-in 0.5s ease both;
}

.card__meta {
  font-weight: 600;
  color: var(--color-accent);
}

.form {
  display: grid;
  gap: 0.5rem;
  max-width: 32rem;
}

.form input,
.form textarea {
  padding: 0.75rem;
  border: 1px solid var(--color-muted);
  border-radius: var(--radius);
  font: inherit;
}

.footer {
  padding: var(--space);
  text-align: center;
  color: var(--color-muted);
}

@keyframes fade-in {
  from {
    opacity: 0;
    transform: translateY(8px);
  }
  to {
    opacity: 1;
    transform: none;
  }
}

@media (max-width: 768px) {
  .nav__toggle {
    display: inline-block;
  }

  .nav__links {
    display: none;
    position: absolute;
    top: 100%;
    left: 0;
    right: 0;
    flex-direction: column;
    padding: 1rem var(--space);
    background: var(--color-bg);
  }

  .nav__links--open {
    display: flex;
  }
}

@media (prefers-reduced-motion: reduce) {
  * {
    animation: none !important;
    transition: none !important;
  }
}
";

/// Render all five files with the generic app entry.
pub fn assemble(blueprint: &PageBlueprint) -> Artifact {
    assemble_with(blueprint, render_generic_app(blueprint), "")
}

/// Render the shared files around a category-specific app entry and extra CSS.
pub fn assemble_with(blueprint: &PageBlueprint, app: String, extra_css: &str) -> Artifact {
    let mut stylesheet = render_stylesheet(blueprint);
    if !extra_css.is_empty() {
        stylesheet.push('\n');
        stylesheet.push_str(extra_css);
    }

    Artifact::new()
        .with_file(RequiredFile::AppEntry.path(), app)
        .with_file(RequiredFile::BootstrapEntry.path(), INDEX_JS)
        .with_file(RequiredFile::Stylesheet.path(), stylesheet)
        .with_file(RequiredFile::HtmlShell.path(), render_html(blueprint))
        .with_file(RequiredFile::Manifest.path(), render_manifest(blueprint))
}

fn render_generic_app(blueprint: &PageBlueprint) -> String {
    let body = fill(
        GENERIC_APP,
        &[
            ("BRAND", js_literal(&blueprint.brand)),
            ("TAGLINE", js_literal(&blueprint.tagline)),
            ("CTA", js_literal(&blueprint.cta)),
            ("CTA_TARGET", js_literal(&blueprint.cta_target())),
            ("SECTIONS", js_literal(&blueprint.sections)),
            ("SHARED", SHARED_COMPONENTS.to_string()),
        ],
    );
    format!("{APP_IMPORTS}{body}")
}

fn render_stylesheet(blueprint: &PageBlueprint) -> String {
    fill(
        STYLESHEET,
        &[
            ("ACCENT", blueprint.palette.accent.to_string()),
            ("ACCENT_SOFT", blueprint.palette.accent_soft.to_string()),
            ("INK", blueprint.palette.ink.to_string()),
        ],
    )
}

fn render_html(blueprint: &PageBlueprint) -> String {
    fill(
        INDEX_HTML,
        &[
            ("ACCENT", blueprint.palette.accent.to_string()),
            ("BRAND", escape_html(&blueprint.brand)),
            ("DESCRIPTION", escape_html(&blueprint.description)),
        ],
    )
}

fn render_manifest(blueprint: &PageBlueprint) -> String {
    let manifest = json!({
        "name": package_name(&blueprint.brand),
        "version": "0.1.0",
        "private": true,
        "description": blueprint.description,
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "react-scripts": "5.0.1"
        },
        "scripts": {
            "start": "react-scripts start",
            "build": "react-scripts build",
            "test": "react-scripts test"
        },
        "browserslist": [">0.2%", "not dead", "not op_mini all"]
    });
    format!("{manifest:#}\n")
}

/// Substitute `__KEY__` tokens in one pass. Unknown tokens stay as they are.
pub(crate) fn fill(template: &str, values: &[(&str, String)]) -> String {
    static TOKEN_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = TOKEN_RE
        .get_or_init(|| Regex::new(r"__([A-Z]+(?:_[A-Z]+)*)__").ok())
        .as_ref()
    else {
        return template.to_string();
    };

    let values: BTreeMap<&str, &str> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
    re.replace_all(template, |caps: &Captures<'_>| match values.get(&caps[1]) {
        Some(value) => (*value).to_string(),
        None => caps[0].to_string(),
    })
    .into_owned()
}

/// A value as a JavaScript expression (JSON is valid JavaScript).
pub(crate) fn js_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_value(value).map_or_else(|_| "null".to_string(), |v: Value| v.to_string())
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// npm-safe package name derived from the brand.
fn package_name(brand: &str) -> String {
    let mut slug = String::new();
    for c in brand.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug: String = slug.chars().take(50).collect();
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "siteforge-site".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::blueprint::{Item, Palette, SectionCopy};
    use siteforge_core::Section;

    fn blueprint(brand: &str) -> PageBlueprint {
        let mut blueprint = PageBlueprint::new(brand, "Tagline", Palette::INDIGO)
            .description(format!("About {brand}"));
        blueprint.sections = vec![
            SectionCopy::new(Section::Services, "Services", "")
                .items([Item::new("One", "First").meta("$1")]),
            SectionCopy::new(Section::Contact, "Contact", ""),
        ];
        blueprint
    }

    #[test]
    fn test_fill_is_single_pass() {
        let out = fill(
            "a __X__ b __Y__ c __Z__",
            &[("X", "__Y__".to_string()), ("Y", "y".to_string())],
        );
        assert_eq!(out, "a __Y__ b y c __Z__");
    }

    #[test]
    fn test_fill_ignores_bem_class_names() {
        let out = fill("nav__links nav__links--open", &[]);
        assert_eq!(out, "nav__links nav__links--open");
    }

    #[test]
    fn test_assemble_produces_required_files() {
        let artifact = assemble(&blueprint("Acme"));
        for file in RequiredFile::ALL {
            let code = artifact.required(file).unwrap();
            assert!(!code.trim().is_empty(), "{file} is empty");
            assert!(!code.contains("__BRAND__"), "{file} has an unfilled token");
        }
        let app = artifact.required(RequiredFile::AppEntry).unwrap();
        assert!(app.contains("const BRAND = \"Acme\";"));
        assert!(app.contains("const CTA_TARGET = \"#contact\";"));
        assert!(app.contains("useState"));
    }

    #[test]
    fn test_hostile_brand_is_escaped() {
        let brand = "<script>\"Bob's\"</script>";
        let artifact = assemble(&blueprint(brand));
        let html = artifact.required(RequiredFile::HtmlShell).unwrap();
        assert!(html.contains("<title>&lt;script&gt;&quot;Bob&#39;s&quot;&lt;/script&gt;</title>"));
        assert!(!html.contains("<script>"));
        let app = artifact.required(RequiredFile::AppEntry).unwrap();
        assert!(app.contains(r#"const BRAND = "<script>\"Bob's\"</script>";"#));
    }

    #[test]
    fn test_manifest_is_valid_json() {
        let artifact = assemble(&blueprint("Joe's Pizza & Pasta"));
        let manifest: Value =
            serde_json::from_str(artifact.required(RequiredFile::Manifest).unwrap()).unwrap();
        assert_eq!(manifest["name"], "joe-s-pizza-pasta");
        assert_eq!(manifest["dependencies"]["react"], "^18.2.0");
    }

    #[test]
    fn test_package_name_fallback() {
        assert_eq!(package_name("!!!"), "siteforge-site");
        assert_eq!(package_name("Café Ünïcode"), "caf-n-code");
    }
}
