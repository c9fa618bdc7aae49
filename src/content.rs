//! Profile content loading.
//!
//! Everything the page shows comes from a single `content.toml` in the
//! content directory. Content is read once, validated, and never mutated.
//!
//! ## File Layout
//!
//! ```text
//! content/
//! ├── content.toml        # Profile, lists, links
//! ├── config.toml         # Site config (optional, see `config`)
//! └── assets/             # Copied verbatim to the output root
//!     ├── me.jpg
//!     └── resume.pdf
//! ```
//!
//! ## Sections
//!
//! ```toml
//! [profile]
//! name = "Ada Example"
//! taglines = ["Systems engineer", "Occasional writer"]
//! image = "assets/me.jpg"
//! about = """Markdown shown in the *about* dialog."""
//!
//! [[experience]]
//! title = "Staff Engineer"
//! period = "2021 – present"
//! summary = "Storage team lead."
//! detail = "Optional markdown for the detail dialog."
//!
//! [[skills]]       # name, level, icon
//! [[projects]]     # title, summary, detail, url?, tags?
//! [[testimonials]] # author, quote
//! [[certifications]] # name, image
//! [[metrics]]      # label, value
//! [[articles]]     # title, description, url
//! [[links]]        # label, url (mailto:, https:, tel:)
//! ```
//!
//! Lists keep file order; nothing is sorted. Unknown keys are rejected.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONTENT_FILENAME: &str = "content.toml";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("No {CONTENT_FILENAME} found in {0}")]
    Missing(String),
    #[error("Content validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Content {
    pub profile: Profile,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub metrics: Vec<CareerMetric>,
    #[serde(default)]
    pub articles: Vec<ArticleRef>,
    #[serde(default)]
    pub links: Vec<ContactLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub taglines: Vec<String>,
    /// Profile photo: a path relative to the content directory or a URL.
    #[serde(default)]
    pub image: String,
    /// One-line intro under the taglines.
    #[serde(default)]
    pub summary: Option<String>,
    /// Markdown body of the about dialog.
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Resume file, relative to the content directory or a URL.
    #[serde(default)]
    pub resume: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceEntry {
    pub title: String,
    #[serde(default)]
    pub organization: Option<String>,
    /// Free-form date range, e.g. `"2019 – 2022"`.
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub summary: String,
    /// Markdown for the detail dialog. Entries without it are not clickable.
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub level: String,
    /// Icon glyph (usually a single emoji).
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CareerMetric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleRef {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

const OUTBOUND_SCHEMES: [(&str, &str); 4] = [
    ("https://", "https"),
    ("http://", "http"),
    ("mailto:", "mailto"),
    ("tel:", "tel"),
];

/// Lowercase scheme of an absolute outbound link, ignoring surrounding
/// whitespace and case. `None` for anything the page won't link to.
pub fn outbound_scheme(url: &str) -> Option<&'static str> {
    let lower = url.trim().to_ascii_lowercase();
    OUTBOUND_SCHEMES
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix) && lower.len() > prefix.len())
        .map(|(_, scheme)| *scheme)
}

/// Whether `url` is an absolute link the page may render as an outbound href.
pub fn is_outbound_link(url: &str) -> bool {
    outbound_scheme(url).is_some()
}

/// Web links open in a new tab; `mailto:` and `tel:` hand off to the OS.
pub fn is_web_link(url: &str) -> bool {
    matches!(outbound_scheme(url), Some("http" | "https"))
}

fn require(value: &str, what: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

fn require_link(url: &str, what: &str) -> Result<(), ContentError> {
    if !is_outbound_link(url) {
        return Err(ContentError::Validation(format!(
            "{what} must be an absolute http(s), mailto: or tel: link, got '{url}'"
        )));
    }
    Ok(())
}

impl Content {
    /// Check required fields and link schemes.
    pub fn validate(&self) -> Result<(), ContentError> {
        require(&self.profile.name, "profile.name")?;
        for (i, e) in self.experience.iter().enumerate() {
            require(&e.title, &format!("experience[{i}].title"))?;
        }
        for (i, s) in self.skills.iter().enumerate() {
            require(&s.name, &format!("skills[{i}].name"))?;
        }
        for (i, p) in self.projects.iter().enumerate() {
            require(&p.title, &format!("projects[{i}].title"))?;
            if let Some(url) = &p.url {
                require_link(url, &format!("projects[{i}].url"))?;
            }
        }
        for (i, t) in self.testimonials.iter().enumerate() {
            require(&t.quote, &format!("testimonials[{i}].quote"))?;
        }
        for (i, c) in self.certifications.iter().enumerate() {
            require(&c.name, &format!("certifications[{i}].name"))?;
        }
        for (i, m) in self.metrics.iter().enumerate() {
            require(&m.label, &format!("metrics[{i}].label"))?;
            require(&m.value, &format!("metrics[{i}].value"))?;
        }
        for (i, a) in self.articles.iter().enumerate() {
            require(&a.title, &format!("articles[{i}].title"))?;
            require_link(&a.url, &format!("articles[{i}].url"))?;
        }
        for (i, l) in self.links.iter().enumerate() {
            require(&l.label, &format!("links[{i}].label"))?;
            require_link(&l.url, &format!("links[{i}].url"))?;
        }
        Ok(())
    }

    /// Title of the about dialog.
    pub fn about_title(&self) -> String {
        format!("About {}", self.profile.name)
    }
}

/// Parse and validate content from a TOML string.
pub fn parse_content(toml_str: &str) -> Result<Content, ContentError> {
    let content: Content = toml::from_str(toml_str)?;
    content.validate()?;
    Ok(content)
}

/// Load `content.toml` from the content directory.
pub fn load_content(root: &Path) -> Result<Content, ContentError> {
    let path = root.join(CONTENT_FILENAME);
    if !path.exists() {
        return Err(ContentError::Missing(root.display().to_string()));
    }
    let text = fs::read_to_string(&path)?;
    parse_content(&text)
}

/// A complete starter `content.toml`.
///
/// Used by the `gen-content` CLI command.
pub fn stock_content_toml() -> &'static str {
    r##"# Simple Folio Content
# ====================
# Every list renders in the order written here.

[profile]
name = "Jordan Example"
taglines = ["Backend engineer", "Open-source maintainer"]
image = "assets/profile.jpg"
summary = "I build reliable systems and write about what breaks them."
location = "Lisbon, Portugal"
email = "jordan@example.com"
resume = "assets/resume.pdf"
about = """
I have spent a decade on storage engines and the services around them.

Outside work I maintain a couple of **command-line tools** and write the
occasional long post about debugging.
"""

[[metrics]]
label = "Years of experience"
value = "10+"

[[metrics]]
label = "Projects shipped"
value = "25"

[[experience]]
title = "Staff Engineer"
organization = "Example Storage Co."
period = "2021 – present"
summary = "Lead for the replication team."
detail = """
- Designed the second-generation replication log.
- Cut p99 failover time from minutes to seconds.
"""

[[experience]]
title = "Senior Engineer"
organization = "Example Payments"
period = "2016 – 2021"
summary = "Ledger and settlement services."

[[skills]]
name = "Rust"
level = "Expert"
icon = "🦀"

[[skills]]
name = "PostgreSQL"
level = "Advanced"
icon = "🐘"

[[projects]]
title = "logtail"
summary = "Structured log follower for the terminal."
detail = "Follows JSON logs, pretty-prints fields, and filters by level."
url = "https://github.com/example/logtail"
tags = ["rust", "cli"]

[[testimonials]]
author = "A. Colleague, Engineering Manager"
quote = "Jordan makes hard problems look routine."

[[certifications]]
name = "Certified Kubernetes Administrator"
image = "https://placehold.co/96x96?text=CKA"

[[articles]]
title = "What fsync really promises"
description = "A tour of durability guarantees across filesystems."
url = "https://blog.example.com/fsync"

[[links]]
label = "Email"
url = "mailto:jordan@example.com"

[[links]]
label = "GitHub"
url = "https://github.com/example"
"##
}
