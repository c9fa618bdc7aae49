//! HTML page generation.
//!
//! Renders the [`ProfileView`] into a single `index.html` and copies the
//! content directory's `assets/` next to it.
//!
//! ## Page Structure
//!
//! Sections always render in this order; a section whose list is empty is
//! left out entirely:
//!
//! ```text
//! header (name, theme toggle)
//! hero → about → metrics → experience → skills → projects →
//! certifications → testimonials → articles → contact
//! footer
//! modal (one dialog shared by the "about" and "detail" slots)
//! ```
//!
//! Every list renders in content order. Nothing is sorted or filtered.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html     # The page (CSS and JS inline)
//! └── assets/        # Copied from content/assets/
//! ```
//!
//! ## State in the Markup
//!
//! The view's current state is rendered, not just its content:
//!
//! - `<html data-theme="…">` carries the [`ThemeStore`](crate::theme::ThemeStore)
//!   marker. A small head script re-resolves it in the browser (saved value,
//!   then `prefers-color-scheme`, then light) before first paint.
//! - An open modal renders visible with its title and body, and `<body>` gets
//!   the `scroll-locked` class.
//!
//! Detail bodies are rendered once into `<template>` elements; clicking a card
//! copies the matching template into the dialog.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors and layout injected from config)
//! - `static/folio.js`: Theme toggle, modal store, reveal animations

use crate::config::{self, SiteConfig};
use crate::content::{Content, is_web_link};
use crate::image::ImageSource;
use crate::modal::{ModalState, ModalStore};
use crate::view::{DetailRef, ProfileView};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/folio.js");

/// Name of the assets directory inside the content root.
pub const ASSETS_DIR: &str = "assets";

/// Image references after build-time resolution.
#[derive(Debug, Clone)]
pub struct SiteImages {
    pub profile: ImageSource,
    pub certifications: Vec<ImageSource>,
}

impl SiteImages {
    /// Wrap every image reference with the configured placeholder.
    ///
    /// With a `content_root`, local references that don't exist are swapped
    /// for the placeholder up front.
    pub fn resolve(content: &Content, placeholder: &str, content_root: Option<&Path>) -> Self {
        let mut profile = ImageSource::new(&content.profile.image, placeholder);
        let mut certifications: Vec<ImageSource> = content
            .certifications
            .iter()
            .map(|c| ImageSource::new(&c.image, placeholder))
            .collect();
        if let Some(root) = content_root {
            profile.resolve_local(root);
            for cert in &mut certifications {
                cert.resolve_local(root);
            }
        }
        Self {
            profile,
            certifications,
        }
    }

    /// Primary references that were replaced by the placeholder.
    pub fn fallbacks(&self) -> Vec<String> {
        std::iter::once(&self.profile)
            .chain(&self.certifications)
            .filter(|img| img.is_fallback())
            .map(|img| img.primary().to_string())
            .collect()
    }
}

/// A rendered section and how many items it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub items: usize,
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub page: PathBuf,
    pub sections: Vec<SectionSummary>,
    pub assets_copied: usize,
    pub image_fallbacks: Vec<String>,
}

/// Sections in render order, with their item counts. Empty sections are
/// omitted, matching the page.
pub fn section_summaries(content: &Content) -> Vec<SectionSummary> {
    let about_items = usize::from(!content.profile.about.trim().is_empty());
    [
        ("about", "About", about_items),
        ("metrics", "Highlights", content.metrics.len()),
        ("experience", "Experience", content.experience.len()),
        ("skills", "Skills", content.skills.len()),
        ("projects", "Projects", content.projects.len()),
        ("certifications", "Certifications", content.certifications.len()),
        ("testimonials", "Testimonials", content.testimonials.len()),
        ("articles", "Articles", content.articles.len()),
        ("contact", "Contact", contact_items(content)),
    ]
    .into_iter()
    .filter(|(_, _, items)| *items > 0)
    .map(|(id, title, items)| SectionSummary { id, title, items })
    .collect()
}

fn contact_items(content: &Content) -> usize {
    content.links.len()
        + usize::from(content.profile.email.is_some())
        + usize::from(content.profile.resume.is_some())
}

/// Render the page and write the site to `output_dir`.
pub fn generate(
    view: &ProfileView,
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let content = view.content();
    let images = SiteImages::resolve(content, &config.images.placeholder, Some(source_dir));

    let css = build_css(config);

    fs::create_dir_all(output_dir)?;
    let assets_copied = copy_assets(&source_dir.join(ASSETS_DIR), &output_dir.join(ASSETS_DIR))?;

    let page = render_page(view, config, &images, &css);
    let page_path = output_dir.join("index.html");
    fs::write(&page_path, page.into_string())?;
    info!(path = %page_path.display(), "generated page");

    Ok(GenerateReport {
        page: page_path,
        sections: section_summaries(content),
        assets_copied,
        image_fallbacks: images.fallbacks(),
    })
}

/// Full stylesheet: generated variables first, then the static rules.
pub fn build_css(config: &SiteConfig) -> String {
    let color_css = config::generate_color_css(&config.colors);
    let theme_css = config::generate_theme_css(&config.theme);
    format!("{}\n\n{}\n\n{}", color_css, theme_css, CSS_STATIC)
}

/// Copy every file under `src` into `dst`. A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            debug!(asset = %rel.display(), "copied");
            copied += 1;
        }
    }
    Ok(copied)
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Head script: resolve the theme before first paint and install the
/// one-shot image fallback handler.
fn bootstrap_script(storage_key: &str) -> String {
    // serde_json produces a valid JS string literal; `<` is escaped so the
    // key can't close the script element.
    let key = serde_json::to_string(storage_key)
        .unwrap_or_else(|_| "\"theme\"".to_string())
        .replace('<', "\\u003c");
    format!(
        r#"(function(){{var k={key},t=null;try{{t=localStorage.getItem(k)}}catch(e){{}}if(t!=="light"&&t!=="dark"){{t=window.matchMedia&&window.matchMedia("(prefers-color-scheme: dark)").matches?"dark":"light"}}var r=document.documentElement;r.classList.add("js");r.setAttribute("data-theme",t)}})();window.folioImageFallback=function(img){{img.onerror=null;var f=img.getAttribute("data-fallback");if(f){{img.removeAttribute("data-fallback");img.src=f}}}};"#
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    view: &ProfileView,
    config: &SiteConfig,
    css: &str,
    content: Markup,
) -> Markup {
    let profile = &view.content().profile;
    let title = if config.site.title.trim().is_empty() {
        profile.name.as_str()
    } else {
        config.site.title.as_str()
    };
    let (_, theme) = view.theme_store().document_marker();
    let description = (!config.site.description.trim().is_empty())
        .then_some(config.site.description.as_str());
    let locked = view.modal().is_scroll_locked();

    html! {
        (DOCTYPE)
        html lang=(config.site.lang) data-theme=(theme) data-storage-key=(config.theme.storage_key) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(desc) = description {
                    meta name="description" content=(desc);
                }
                title { (title) }
                script { (PreEscaped(bootstrap_script(&config.theme.storage_key))) }
                style { (PreEscaped(css)) }
            }
            body class=[locked.then_some("scroll-locked")] {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// An `<img>` wired to the one-shot fallback, unless it already fell back.
fn image_tag(img: &ImageSource, alt: &str, class: &str) -> Markup {
    let fallback = (!img.is_fallback()).then_some(img.placeholder());
    let handler = fallback.map(|_| "folioImageFallback(this)");
    html! {
        img class=(class) src=(img.src()) alt=(alt) loading="lazy"
            data-fallback=[fallback] onerror=[handler];
    }
}

fn site_header(view: &ProfileView) -> Markup {
    html! {
        header.site-header {
            a.site-name href="#top" { (view.content().profile.name) }
            button.theme-toggle type="button" data-theme-toggle
                aria-label="Toggle color theme" title="Toggle color theme" {
                span.icon-light aria-hidden="true" { "☀" }
                span.icon-dark aria-hidden="true" { "☾" }
            }
        }
    }
}

fn render_hero(content: &Content, images: &SiteImages) -> Markup {
    let profile = &content.profile;
    html! {
        section #top.hero.reveal {
            (image_tag(&images.profile, &profile.name, "profile-photo"))
            div.hero-text {
                h1 { (profile.name) }
                @for line in &profile.taglines {
                    p.tagline { (line) }
                }
                @if let Some(summary) = &profile.summary {
                    p.summary { (summary) }
                }
                @if let Some(location) = &profile.location {
                    p.location { (location) }
                }
            }
        }
    }
}

fn render_about(content: &Content) -> Markup {
    let about = content.profile.about.trim();
    let teaser = about.split("\n\n").next().unwrap_or_default();
    html! {
        @if !about.is_empty() {
            section #about.section.reveal {
                h2 { "About" }
                div.about-teaser { (PreEscaped(markdown_to_html(teaser))) }
                button.read-more type="button"
                    data-modal-slot="about"
                    data-modal-title=(content.about_title())
                    data-modal-template="about-body" {
                    "Read more"
                }
            }
        }
    }
}

fn render_metrics(content: &Content) -> Markup {
    html! {
        @if !content.metrics.is_empty() {
            section #metrics.section.reveal {
                h2 { "Highlights" }
                ul.metric-list {
                    @for metric in &content.metrics {
                        li.metric {
                            span.metric-value { (metric.value) }
                            span.metric-label { (metric.label) }
                        }
                    }
                }
            }
        }
    }
}

fn render_experience(content: &Content) -> Markup {
    html! {
        @if !content.experience.is_empty() {
            section #experience.section.reveal {
                h2 { "Experience" }
                ol.timeline {
                    @for (idx, entry) in content.experience.iter().enumerate() {
                        @let clickable = entry.detail.is_some();
                        @let template = DetailRef::Experience(idx).template_id();
                        li.card.experience-card.clickable[clickable]
                            data-modal-slot=[clickable.then_some("detail")]
                            data-modal-title=[clickable.then_some(entry.title.as_str())]
                            data-modal-template=[clickable.then_some(template.as_str())]
                            tabindex=[clickable.then_some("0")]
                            role=[clickable.then_some("button")] {
                            h3 { (entry.title) }
                            @if let Some(org) = &entry.organization {
                                p.organization { (org) }
                            }
                            @if !entry.period.is_empty() {
                                p.period { (entry.period) }
                            }
                            p { (entry.summary) }
                        }
                    }
                }
            }
        }
    }
}

fn render_skills(content: &Content) -> Markup {
    html! {
        @if !content.skills.is_empty() {
            section #skills.section.reveal {
                h2 { "Skills" }
                ul.skill-grid {
                    @for skill in &content.skills {
                        li.card.skill {
                            @if !skill.icon.is_empty() {
                                span.skill-icon aria-hidden="true" { (skill.icon) }
                            }
                            span.skill-name { (skill.name) }
                            @if !skill.level.is_empty() {
                                span.skill-level { (skill.level) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_projects(content: &Content) -> Markup {
    html! {
        @if !content.projects.is_empty() {
            section #projects.section.reveal {
                h2 { "Projects" }
                div.card-grid {
                    @for (idx, project) in content.projects.iter().enumerate() {
                        article.card.project-card.clickable
                            data-modal-slot="detail"
                            data-modal-title=(project.title)
                            data-modal-template=(DetailRef::Project(idx).template_id())
                            tabindex="0" role="button" {
                            h3 { (project.title) }
                            p { (project.summary) }
                            @if !project.tags.is_empty() {
                                ul.tags {
                                    @for tag in &project.tags {
                                        li.tag { (tag) }
                                    }
                                }
                            }
                            @if let Some(url) = &project.url {
                                a.project-link href=(url.trim()) target="_blank" rel="noopener" {
                                    "View project"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_certifications(content: &Content, images: &SiteImages) -> Markup {
    html! {
        @if !content.certifications.is_empty() {
            section #certifications.section.reveal {
                h2 { "Certifications" }
                ul.cert-list {
                    @for (cert, img) in content.certifications.iter().zip(&images.certifications) {
                        li.card.cert {
                            (image_tag(img, &cert.name, "cert-badge"))
                            span.cert-name { (cert.name) }
                        }
                    }
                }
            }
        }
    }
}

fn render_testimonials(content: &Content) -> Markup {
    html! {
        @if !content.testimonials.is_empty() {
            section #testimonials.section.reveal {
                h2 { "Testimonials" }
                div.card-grid {
                    @for t in &content.testimonials {
                        figure.card.testimonial {
                            blockquote { (t.quote) }
                            figcaption { (t.author) }
                        }
                    }
                }
            }
        }
    }
}

fn render_articles(content: &Content) -> Markup {
    html! {
        @if !content.articles.is_empty() {
            section #articles.section.reveal {
                h2 { "Articles" }
                ul.article-list {
                    @for article in &content.articles {
                        li.card.article {
                            a href=(article.url.trim()) target="_blank" rel="noopener" {
                                h3 { (article.title) }
                            }
                            @if !article.description.is_empty() {
                                p { (article.description) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_contact(content: &Content) -> Markup {
    let profile = &content.profile;
    html! {
        @if contact_items(content) > 0 {
            section #contact.section.reveal {
                h2 { "Contact" }
                ul.contact-links {
                    @if let Some(email) = &profile.email {
                        li { a href={ "mailto:" (email) } { (email) } }
                    }
                    @for link in &content.links {
                        @let href = link.url.trim();
                        @let external = is_web_link(href);
                        li {
                            a href=(href)
                                target=[external.then_some("_blank")]
                                rel=[external.then_some("noopener")] {
                                (link.label)
                            }
                        }
                    }
                    @if let Some(resume) = &profile.resume {
                        li { a.resume href=(resume) download { "Download resume" } }
                    }
                }
            }
        }
    }
}

/// Detail and about bodies, rendered once for the page runtime to clone.
fn render_templates(content: &Content) -> Markup {
    html! {
        @if !content.profile.about.trim().is_empty() {
            template #about-body { (PreEscaped(markdown_to_html(&content.profile.about))) }
        }
        @for (idx, entry) in content.experience.iter().enumerate() {
            @if let Some(detail) = &entry.detail {
                template id=(DetailRef::Experience(idx).template_id()) {
                    (PreEscaped(markdown_to_html(detail)))
                }
            }
        }
        @for (idx, project) in content.projects.iter().enumerate() {
            template id=(DetailRef::Project(idx).template_id()) {
                (PreEscaped(markdown_to_html(&project.detail)))
            }
        }
    }
}

/// The shared dialog. Rendered open when the store holds a modal.
fn render_modal(modal: &ModalStore) -> Markup {
    let (slot, title, body) = match modal.state() {
        ModalState::Open { slot, title, body } => {
            (Some(slot.as_str()), title.as_str(), markdown_to_html(body))
        }
        ModalState::Closed => (None, "", String::new()),
    };
    html! {
        div #modal.modal-backdrop data-modal-backdrop data-open-slot=[slot] hidden[slot.is_none()] {
            div.modal role="dialog" aria-modal="true" aria-labelledby="modal-title" {
                button.modal-close type="button" data-modal-close aria-label="Close" { "×" }
                h2 #modal-title { (title) }
                div.modal-body { (PreEscaped(body)) }
            }
        }
    }
}

fn site_footer(content: &Content) -> Markup {
    html! {
        footer.site-footer {
            p { "© " (content.profile.name) }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Render the full page for the view's current state.
pub fn render_page(
    view: &ProfileView,
    config: &SiteConfig,
    images: &SiteImages,
    css: &str,
) -> Markup {
    let content = view.content();
    let body = html! {
        (site_header(view))
        main.page {
            (render_hero(content, images))
            (render_about(content))
            (render_metrics(content))
            (render_experience(content))
            (render_skills(content))
            (render_projects(content))
            (render_certifications(content, images))
            (render_testimonials(content))
            (render_articles(content))
            (render_contact(content))
        }
        (site_footer(content))
        (render_modal(view.modal()))
        (render_templates(content))
    };
    base_document(view, config, css, body)
}

// ============================================================================
// Tests
// ============================================================================
