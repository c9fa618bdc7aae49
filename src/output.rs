//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what the visitor will see (section titles, item titles
//! in page order) and shows file-level detail as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Profile
//!     Jordan Example
//!     Taglines: Backend engineer · Open-source maintainer
//!     Image: assets/profile.jpg
//!
//! Experience (2)
//! 001 Staff Engineer
//!     Period: 2021 – present
//!     Detail: yes
//! 002 Senior Engineer
//!     Period: 2016 – 2021
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!     001 About (1)
//!     002 Experience (2)
//!     003 Projects (1)
//! Assets: 2 copied
//! Placeholder: assets/missing.jpg
//!
//! Generated 3 sections
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions do no I/O.

use crate::content::Content;
use crate::generate::GenerateReport;
use crate::modal::ModalState;
use crate::theme::{Theme, ThemeOrigin};
use crate::view::ProfileView;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Section header with an item count.
fn section_header(title: &str, count: usize) -> String {
    format!("{} ({})", title, count)
}

/// Positional item line.
fn item_line(index: usize, title: &str) -> String {
    format!("{} {}", format_index(index), title)
}

/// Indented `Label: value` context line.
fn context_line(label: &str, value: &str) -> String {
    format!("{}{}: {}", indent(1), label, value)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Push a titled list: header, then one line per item with context lines.
fn push_list<T>(
    lines: &mut Vec<String>,
    title: &str,
    items: &[T],
    describe: impl Fn(&T) -> (String, Vec<String>),
) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(section_header(title, items.len()));
    for (i, item) in items.iter().enumerate() {
        let (name, context) = describe(item);
        lines.push(item_line(i + 1, &name));
        lines.extend(context);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the content inventory shown by `check`.
pub fn format_check_output(content: &Content, source_root: &Path) -> Vec<String> {
    let profile = &content.profile;
    let mut lines = vec!["Profile".to_string(), format!("{}{}", indent(1), profile.name)];
    if !profile.taglines.is_empty() {
        lines.push(context_line("Taglines", &profile.taglines.join(" · ")));
    }
    if !profile.image.is_empty() {
        lines.push(context_line("Image", &profile.image));
    }
    if !profile.about.trim().is_empty() {
        let first = profile.about.trim().lines().next().unwrap_or_default();
        lines.push(context_line("About", &truncate_desc(first, 60)));
    }

    push_list(&mut lines, "Highlights", &content.metrics, |m| {
        (format!("{} {}", m.value, m.label), vec![])
    });
    push_list(&mut lines, "Experience", &content.experience, |e| {
        let mut ctx = Vec::new();
        if let Some(org) = &e.organization {
            ctx.push(context_line("Organization", org));
        }
        if !e.period.is_empty() {
            ctx.push(context_line("Period", &e.period));
        }
        if e.detail.is_some() {
            ctx.push(context_line("Detail", "yes"));
        }
        (e.title.clone(), ctx)
    });
    push_list(&mut lines, "Skills", &content.skills, |s| {
        let name = if s.icon.is_empty() {
            s.name.clone()
        } else {
            format!("{} {}", s.icon, s.name)
        };
        let ctx = if s.level.is_empty() {
            vec![]
        } else {
            vec![context_line("Level", &s.level)]
        };
        (name, ctx)
    });
    push_list(&mut lines, "Projects", &content.projects, |p| {
        let mut ctx = vec![context_line("Summary", &truncate_desc(&p.summary, 60))];
        if let Some(url) = &p.url {
            ctx.push(context_line("Link", url));
        }
        (p.title.clone(), ctx)
    });
    push_list(&mut lines, "Certifications", &content.certifications, |c| {
        (c.name.clone(), vec![context_line("Image", &c.image)])
    });
    push_list(&mut lines, "Testimonials", &content.testimonials, |t| {
        (
            t.author.clone(),
            vec![context_line("Quote", &truncate_desc(&t.quote, 60))],
        )
    });
    push_list(&mut lines, "Articles", &content.articles, |a| {
        (a.title.clone(), vec![context_line("Link", &a.url)])
    });
    push_list(&mut lines, "Contact", &content.links, |l| {
        (l.label.clone(), vec![context_line("Link", &l.url)])
    });

    lines.push(String::new());
    lines.push("Source".to_string());
    lines.push(format!("{}{}", indent(1), source_root.display()));
    lines
}

pub fn print_check_output(content: &Content, source_root: &Path) {
    for line in format_check_output(content, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the build summary.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let page = report
        .page
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index.html".to_string());
    let mut lines = vec![format!("Home → {}", page)];
    for (i, section) in report.sections.iter().enumerate() {
        lines.push(format!(
            "{}{}",
            indent(1),
            item_line(i + 1, &section_header(section.title, section.items))
        ));
    }
    if report.assets_copied > 0 {
        lines.push(format!("Assets: {} copied", report.assets_copied));
    }
    for missing in &report.image_fallbacks {
        lines.push(format!("Placeholder: {}", missing));
    }
    lines.push(String::new());
    let noun = if report.sections.len() == 1 {
        "section"
    } else {
        "sections"
    };
    lines.push(format!("Generated {} {}", report.sections.len(), noun));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Theme and view state output
// ============================================================================

/// Format the `theme` command's status line(s).
pub fn format_theme_status(theme: Theme, origin: ThemeOrigin, state_path: &Path) -> Vec<String> {
    vec![
        format!("Theme: {} ({})", theme, origin),
        context_line("State", &state_path.display().to_string()),
    ]
}

pub fn print_theme_status(theme: Theme, origin: ThemeOrigin, state_path: &Path) {
    for line in format_theme_status(theme, origin, state_path) {
        println!("{}", line);
    }
}

/// Format the view's transient state after a replayed interaction.
pub fn format_view_state(view: &ProfileView) -> Vec<String> {
    let mut lines = vec![format!("Theme: {}", view.theme())];
    match view.modal().state() {
        ModalState::Open { slot, title, .. } => {
            lines.push(format!("Modal: {} — {}", slot, title));
        }
        ModalState::Closed => lines.push("Modal: closed".to_string()),
    }
    let lock = if view.modal().is_scroll_locked() {
        "on"
    } else {
        "off"
    };
    lines.push(format!("Scroll lock: {}", lock));
    lines
}

pub fn print_view_state(view: &ProfileView) {
    for line in format_view_state(view) {
        println!("{}", line);
    }
}
