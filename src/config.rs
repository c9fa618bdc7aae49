//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content directory next to `content.toml`; stock defaults are the base
//! layer and the user file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = ""                # Page <title>; empty = profile name
//! lang = "en"               # <html lang>
//! description = ""          # <meta name="description">
//!
//! [theme]
//! storage_key = "theme"     # Key holding the saved light/dark preference
//! animations = true         # Enter/hover animations
//! max_width = "64rem"       # Content column width
//! card_gap = "1.25rem"      # Gap between cards
//!
//! [images]
//! placeholder = "https://placehold.co/400x400?text=Photo"
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f5f5f7"
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! accent = "#2f6fed"
//! link = "#2f6fed"
//! link_hover = "#1a4fbf"
//!
//! [colors.dark]
//! background = "#0b0d12"
//! surface = "#161a22"
//! text = "#eeeeee"
//! text_muted = "#9a9a9a"
//! border = "#2a2f3a"
//! accent = "#7aa2ff"
//! link = "#7aa2ff"
//! link_hover = "#aac4ff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document metadata.
    pub site: SiteMeta,
    /// Theme persistence and layout settings.
    pub theme: ThemeConfig,
    /// Image fallback settings.
    pub images: ImagesConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let key = &self.theme.storage_key;
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "theme.storage_key must be non-empty and contain no whitespace".into(),
            ));
        }
        if self.images.placeholder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "images.placeholder must not be empty".into(),
            ));
        }
        if self.site.lang.trim().is_empty() {
            return Err(ConfigError::Validation("site.lang must not be empty".into()));
        }
        for (mode, scheme) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            if let Some(field) = scheme.first_empty_field() {
                return Err(ConfigError::Validation(format!(
                    "colors.{mode}.{field} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Page title. Empty means "use the profile name".
    pub title: String,
    /// Value of `<html lang>`.
    pub lang: String,
    /// Meta description. Empty omits the tag.
    pub description: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            lang: "en".to_string(),
            description: String::new(),
        }
    }
}

/// Theme persistence and layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Key under which the light/dark preference is saved.
    pub storage_key: String,
    /// Enter/hover animations. `false` renders a static page.
    pub animations: bool,
    /// Content column width (CSS value).
    pub max_width: String,
    /// Gap between cards (CSS value).
    pub card_gap: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            animations: true,
            max_width: "64rem".to_string(),
            card_gap: "1.25rem".to_string(),
        }
    }
}

/// Image fallback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Substituted once when an image fails to load.
    pub placeholder: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            placeholder: "https://placehold.co/400x400?text=Photo".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Card and dialog background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (periods, levels, captions).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Highlights: metric values, tags, focus rings.
    pub accent: String,
    /// Link color.
    pub link: String,
    /// Link hover color.
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f5f5f7".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#2f6fed".to_string(),
            link: "#2f6fed".to_string(),
            link_hover: "#1a4fbf".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b0d12".to_string(),
            surface: "#161a22".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2a2f3a".to_string(),
            accent: "#7aa2ff".to_string(),
            link: "#7aa2ff".to_string(),
            link_hover: "#aac4ff".to_string(),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("text", self.text.as_str()),
            ("text_muted", self.text_muted.as_str()),
            ("border", self.border.as_str()),
            ("accent", self.accent.as_str()),
            ("link", self.link.as_str()),
            ("link_hover", self.link_hover.as_str()),
        ]
    }

    fn first_empty_field(&self) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| name)
    }

    fn to_css_vars(&self, indent: &str) -> String {
        self.fields()
            .iter()
            .map(|(name, value)| format!("{indent}--color-{}: {value};", name.replace('_', "-")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Name of the site config file inside the content root.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Deep-merge `overlay` into `base`. Tables merge per key; anything else in
/// `overlay` replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut table), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let merged = match table.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse a sparse config and validate it.
///
/// Keys are laid over the full defaults before deserializing, so a partial
/// `[colors.dark]` keeps the remaining dark colors instead of falling back to
/// the light scheme.
pub fn parse_config(toml_str: &str) -> Result<SiteConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(toml_str)?;
    let defaults = toml::Value::try_from(SiteConfig::default())?;
    let config: SiteConfig = merge_toml(defaults, overlay).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the content directory. No file means defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    parse_config(&fs::read_to_string(&path)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document
# ---------------------------------------------------------------------------
[site]
# Page <title>. Leave empty to use the profile name.
title = ""

# Language of the page (<html lang>).
lang = "en"

# <meta name="description">. Leave empty to omit.
description = ""

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# Storage key for the visitor's light/dark choice.
storage_key = "theme"

# Fade-in and hover animations on cards and sections.
animations = true

# Width of the content column (CSS value).
max_width = "64rem"

# Gap between cards in grids (CSS value).
card_gap = "1.25rem"

# ---------------------------------------------------------------------------
# Images
# ---------------------------------------------------------------------------
[images]
# Shown instead of any image that fails to load. Swapped once, never retried.
placeholder = "https://placehold.co/400x400?text=Photo"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f5f5f7"       # Cards, dialogs
text = "#111111"
text_muted = "#666666"    # Periods, levels, captions
border = "#e0e0e0"
accent = "#2f6fed"        # Metrics, tags, focus
link = "#2f6fed"
link_hover = "#1a4fbf"

# ---------------------------------------------------------------------------
# Colors - Dark mode
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b0d12"
surface = "#161a22"
text = "#eeeeee"
text_muted = "#9a9a9a"
border = "#2a2f3a"
accent = "#7aa2ff"
link = "#7aa2ff"
link_hover = "#aac4ff"
"##
}

/// Generate CSS custom properties from color config.
///
/// Light is the `:root` default; dark applies when the root carries
/// `data-theme="dark"`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n    color-scheme: light;\n{light}\n}}\n\n:root[data-theme=\"dark\"] {{\n    color-scheme: dark;\n{dark}\n}}",
        light = colors.light.to_css_vars("    "),
        dark = colors.dark.to_css_vars("    "),
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    let mut css = format!(
        r#":root {{
    --max-width: {max_width};
    --card-gap: {card_gap};
}}"#,
        max_width = theme.max_width,
        card_gap = theme.card_gap,
    );
    if !theme.animations {
        css.push_str("\n\n*, *::before, *::after {\n    animation: none !important;\n    transition: none !important;\n}");
    }
    css
}
