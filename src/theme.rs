//! Light/dark theme preference.
//!
//! The theme is one of two states and has exactly one transition, the toggle.
//! [`ThemeStore`] owns the current value for the life of a session and is
//! handed to the renderer explicitly; nothing reads the theme from a global.
//!
//! ## Initial Value
//!
//! Resolution order, first available wins:
//!
//! ```text
//! 1. Persisted preference   (PreferenceStore, key from config)
//! 2. Ambient signal         (OS / terminal color-scheme hint)
//! 3. Light
//! ```
//!
//! A persisted value that cannot be read or parsed counts as absent. None of
//! the steps can fail the caller.
//!
//! ## Applying
//!
//! [`ThemeStore::set`] records the presentation flag (emitted as
//! `data-theme` on `<html>`) and persists the value. Persisting is
//! best-effort: a failed write is logged and the in-session value still
//! changes. Applying the same theme twice is indistinguishable from applying
//! it once.
//!
//! Initialization applies the resolved theme to the document but does not
//! persist it, so an ambient-derived theme keeps following the platform until
//! the user toggles.

use crate::prefs::{MemoryPreferenceStore, PreferenceStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable consulted first by [`EnvAmbientSignal`].
pub const COLOR_SCHEME_ENV: &str = "SIMPLE_FOLIO_COLOR_SCHEME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme '{0}' (expected 'light' or 'dark')")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Pure toggle: returns the opposite theme.
pub fn toggle_theme(current: Theme) -> Theme {
    current.toggled()
}

/// Where the initial theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeOrigin {
    Persisted,
    Ambient,
    Default,
}

impl fmt::Display for ThemeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeOrigin::Persisted => "saved preference",
            ThemeOrigin::Ambient => "platform preference",
            ThemeOrigin::Default => "default",
        })
    }
}

// ============================================================================
// Ambient signals
// ============================================================================

/// A read-only platform hint about the preferred color scheme.
pub trait AmbientSignal {
    /// `None` when the platform gives no hint (headless, unknown value).
    fn preferred_theme(&self) -> Option<Theme>;
}

/// Headless context: never has a preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAmbientSignal;

impl AmbientSignal for NoAmbientSignal {
    fn preferred_theme(&self) -> Option<Theme> {
        None
    }
}

/// A fixed answer, for overrides and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAmbientSignal(pub Option<Theme>);

impl AmbientSignal for FixedAmbientSignal {
    fn preferred_theme(&self) -> Option<Theme> {
        self.0
    }
}

/// Reads [`COLOR_SCHEME_ENV`], then the terminal `COLORFGBG` convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvAmbientSignal;

impl AmbientSignal for EnvAmbientSignal {
    fn preferred_theme(&self) -> Option<Theme> {
        let explicit = std::env::var(COLOR_SCHEME_ENV).ok();
        let colorfgbg = std::env::var("COLORFGBG").ok();
        theme_from_env_values(explicit.as_deref(), colorfgbg.as_deref())
    }
}

/// Resolve an ambient theme from raw environment values.
///
/// `COLORFGBG` is `"<fg>;<bg>"` (sometimes with a middle field); the last
/// field is the background palette index. Indices 0-6 and 8 are the dark
/// entries of the 16-color palette.
pub fn theme_from_env_values(explicit: Option<&str>, colorfgbg: Option<&str>) -> Option<Theme> {
    if let Some(theme) = explicit.and_then(|v| v.parse::<Theme>().ok()) {
        return Some(theme);
    }
    let bg = colorfgbg?.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    match bg {
        0..=6 | 8 => Some(Theme::Dark),
        _ => Some(Theme::Light),
    }
}

// ============================================================================
// Initial theme resolution
// ============================================================================

/// Resolve the initial theme along with where it came from.
pub fn resolve_initial_theme(
    prefs: &dyn PreferenceStore,
    key: &str,
    ambient: &dyn AmbientSignal,
) -> (Theme, ThemeOrigin) {
    match prefs.get(key) {
        Ok(Some(raw)) => match raw.parse::<Theme>() {
            Ok(theme) => return (theme, ThemeOrigin::Persisted),
            Err(e) => warn!("ignoring saved theme: {e}"),
        },
        Ok(None) => {}
        Err(e) => warn!("theme preference unavailable: {e}"),
    }
    match ambient.preferred_theme() {
        Some(theme) => (theme, ThemeOrigin::Ambient),
        None => (Theme::default(), ThemeOrigin::Default),
    }
}

/// Persisted value, else ambient signal, else light.
pub fn get_initial_theme(
    prefs: &dyn PreferenceStore,
    key: &str,
    ambient: &dyn AmbientSignal,
) -> Theme {
    resolve_initial_theme(prefs, key, ambient).0
}

// ============================================================================
// ThemeStore
// ============================================================================

/// Session owner of the theme preference.
pub struct ThemeStore {
    prefs: Box<dyn PreferenceStore>,
    key: String,
    applied: Theme,
    origin: ThemeOrigin,
}

impl ThemeStore {
    /// Resolve the initial theme and apply it to the document.
    pub fn init(
        prefs: Box<dyn PreferenceStore>,
        key: impl Into<String>,
        ambient: &dyn AmbientSignal,
    ) -> Self {
        let key = key.into();
        let (applied, origin) = resolve_initial_theme(prefs.as_ref(), &key, ambient);
        debug!(theme = %applied, %origin, "theme initialized");
        Self {
            prefs,
            key,
            applied,
            origin,
        }
    }

    /// Resolve the initial theme from `prefs` but keep every later change in
    /// memory. The saved preference is never written.
    pub fn detached(
        prefs: &dyn PreferenceStore,
        key: impl Into<String>,
        ambient: &dyn AmbientSignal,
    ) -> Self {
        let key = key.into();
        let (applied, origin) = resolve_initial_theme(prefs, &key, ambient);
        let mut memory = MemoryPreferenceStore::new();
        if origin == ThemeOrigin::Persisted {
            memory = memory.with_value(&key, applied.as_str());
        }
        debug!(theme = %applied, %origin, "detached theme initialized");
        Self {
            prefs: Box::new(memory),
            key,
            applied,
            origin,
        }
    }

    /// The currently applied theme.
    pub fn get(&self) -> Theme {
        self.applied
    }

    /// Where the current value came from. Becomes `Persisted` after any `set`.
    pub fn origin(&self) -> ThemeOrigin {
        self.origin
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Apply `theme` to the document and persist it.
    pub fn set(&mut self, theme: Theme) {
        self.applied = theme;
        self.origin = ThemeOrigin::Persisted;
        if let Err(e) = self.prefs.set(&self.key, theme.as_str()) {
            warn!("could not persist theme preference: {e}");
        }
        debug!(theme = %theme, "theme applied");
    }

    /// Flip the theme, apply and persist it. Returns the new value.
    pub fn toggle(&mut self) -> Theme {
        let next = toggle_theme(self.applied);
        self.set(next);
        next
    }

    /// The root-level presentation marker: `(attribute, value)`.
    pub fn document_marker(&self) -> (&'static str, &'static str) {
        ("data-theme", self.applied.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPreferenceStore;
    use crate::test_helpers::{FailingPreferenceStore, SharedPreferenceStore};

    const KEY: &str = "theme";

    #[test]
    fn toggle_is_involution() {
        for t in [Theme::Light, Theme::Dark] {
            assert_eq!(toggle_theme(toggle_theme(t)), t);
            assert_ne!(toggle_theme(t), t);
        }
    }

    #[test]
    fn default_theme_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn parse_theme_accepts_case_and_whitespace() {
        assert_eq!(" Dark ".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    // =========================================================================
    // Initial theme resolution
    // =========================================================================

    #[test]
    fn persisted_dark_wins_over_ambient() {
        let prefs = MemoryPreferenceStore::new().with_value(KEY, "dark");
        for ambient in [None, Some(Theme::Light), Some(Theme::Dark)] {
            let theme = get_initial_theme(&prefs, KEY, &FixedAmbientSignal(ambient));
            assert_eq!(theme, Theme::Dark);
        }
    }

    #[test]
    fn ambient_used_when_nothing_persisted() {
        let prefs = MemoryPreferenceStore::new();
        let theme = get_initial_theme(&prefs, KEY, &FixedAmbientSignal(Some(Theme::Dark)));
        assert_eq!(theme, Theme::Dark);
        let theme = get_initial_theme(&prefs, KEY, &FixedAmbientSignal(Some(Theme::Light)));
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn light_when_no_signal_at_all() {
        let prefs = MemoryPreferenceStore::new();
        let (theme, origin) = resolve_initial_theme(&prefs, KEY, &NoAmbientSignal);
        assert_eq!(theme, Theme::Light);
        assert_eq!(origin, ThemeOrigin::Default);
    }

    #[test]
    fn unavailable_storage_falls_back_to_ambient() {
        let prefs = FailingPreferenceStore;
        let (theme, origin) =
            resolve_initial_theme(&prefs, KEY, &FixedAmbientSignal(Some(Theme::Dark)));
        assert_eq!(theme, Theme::Dark);
        assert_eq!(origin, ThemeOrigin::Ambient);
    }

    #[test]
    fn garbage_persisted_value_is_ignored() {
        let prefs = MemoryPreferenceStore::new().with_value(KEY, "purple");
        let (theme, origin) = resolve_initial_theme(&prefs, KEY, &NoAmbientSignal);
        assert_eq!(theme, Theme::Light);
        assert_eq!(origin, ThemeOrigin::Default);
    }

    #[test]
    fn storage_key_is_respected() {
        let prefs = MemoryPreferenceStore::new().with_value("folio-theme", "dark");
        assert_eq!(
            get_initial_theme(&prefs, "folio-theme", &NoAmbientSignal),
            Theme::Dark
        );
        assert_eq!(get_initial_theme(&prefs, KEY, &NoAmbientSignal), Theme::Light);
    }

    // =========================================================================
    // Ambient signal parsing
    // =========================================================================

    #[test]
    fn env_explicit_value_wins() {
        assert_eq!(
            theme_from_env_values(Some("dark"), Some("0;15")),
            Some(Theme::Dark)
        );
    }

    #[test]
    fn env_colorfgbg_dark_background() {
        assert_eq!(theme_from_env_values(None, Some("15;0")), Some(Theme::Dark));
        assert_eq!(
            theme_from_env_values(None, Some("15;default;8")),
            Some(Theme::Dark)
        );
    }

    #[test]
    fn env_colorfgbg_light_background() {
        assert_eq!(theme_from_env_values(None, Some("0;15")), Some(Theme::Light));
        assert_eq!(theme_from_env_values(None, Some("0;7")), Some(Theme::Light));
    }

    #[test]
    fn env_unrecognized_values_are_none() {
        assert_eq!(theme_from_env_values(Some("blue"), None), None);
        assert_eq!(theme_from_env_values(None, Some("default;default")), None);
        assert_eq!(theme_from_env_values(None, None), None);
    }

    #[test]
    fn env_invalid_explicit_falls_through_to_colorfgbg() {
        assert_eq!(
            theme_from_env_values(Some("auto"), Some("15;0")),
            Some(Theme::Dark)
        );
    }

    // =========================================================================
    // ThemeStore
    // =========================================================================

    #[test]
    fn init_does_not_persist() {
        let shared = SharedPreferenceStore::default();
        let store = ThemeStore::init(
            Box::new(shared.clone()),
            KEY,
            &FixedAmbientSignal(Some(Theme::Dark)),
        );
        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(store.origin(), ThemeOrigin::Ambient);
        assert_eq!(shared.value(KEY), None);
    }

    #[test]
    fn toggle_persists_new_value() {
        let shared = SharedPreferenceStore::default();
        let mut store = ThemeStore::init(Box::new(shared.clone()), KEY, &NoAmbientSignal);

        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(shared.value(KEY).as_deref(), Some("dark"));
        assert_eq!(store.origin(), ThemeOrigin::Persisted);

        assert_eq!(store.toggle(), Theme::Light);
        assert_eq!(shared.value(KEY).as_deref(), Some("light"));
    }

    #[test]
    fn set_is_idempotent() {
        let shared = SharedPreferenceStore::default();
        let mut store = ThemeStore::init(Box::new(shared.clone()), KEY, &NoAmbientSignal);

        store.set(Theme::Dark);
        let once = (store.get(), store.document_marker(), shared.value(KEY));
        store.set(Theme::Dark);
        let twice = (store.get(), store.document_marker(), shared.value(KEY));
        assert_eq!(once, twice);
    }

    #[test]
    fn persisted_value_survives_restart() {
        let shared = SharedPreferenceStore::default();
        let mut first = ThemeStore::init(Box::new(shared.clone()), KEY, &NoAmbientSignal);
        first.toggle();
        drop(first);

        let second = ThemeStore::init(
            Box::new(shared.clone()),
            KEY,
            &FixedAmbientSignal(Some(Theme::Light)),
        );
        assert_eq!(second.get(), Theme::Dark);
        assert_eq!(second.origin(), ThemeOrigin::Persisted);
    }

    #[test]
    fn failed_persist_still_changes_session_theme() {
        let mut store = ThemeStore::init(Box::new(FailingPreferenceStore), KEY, &NoAmbientSignal);
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.get(), Theme::Dark);
    }

    #[test]
    fn detached_store_reads_but_never_writes() {
        let shared = SharedPreferenceStore::default();
        let mut saved = ThemeStore::init(Box::new(shared.clone()), KEY, &NoAmbientSignal);
        saved.set(Theme::Dark);

        let mut detached = ThemeStore::detached(&shared, KEY, &NoAmbientSignal);
        assert_eq!(detached.get(), Theme::Dark);
        assert_eq!(detached.origin(), ThemeOrigin::Persisted);

        assert_eq!(detached.toggle(), Theme::Light);
        assert_eq!(shared.value(KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn detached_store_falls_back_on_unreadable_prefs() {
        let store = ThemeStore::detached(
            &FailingPreferenceStore,
            KEY,
            &FixedAmbientSignal(Some(Theme::Dark)),
        );
        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(store.origin(), ThemeOrigin::Ambient);
    }

    #[test]
    fn document_marker_tracks_theme() {
        let mut store = ThemeStore::init(
            Box::new(MemoryPreferenceStore::new()),
            KEY,
            &NoAmbientSignal,
        );
        assert_eq!(store.document_marker(), ("data-theme", "light"));
        store.toggle();
        assert_eq!(store.document_marker(), ("data-theme", "dark"));
    }
}
