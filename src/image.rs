//! Image references with a one-shot placeholder fallback.
//!
//! An image that fails to load is replaced by a fixed placeholder exactly
//! once. There is no retry: a failure after the swap (the placeholder itself
//! is broken) leaves the source alone and reports nothing.
//!
//! The same contract runs in two places:
//!
//! - at build time, [`ImageSource::resolve_local`] treats a relative path that
//!   does not exist under the content directory as a load failure;
//! - in the browser, the page runtime swaps `src` for `data-fallback` on the
//!   first `error` event and then removes the handler.

use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    primary: String,
    placeholder: String,
    fell_back: bool,
}

impl ImageSource {
    pub fn new(primary: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            placeholder: placeholder.into(),
            fell_back: false,
        }
    }

    /// The URL to render right now.
    pub fn src(&self) -> &str {
        if self.fell_back {
            &self.placeholder
        } else {
            &self.primary
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_fallback(&self) -> bool {
        self.fell_back
    }

    /// Record a load failure.
    ///
    /// Returns the placeholder URL the first time; `None` on any later call.
    pub fn on_load_error(&mut self) -> Option<&str> {
        if self.fell_back {
            return None;
        }
        self.fell_back = true;
        Some(&self.placeholder)
    }

    /// Whether the reference points outside the site (absolute URL or data URI).
    pub fn is_remote(&self) -> bool {
        is_remote_reference(&self.primary)
    }

    /// Check a local reference against the content directory.
    ///
    /// Remote references are never checked. A missing local file triggers the
    /// fallback.
    pub fn resolve_local(&mut self, content_root: &Path) {
        if self.is_remote() || self.fell_back {
            return;
        }
        let relative = self.primary.trim_start_matches('/');
        if relative.is_empty() || !content_root.join(relative).is_file() {
            warn!(
                image = %self.primary,
                placeholder = %self.placeholder,
                "image not found, using placeholder"
            );
            self.on_load_error();
        }
    }
}

/// `http(s)://`, protocol-relative, or `data:` references.
pub fn is_remote_reference(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
}
