//! Shared test utilities for the simple-folio test suite.
//!
//! Provides an in-code sample profile, preference stores with observable or
//! failing behavior, and fixture setup for tests that touch the filesystem.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let shared = SharedPreferenceStore::default();
//! let mut view = sample_view_with(shared.clone(), FixedAmbientSignal(None));
//! view.dispatch(Message::ToggleTheme);
//! assert_eq!(shared.value("theme").as_deref(), Some("dark"));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

use crate::content::{
    ArticleRef, CareerMetric, Certification, ContactLink, Content, ExperienceEntry, Profile,
    Project, Skill, Testimonial,
};
use crate::prefs::{MemoryPreferenceStore, PreferenceStore, PrefsError};
use crate::theme::{AmbientSignal, NoAmbientSignal, ThemeStore};
use crate::view::ProfileView;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in walkdir::WalkDir::new(&fixtures) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(&fixtures).unwrap();
        let dst = tmp.path().join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dst).unwrap();
        } else {
            std::fs::copy(entry.path(), &dst).unwrap();
        }
    }
    tmp
}

// =========================================================================
// Sample content
// =========================================================================

pub fn sample_content() -> Content {
    Content {
        profile: Profile {
            name: "Ada Example".into(),
            taglines: vec!["Engineer".into(), "Writer".into()],
            image: "https://example.com/ada.jpg".into(),
            summary: Some("Builds things that compute.".into()),
            about: "I design **analytical engines**.\n\nAnd write about them.".into(),
            email: Some("ada@example.com".into()),
            location: Some("London".into()),
            resume: Some("assets/resume.pdf".into()),
        },
        experience: vec![
            ExperienceEntry {
                title: "Lead Engineer".into(),
                organization: Some("Engine Works".into()),
                period: "2020 - now".into(),
                summary: "Leads the engine team.".into(),
                detail: Some("Shipped the *difference* engine.".into()),
            },
            ExperienceEntry {
                title: "Engineer".into(),
                organization: None,
                period: "2015 - 2020".into(),
                summary: "Built gears.".into(),
                detail: None,
            },
        ],
        skills: vec![
            Skill {
                name: "Rust".into(),
                level: "Expert".into(),
                icon: "🦀".into(),
            },
            Skill {
                name: "SQL".into(),
                level: "Advanced".into(),
                icon: "🗄".into(),
            },
        ],
        projects: vec![
            Project {
                title: "First Project".into(),
                summary: "The first one.".into(),
                detail: "First project detail.".into(),
                url: Some("https://example.com/first".into()),
                tags: vec!["rust".into()],
            },
            Project {
                title: "Second Project".into(),
                summary: "The second one.".into(),
                detail: "Second project detail.".into(),
                url: None,
                tags: vec![],
            },
        ],
        testimonials: vec![Testimonial {
            author: "Charles B.".into(),
            quote: "Remarkable work.".into(),
        }],
        certifications: vec![Certification {
            name: "Gear Certified".into(),
            image: "https://example.com/gear.png".into(),
        }],
        metrics: vec![
            CareerMetric {
                label: "Years".into(),
                value: "10+".into(),
            },
            CareerMetric {
                label: "Engines".into(),
                value: "3".into(),
            },
        ],
        articles: vec![ArticleRef {
            title: "On Engines".into(),
            description: "Notes on computation.".into(),
            url: "https://example.com/engines".into(),
        }],
        links: vec![
            ContactLink {
                label: "Email".into(),
                url: "mailto:ada@example.com".into(),
            },
            ContactLink {
                label: "GitHub".into(),
                url: "https://github.com/ada".into(),
            },
        ],
    }
}

/// Sample view with empty in-memory preferences and no ambient signal.
pub fn sample_view() -> ProfileView {
    let theme = ThemeStore::init(
        Box::new(MemoryPreferenceStore::new()),
        "theme",
        &NoAmbientSignal,
    );
    ProfileView::new(sample_content(), theme)
}

/// Sample view backed by a shared store the test can inspect.
pub fn sample_view_with(prefs: SharedPreferenceStore, ambient: impl AmbientSignal) -> ProfileView {
    let theme = ThemeStore::init(Box::new(prefs), "theme", &ambient);
    ProfileView::new(sample_content(), theme)
}

// =========================================================================
// Preference stores
// =========================================================================

/// A store whose contents stay visible to the test after being boxed.
#[derive(Debug, Clone, Default)]
pub struct SharedPreferenceStore {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl SharedPreferenceStore {
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for SharedPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPreferenceStore;

impl PreferenceStore for FailingPreferenceStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PrefsError> {
        Err(PrefsError::Unavailable("storage disabled".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PrefsError> {
        Err(PrefsError::Unavailable("storage disabled".into()))
    }
}
