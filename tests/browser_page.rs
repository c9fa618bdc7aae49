//! Browser tests for the page runtime: theme resolution and toggle, the
//! shared modal with its scroll lock, and the one-shot image fallback.
//!
//! Run with: `cargo test --test browser_page -- --ignored`

use headless_chrome::protocol::cdp::Emulation;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::thread::sleep;
use std::time::{Duration, Instant};

/// Storage key configured in `fixtures/content/config.toml`.
const STORAGE_KEY: &str = "folio-theme";

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn generated_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("browser-page/generated")
}

fn ensure_fixtures_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let bin = env!("CARGO_BIN_EXE_simple-folio");
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

        let output_dir = generated_dir();
        if output_dir.exists() {
            std::fs::remove_dir_all(&output_dir).expect("failed to clean output dir");
        }
        let state = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("browser-page/prefs.json");

        let status = Command::new(bin)
            .args([
                "build",
                "--source",
                root.join("fixtures/content").to_str().unwrap(),
                "--output",
                output_dir.to_str().unwrap(),
                "--state",
                state.to_str().unwrap(),
            ])
            .env_remove("SIMPLE_FOLIO_COLOR_SCHEME")
            .status()
            .expect("failed to run simple-folio");
        assert!(status.success(), "fixture generation failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

/// `file://` pages share one localStorage and every load clears it, so
/// tests run one at a time.
fn storage_lock() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn navigate(tab: &Tab) {
    let file = generated_dir().join("index.html");
    assert!(file.exists(), "missing: {}", file.display());
    tab.navigate_to(&format!("file://{}", file.display()))
        .unwrap()
        .wait_until_navigated()
        .unwrap();
}

/// Open the page with localStorage cleared, then seeded with `saved` if given.
fn load_index(saved: Option<&str>) -> Arc<Tab> {
    ensure_fixtures_built();
    let tab = browser().new_tab().unwrap();
    navigate(&tab);
    eval(&tab, "localStorage.clear()");
    if let Some(theme) = saved {
        eval(
            &tab,
            &format!("localStorage.setItem('{STORAGE_KEY}', '{theme}')"),
        );
    }
    navigate(&tab);
    tab
}

fn eval(tab: &Tab, expr: &str) -> Value {
    tab.evaluate(expr, false)
        .expect("failed to evaluate JS")
        .value
        .unwrap_or(Value::Null)
}

fn eval_str(tab: &Tab, expr: &str) -> String {
    eval(tab, expr).as_str().unwrap_or_default().to_string()
}

fn eval_bool(tab: &Tab, expr: &str) -> bool {
    eval(tab, expr).as_bool().unwrap_or(false)
}

/// Poll `expr` until it is true or five seconds pass.
fn wait_for(tab: &Tab, expr: &str) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if eval_bool(tab, expr) {
            return true;
        }
        sleep(Duration::from_millis(50));
    }
    false
}

fn theme(tab: &Tab) -> String {
    eval_str(tab, "document.documentElement.getAttribute('data-theme')")
}

fn scroll_locked(tab: &Tab) -> bool {
    eval_bool(tab, "document.body.classList.contains('scroll-locked')")
}

fn press_escape(tab: &Tab) {
    eval(
        tab,
        "document.body.dispatchEvent(new KeyboardEvent('keydown', {key: 'Escape', bubbles: true}))",
    );
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn saved_theme_applied_before_paint() {
    let _guard = storage_lock();
    let tab = load_index(Some("dark"));
    assert_eq!(theme(&tab), "dark");
}

#[test]
#[ignore]
fn garbage_saved_theme_falls_back_to_light() {
    let _guard = storage_lock();
    let tab = load_index(Some("sepia"));
    assert_eq!(theme(&tab), "light");
}

#[test]
#[ignore]
fn platform_dark_used_when_nothing_saved() {
    let _guard = storage_lock();
    let tab = load_index(None);
    tab.call_method(Emulation::SetEmulatedMedia {
        media: None,
        features: Some(vec![Emulation::MediaFeature {
            name: "prefers-color-scheme".to_string(),
            value: "dark".to_string(),
        }]),
    })
    .expect("failed to emulate dark color scheme");
    navigate(&tab);
    assert_eq!(theme(&tab), "dark");
}

#[test]
#[ignore]
fn toggle_flips_and_saves_theme() {
    let _guard = storage_lock();
    let tab = load_index(Some("light"));

    eval(&tab, "document.querySelector('[data-theme-toggle]').click()");
    assert_eq!(theme(&tab), "dark");
    assert_eq!(
        eval_str(&tab, &format!("localStorage.getItem('{STORAGE_KEY}')")),
        "dark"
    );

    eval(&tab, "document.querySelector('[data-theme-toggle]').click()");
    assert_eq!(theme(&tab), "light");
    assert_eq!(
        eval_str(&tab, &format!("localStorage.getItem('{STORAGE_KEY}')")),
        "light"
    );

    // A fresh load keeps the saved choice.
    navigate(&tab);
    assert_eq!(theme(&tab), "light");
}

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn project_card_opens_detail_and_escape_closes() {
    let _guard = storage_lock();
    let tab = load_index(None);
    assert!(!scroll_locked(&tab));
    assert!(eval_bool(&tab, "document.getElementById('modal').hidden"));

    eval(&tab, "document.querySelector('.project-card').click()");
    assert!(scroll_locked(&tab));
    assert!(!eval_bool(&tab, "document.getElementById('modal').hidden"));
    assert_eq!(
        eval_str(&tab, "document.getElementById('modal').getAttribute('data-open-slot')"),
        "detail"
    );
    assert_eq!(
        eval_str(&tab, "document.getElementById('modal-title').textContent"),
        "Tiny Compiler"
    );
    assert!(eval_bool(
        &tab,
        "document.querySelector('.modal-body strong').textContent === 'WebAssembly'"
    ));

    press_escape(&tab);
    assert!(!scroll_locked(&tab));
    assert!(eval_bool(&tab, "document.getElementById('modal').hidden"));
    assert_eq!(
        eval_str(&tab, "document.querySelector('.modal-body').innerHTML"),
        ""
    );
}

#[test]
#[ignore]
fn about_then_detail_single_close_unlocks() {
    let _guard = storage_lock();
    let tab = load_index(None);

    eval(&tab, "document.querySelector('[data-modal-slot=\"about\"]').click()");
    assert!(scroll_locked(&tab));
    assert_eq!(
        eval_str(&tab, "document.getElementById('modal-title').textContent"),
        "About Grace Fixture"
    );

    eval(&tab, "document.querySelector('.experience-card.clickable').click()");
    assert!(scroll_locked(&tab));
    assert_eq!(
        eval_str(&tab, "document.getElementById('modal').getAttribute('data-open-slot')"),
        "detail"
    );

    eval(&tab, "document.querySelector('[data-modal-close]').click()");
    assert!(!scroll_locked(&tab));

    // A second close with nothing open changes nothing.
    press_escape(&tab);
    assert!(!scroll_locked(&tab));
}

#[test]
#[ignore]
fn backdrop_click_closes() {
    let _guard = storage_lock();
    let tab = load_index(None);
    eval(&tab, "document.querySelector('.project-card').click()");
    assert!(scroll_locked(&tab));

    eval(&tab, "document.getElementById('modal').click()");
    assert!(!scroll_locked(&tab));
}

#[test]
#[ignore]
fn pagehide_releases_lock() {
    let _guard = storage_lock();
    let tab = load_index(None);
    eval(&tab, "document.querySelector('.project-card').click()");
    assert!(scroll_locked(&tab));

    eval(&tab, "window.dispatchEvent(new Event('pagehide'))");
    assert!(!scroll_locked(&tab));
    assert!(eval_bool(&tab, "document.getElementById('modal').hidden"));
}

#[test]
#[ignore]
fn experience_without_detail_is_not_clickable() {
    let _guard = storage_lock();
    let tab = load_index(None);
    let clickable = eval(
        &tab,
        "document.querySelectorAll('.experience-card.clickable').length",
    );
    assert_eq!(clickable.as_u64(), Some(1));

    eval(&tab, "document.querySelectorAll('.experience-card')[1].click()");
    assert!(!scroll_locked(&tab));
}

// ---------------------------------------------------------------------------
// Image fallback
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn profile_image_error_swaps_to_placeholder_once() {
    let _guard = storage_lock();
    let tab = load_index(None);
    let img = "document.querySelector('.profile-photo')";

    assert!(eval_bool(&tab, &format!("{img}.hasAttribute('data-fallback')")));
    eval(&tab, &format!("{img}.src = 'assets/does-not-exist.png'"));
    assert!(
        wait_for(&tab, &format!("{img}.src.endsWith('assets/placeholder.svg')")),
        "placeholder was not swapped in"
    );
    assert!(eval_bool(&tab, &format!("{img}.onerror === null")));
    assert!(!eval_bool(&tab, &format!("{img}.hasAttribute('data-fallback')")));

    // A second failure is left alone.
    eval(&tab, &format!("{img}.src = 'assets/also-missing.png'"));
    sleep(Duration::from_millis(500));
    assert!(eval_bool(
        &tab,
        &format!("{img}.src.endsWith('assets/also-missing.png')")
    ));
}

#[test]
#[ignore]
fn missing_certification_rendered_with_placeholder() {
    let _guard = storage_lock();
    let tab = load_index(None);
    let badges = "document.querySelectorAll('.cert-badge')";
    assert!(eval_bool(
        &tab,
        &format!("{badges}[0].getAttribute('src') === 'assets/icons/badge.svg'")
    ));
    assert!(eval_bool(
        &tab,
        &format!("{badges}[1].getAttribute('src') === 'assets/placeholder.svg'")
    ));
    assert!(!eval_bool(&tab, &format!("{badges}[1].hasAttribute('onerror')")));
}
