//! # Simple Folio
//!
//! A minimal static site generator for single-page personal profiles. One
//! `content.toml` describes the person (biography, experience, skills,
//! projects, testimonials, certifications, metrics, articles, links) and the
//! build writes one self-contained `index.html`.
//!
//! # Architecture
//!
//! ```text
//! content/content.toml ─┐
//! content/config.toml  ─┼─▶ ProfileView ─▶ generate ─▶ dist/index.html
//! preferences (theme)  ─┘      ▲
//!                              └── Message (toggle theme, open/close modal)
//! ```
//!
//! The page has exactly two pieces of mutable state, each owned by one store
//! and changed only by dispatching a [`view::Message`]:
//!
//! - **Theme** ([`theme::ThemeStore`]): light or dark, initialized from the
//!   saved preference, then the platform hint, then light. Every change is
//!   applied to the document marker and persisted.
//! - **Modal** ([`modal::ModalStore`]): closed, or one open dialog in the
//!   `about` or `detail` slot. Background scroll lock is derived from it.
//!
//! The generated page ships a small vanilla-JS runtime that follows the same
//! rules in the browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Profile content records, `content.toml` loading and validation |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`prefs`] | Persisted key-value preferences (JSON file, in-memory) |
//! | [`theme`] | Theme preference: resolution chain, toggle, `ThemeStore` |
//! | [`modal`] | Single shared modal store with derived scroll lock |
//! | [`image`] | Image references with a one-shot placeholder fallback |
//! | [`view`] | `ProfileView` and the `Message` values it dispatches |
//! | [`generate`] | Renders the page with Maud and writes the site |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are Rust
//! code, checked at compile time, and every interpolation is escaped unless
//! wrapped in `PreEscaped`. Markdown (about text, detail bodies) goes through
//! `pulldown-cmark` first.
//!
//! ## Explicit Stores, No Globals
//!
//! The theme and modal stores are passed to the renderer through the view.
//! Nothing reads a process-wide flag, so the state machines are tested
//! without rendering and the renderer is tested with any state.
//!
//! ## One Modal Store For Both Slots
//!
//! Holding both slots in one store means "is scroll locked" is just "is
//! anything open". Closing a slot that isn't open does nothing.

pub mod config;
pub mod content;
pub mod generate;
pub mod image;
pub mod logging;
pub mod modal;
pub mod output;
pub mod prefs;
pub mod theme;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
