//! The profile view: content plus the two pieces of UI state.
//!
//! [`ProfileView`] owns the immutable [`Content`], a [`ThemeStore`] and a
//! [`ModalStore`]. All state changes go through [`ProfileView::dispatch`]
//! with an explicit [`Message`]; the renderer only reads.
//!
//! ## Messages
//!
//! | Message | Effect |
//! |---------|--------|
//! | `ToggleTheme` | flip, apply and persist the theme |
//! | `SetTheme(t)` | apply and persist `t` |
//! | `OpenAbout` | open the about slot with the profile's about text, if any |
//! | `OpenDetail(r)` | open the detail slot for an experience entry or project |
//! | `CloseModal(reason)` | close whatever is open |
//!
//! Messages also parse from short strings (`toggle-theme`, `theme:dark`,
//! `open-about`, `open:project:1`, `open:experience:0`, `close`,
//! `close:backdrop`) so the CLI can replay an interaction.

use crate::content::Content;
use crate::modal::{CloseReason, ModalSlot, ModalStore};
use crate::theme::{Theme, ThemeStore};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// A list item that has detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailRef {
    Experience(usize),
    Project(usize),
}

impl DetailRef {
    /// Stable id used for the detail `<template>` element.
    pub fn template_id(&self) -> String {
        match self {
            DetailRef::Experience(i) => format!("detail-experience-{i}"),
            DetailRef::Project(i) => format!("detail-project-{i}"),
        }
    }
}

impl fmt::Display for DetailRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailRef::Experience(i) => write!(f, "experience:{i}"),
            DetailRef::Project(i) => write!(f, "project:{i}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ToggleTheme,
    SetTheme(Theme),
    OpenAbout,
    OpenDetail(DetailRef),
    CloseModal(CloseReason),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized event '{input}': {reason}")]
pub struct ParseMessageError {
    pub input: String,
    pub reason: String,
}

impl ParseMessageError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl FromStr for Message {
    type Err = ParseMessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let parts: Vec<&str> = input.split(':').collect();
        match parts.as_slice() {
            ["toggle-theme"] => Ok(Message::ToggleTheme),
            ["theme", value] => value
                .parse()
                .map(Message::SetTheme)
                .map_err(|e| ParseMessageError::new(input, e.to_string())),
            ["open-about"] => Ok(Message::OpenAbout),
            ["open", kind, index] => {
                let index: usize = index
                    .parse()
                    .map_err(|_| ParseMessageError::new(input, "index must be a number"))?;
                match *kind {
                    "experience" => Ok(Message::OpenDetail(DetailRef::Experience(index))),
                    "project" => Ok(Message::OpenDetail(DetailRef::Project(index))),
                    _ => Err(ParseMessageError::new(
                        input,
                        "expected 'experience' or 'project'",
                    )),
                }
            }
            ["close"] => Ok(Message::CloseModal(CloseReason::Button)),
            ["close", reason] => match *reason {
                "button" => Ok(Message::CloseModal(CloseReason::Button)),
                "backdrop" => Ok(Message::CloseModal(CloseReason::Backdrop)),
                "escape" => Ok(Message::CloseModal(CloseReason::Escape)),
                "unmount" => Ok(Message::CloseModal(CloseReason::Unmount)),
                _ => Err(ParseMessageError::new(
                    input,
                    "expected button, backdrop, escape or unmount",
                )),
            },
            _ => Err(ParseMessageError::new(
                input,
                "expected toggle-theme, theme:<light|dark>, open-about, open:<kind>:<n> or close[:<reason>]",
            )),
        }
    }
}

pub struct ProfileView {
    content: Content,
    theme: ThemeStore,
    modal: ModalStore,
}

impl ProfileView {
    pub fn new(content: Content, theme: ThemeStore) -> Self {
        Self {
            content,
            theme,
            modal: ModalStore::new(),
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn theme_store(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn modal(&self) -> &ModalStore {
        &self.modal
    }

    /// Title and markdown body for a detail reference, if it has any.
    pub fn detail(&self, detail: DetailRef) -> Option<(&str, &str)> {
        match detail {
            DetailRef::Experience(i) => {
                let entry = self.content.experience.get(i)?;
                let body = entry.detail.as_deref()?;
                Some((entry.title.as_str(), body))
            }
            DetailRef::Project(i) => {
                let project = self.content.projects.get(i)?;
                Some((project.title.as_str(), project.detail.as_str()))
            }
        }
    }

    /// Apply a message. Unknown detail references are ignored.
    pub fn dispatch(&mut self, message: Message) {
        debug!(?message, "dispatch");
        match message {
            Message::ToggleTheme => {
                self.theme.toggle();
            }
            Message::SetTheme(theme) => self.theme.set(theme),
            Message::OpenAbout => {
                if self.content.profile.about.trim().is_empty() {
                    debug!("no about text to show");
                    return;
                }
                let title = self.content.about_title();
                let body = self.content.profile.about.clone();
                self.modal.open(ModalSlot::About, title, body);
            }
            Message::OpenDetail(detail) => match self.detail(detail) {
                Some((title, body)) => {
                    let (title, body) = (title.to_string(), body.to_string());
                    self.modal.open(ModalSlot::Detail, title, body);
                }
                None => debug!(%detail, "no detail to show"),
            },
            Message::CloseModal(reason) => {
                self.modal.dismiss(reason);
            }
        }
    }

    /// Tear down the view. Any open modal is closed first.
    pub fn unmount(mut self) -> Content {
        self.modal.dismiss(CloseReason::Unmount);
        self.content
    }
}
