//! Modal dialog state.
//!
//! The page has two named modal slots, [`ModalSlot::About`] and
//! [`ModalSlot::Detail`], that share one dialog template. Both are held by a
//! single [`ModalStore`] that contains at most one open dialog at a time:
//!
//! ```text
//! Closed ──open(slot, title, body)──▶ Open { slot, title, body }
//!   ▲                                    │  │
//!   └──────────── close / dismiss ───────┘  └─ open(other) replaces content
//! ```
//!
//! Background scroll lock is derived from the store (`is_open()`), never
//! tracked per slot, so closing one slot can't release a lock another slot
//! still needs. [`ModalStore::close_slot`] only acts when the named slot is
//! the open one.
//!
//! Closing always clears title and body.

use std::fmt;
use tracing::debug;

/// Named modal slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalSlot {
    About,
    Detail,
}

impl ModalSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalSlot::About => "about",
            ModalSlot::Detail => "detail",
        }
    }
}

impl fmt::Display for ModalSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a modal was dismissed. Every reason takes the same close path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseReason {
    #[default]
    Button,
    Backdrop,
    Escape,
    Unmount,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::Button => "button",
            CloseReason::Backdrop => "backdrop",
            CloseReason::Escape => "escape",
            CloseReason::Unmount => "unmount",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        slot: ModalSlot,
        title: String,
        body: String,
    },
}

/// Single shared modal store for all slots.
#[derive(Debug, Clone, Default)]
pub struct ModalStore {
    state: ModalState,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `slot` with the given content, replacing any open dialog.
    pub fn open(&mut self, slot: ModalSlot, title: impl Into<String>, body: impl Into<String>) {
        if let ModalState::Open { slot: previous, .. } = &self.state {
            debug!(from = %previous, to = %slot, "modal replaced");
        }
        self.state = ModalState::Open {
            slot,
            title: title.into(),
            body: body.into(),
        };
        debug!(%slot, "modal opened");
    }

    /// Close whatever is open. Returns the slot that was closed.
    pub fn close(&mut self) -> Option<ModalSlot> {
        let closed = self.open_slot();
        self.state = ModalState::Closed;
        if let Some(slot) = closed {
            debug!(%slot, "modal closed");
        }
        closed
    }

    /// Close from a user or lifecycle event.
    pub fn dismiss(&mut self, reason: CloseReason) -> Option<ModalSlot> {
        debug!(reason = reason.as_str(), "modal dismiss");
        self.close()
    }

    /// Close `slot` only if it is the open one. Returns whether it closed.
    pub fn close_slot(&mut self, slot: ModalSlot) -> bool {
        if self.open_slot() == Some(slot) {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn open_slot(&self) -> Option<ModalSlot> {
        match &self.state {
            ModalState::Open { slot, .. } => Some(*slot),
            ModalState::Closed => None,
        }
    }

    /// Whether `slot` is the open slot.
    pub fn is_slot_open(&self, slot: ModalSlot) -> bool {
        self.open_slot() == Some(slot)
    }

    /// Background scroll lock. Mirrors `is_open()` exactly.
    pub fn is_scroll_locked(&self) -> bool {
        self.is_open()
    }
}
