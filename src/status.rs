//! Status Modal State
//!
//! Four variants: success and error close themselves after a delay, loading
//! and confirmation stay until the caller closes them. Each `show` bumps a
//! generation so a timer armed for an older modal cannot close a newer one.

use crate::config::STATUS_DISMISS_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Loading,
    Confirmation,
}

impl StatusKind {
    /// Delay before auto-close, if this variant closes itself
    pub fn auto_close_ms(&self) -> Option<u32> {
        match self {
            StatusKind::Success | StatusKind::Error => Some(STATUS_DISMISS_MS),
            StatusKind::Loading | StatusKind::Confirmation => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Success => "status-modal success",
            StatusKind::Error => "status-modal error",
            StatusKind::Loading => "status-modal loading",
            StatusKind::Confirmation => "status-modal confirmation",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StatusKind::Success => "✓",
            StatusKind::Error => "✕",
            StatusKind::Loading => "…",
            StatusKind::Confirmation => "?",
        }
    }
}

/// What the modal currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub kind: StatusKind,
    pub title: String,
    pub message: String,
}

impl StatusView {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, title: "Success".to_string(), message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, title: "Error".to_string(), message: message.into() }
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Loading, title: "Please wait".to_string(), message: message.into() }
    }

    pub fn confirmation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Confirmation, title: title.into(), message: message.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusModalState {
    current: Option<StatusView>,
    generation: u64,
}

impl StatusModalState {
    /// Open (or replace) the modal; returns the generation to expire it with
    pub fn show(&mut self, view: StatusView) -> u64 {
        self.generation += 1;
        self.current = Some(view);
        self.generation
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    /// Close a Loading or Confirmation view whose page is gone. Success and
    /// Error views are left to their timers. Returns whether it closed.
    pub fn dismiss_blocking(&mut self) -> bool {
        let blocking = self
            .current
            .as_ref()
            .is_some_and(|view| view.kind.auto_close_ms().is_none());
        if blocking {
            self.current = None;
        }
        blocking
    }

    /// Timer callback: close only if `generation` is still on screen and
    /// the variant auto-closes. Returns whether it closed.
    pub fn expire(&mut self, generation: u64) -> bool {
        let closes = self.generation == generation
            && self
                .current
                .as_ref()
                .is_some_and(|view| view.kind.auto_close_ms().is_some());
        if closes {
            self.current = None;
        }
        closes
    }

    pub fn current(&self) -> Option<&StatusView> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
