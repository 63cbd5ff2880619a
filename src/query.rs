//! Search query timing and reconciliation.
//!
//! The reference parser runs on every raw keystroke so references feel
//! instant, but full-text search fetches go through a fixed debounce window
//! to bound request volume. [`Debouncer`] implements that window with an
//! injected clock so tests never sleep.
//!
//! [`SyncedQuery`] reconciles the two sources of truth for the query text -
//! the user's live input and an external value such as a URL parameter -
//! with an explicit priority rule: local wins while dirty, external wins
//! once flushed.

use std::time::{Duration, Instant};

/// Fixed-window debouncer for the search-to-fetch path.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<String>,
    last_edit: Option<Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given settle window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_edit: None,
        }
    }

    /// Record a keystroke. Each call restarts the settle window.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(text.into());
        self.last_edit = Some(now);
    }

    /// Emit the settled value once the window has elapsed since the last
    /// keystroke; `None` while still settling or when nothing is pending.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last_edit = self.last_edit?;
        if now.duration_since(last_edit) < self.window {
            return None;
        }
        self.last_edit = None;
        self.pending.take()
    }

    /// Whether a value is waiting for its window to elapse.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Query text reconciled between local input and an external source.
#[derive(Debug, Default)]
pub struct SyncedQuery {
    value: String,
    dirty: bool,
}

impl SyncedQuery {
    /// Create with an initial external value.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
            dirty: false,
        }
    }

    /// The current query text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply local user input. The value is dirty until flushed and
    /// external updates are ignored meanwhile.
    pub fn set_local(&mut self, text: impl Into<String>) {
        self.value = text.into();
        self.dirty = true;
    }

    /// Mark the local value as delivered (e.g. pushed to the URL).
    /// External updates win again from here.
    pub fn flush(&mut self) {
        self.dirty = false;
    }

    /// Apply an external update. Ignored while local input is dirty.
    pub fn sync_external(&mut self, text: &str) {
        if !self.dirty && self.value != text {
            self.value = text.to_string();
        }
    }

    /// Whether un-flushed local input is pending.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}
