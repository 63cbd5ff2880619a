//! Bible browsing state machine.
//!
//! Owns the current browsing position (book/chapter), the drill-down level,
//! and two independent highlight cursors: the *presented* verse (live on the
//! external display) and the *searched* verse (located by navigation/search).
//! Presentation always wins: presenting a verse clears the search highlight,
//! and clearing the presentation hands the cursor back to the search
//! highlight so the position survives hiding the display.
//!
//! All operations are total. Out-of-range indices are tolerated downstream
//! as "nothing to show", never raised as errors.

use crate::types::{BookId, NavigationLevel, TranslationId};
use serde::{Deserialize, Serialize};

/// Snapshot of the browsing position and highlight cursors.
///
/// Owned exclusively by a [`Navigator`]; consumers read it and call the
/// navigator's operations. Invariants: `chapter` is set only at
/// [`NavigationLevel::Verses`], `book_id` only at `Chapters` or `Verses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Active translation, if one has been selected.
    pub translation_id: Option<TranslationId>,
    /// Selected book id, when at chapter or verse level.
    pub book_id: Option<BookId>,
    /// Selected book's display name.
    pub book_name: Option<String>,
    /// Selected chapter, when at verse level.
    pub chapter: Option<u32>,
    /// 0-based index of the verse live on the external display.
    pub presented_index: Option<usize>,
    /// 0-based index of the verse highlighted by search/navigation.
    pub searched_index: Option<usize>,
    /// Live search query text.
    pub search_query: String,
    /// Query saved when a search-driven jump left the search view, restored
    /// by [`Navigator::go_back`].
    pub previous_search_query: Option<String>,
    /// Current drill-down level.
    pub level: NavigationLevel,
}

/// Parameters for a direct chapter jump (deep links and smart search).
#[derive(Debug, Clone)]
pub struct ChapterJump {
    /// Target book id.
    pub book_id: BookId,
    /// Target book display name.
    pub book_name: String,
    /// Target chapter.
    pub chapter: u32,
    /// 0-based verse index to highlight or present.
    pub verse_index: Option<usize>,
    /// When false, this is a search-driven jump: the query text is preserved
    /// and recorded for back-navigation, and the verse is highlighted rather
    /// than presented.
    pub clear_search: bool,
    /// Highlight the verse without presenting it and without recording the
    /// query for back-navigation.
    pub select_only: bool,
}

impl ChapterJump {
    /// A default-mode jump to the given chapter.
    pub fn new(book_id: BookId, book_name: impl Into<String>, chapter: u32) -> Self {
        Self {
            book_id,
            book_name: book_name.into(),
            chapter,
            verse_index: None,
            clear_search: true,
            select_only: false,
        }
    }

    /// Target a 0-based verse index.
    #[must_use]
    pub const fn verse(mut self, index: usize) -> Self {
        self.verse_index = Some(index);
        self
    }

    /// Mark this jump as search-driven (`clear_search = false`).
    #[must_use]
    pub const fn keep_search(mut self) -> Self {
        self.clear_search = false;
        self
    }

    /// Highlight only; do not present and do not record the query.
    #[must_use]
    pub const fn select_only(mut self) -> Self {
        self.select_only = true;
        self
    }
}

/// Sole owner and mutator of [`NavigationState`].
///
/// One instance per browsing session. Consumers read the state through
/// [`Navigator::state`] and mutate it only through the operations here.
#[derive(Debug, Default)]
pub struct Navigator {
    state: NavigationState,
    /// Last translation id seen by [`Navigator::sync_translation`].
    last_translation: Option<TranslationId>,
}

impl Navigator {
    /// Create a navigator at the initial state (book level, empty query).
    #[must_use]
    pub fn new(translation_id: Option<TranslationId>) -> Self {
        Self {
            state: NavigationState {
                translation_id: translation_id.clone(),
                ..NavigationState::default()
            },
            last_translation: translation_id,
        }
    }

    /// Read-only view of the current state.
    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Select a book and move to chapter level.
    ///
    /// Resets the chapter and both highlight cursors. Pass
    /// `clear_search = false` when arriving from an in-progress search to
    /// preserve the query text for back-navigation.
    pub fn select_book(&mut self, book_id: BookId, book_name: impl Into<String>, clear_search: bool) {
        let book_name = book_name.into();
        tracing::debug!("select_book {} ({book_name})", book_id);
        self.state.book_id = Some(book_id);
        self.state.book_name = Some(book_name);
        self.state.chapter = None;
        self.state.presented_index = None;
        self.state.searched_index = None;
        self.state.level = NavigationLevel::Chapters;
        if clear_search {
            self.state.search_query.clear();
        }
    }

    /// Select a chapter of the current book and move to verse level.
    pub fn select_chapter(&mut self, chapter: u32) {
        tracing::debug!("select_chapter {chapter}");
        self.state.chapter = Some(chapter);
        self.state.presented_index = None;
        self.state.searched_index = None;
        self.state.level = NavigationLevel::Verses;
    }

    /// Present the verse at the given 0-based index on the external display.
    ///
    /// Presentation wins over the search highlight, which is cleared.
    pub fn present_verse(&mut self, index: usize) {
        self.state.presented_index = Some(index);
        self.state.searched_index = None;
    }

    /// Set or clear the search highlight without affecting presentation.
    pub fn set_searched_index(&mut self, index: Option<usize>) {
        self.state.searched_index = index;
    }

    /// Highlight cursor position both verse-step operations advance from:
    /// the larger of the two cursors, or -1 when neither is set.
    fn cursor_base(&self) -> i64 {
        let presented = self.state.presented_index.map_or(-1, |i| i as i64);
        let searched = self.state.searched_index.map_or(-1, |i| i as i64);
        presented.max(searched)
    }

    /// Present the verse after the current cursor position.
    ///
    /// No upper clamp: advancing past the chapter's last verse yields an
    /// index with no corresponding verse, and rolling over into the next
    /// chapter is the rendering layer's decision.
    pub fn next_verse(&mut self) {
        let next = self.cursor_base() + 1;
        self.present_verse(next as usize);
    }

    /// Present the verse before the current cursor position, clamped at 0.
    pub fn previous_verse(&mut self) {
        let previous = (self.cursor_base() - 1).max(0);
        self.present_verse(previous as usize);
    }

    /// Stop presenting. The last presented index moves into the search
    /// highlight so the cursor position survives hiding the display.
    pub fn clear_presentation(&mut self) {
        if let Some(last) = self.state.presented_index.take() {
            self.state.searched_index = Some(last);
        }
    }

    /// Step one level back out of the current view.
    ///
    /// If a previous search query was saved by a search-driven jump, restore
    /// it and return to book level with the position cleared. Otherwise
    /// verses go back to chapters and chapters back to books; book level is
    /// terminal.
    pub fn go_back(&mut self) {
        if let Some(previous) = self.state.previous_search_query.take() {
            tracing::debug!("go_back restoring search query");
            self.state.search_query = previous;
            self.state.book_id = None;
            self.state.book_name = None;
            self.state.chapter = None;
            self.state.presented_index = None;
            self.state.searched_index = None;
            self.state.level = NavigationLevel::Books;
            return;
        }
        match self.state.level {
            NavigationLevel::Verses => {
                self.state.chapter = None;
                self.state.presented_index = None;
                self.state.searched_index = None;
                self.state.level = NavigationLevel::Chapters;
            }
            NavigationLevel::Chapters => {
                self.state.book_id = None;
                self.state.book_name = None;
                self.state.level = NavigationLevel::Books;
            }
            NavigationLevel::Books => {}
        }
    }

    /// Jump directly to a chapter (deep links and the smart search
    /// coordinator). See [`ChapterJump`] for the three behavior modes.
    pub fn navigate_to_chapter(&mut self, jump: ChapterJump) {
        tracing::debug!(
            "navigate_to_chapter {}:{} (clear_search={}, select_only={})",
            jump.book_id,
            jump.chapter,
            jump.clear_search,
            jump.select_only
        );
        let same_place = self.state.book_id.as_ref() == Some(&jump.book_id)
            && self.state.chapter == Some(jump.chapter);

        self.state.book_id = Some(jump.book_id);
        self.state.book_name = Some(jump.book_name);
        self.state.chapter = Some(jump.chapter);
        self.state.level = NavigationLevel::Verses;

        if jump.select_only {
            self.state.searched_index = jump.verse_index;
            if !same_place {
                self.state.presented_index = None;
            }
            self.state.search_query.clear();
        } else if jump.clear_search {
            match jump.verse_index {
                Some(index) => self.present_verse(index),
                None => {
                    self.state.presented_index = None;
                    self.state.searched_index = None;
                }
            }
            self.state.search_query.clear();
        } else {
            // Search-driven jump: highlight, keep the query text, and save
            // it so go_back can return to the search view.
            self.state.searched_index = jump.verse_index;
            if !same_place {
                self.state.presented_index = None;
            }
            if !self.state.search_query.is_empty() {
                self.state.previous_search_query = Some(self.state.search_query.clone());
            }
        }
    }

    /// Full-state jump used to sync from an external "currently presenting"
    /// source. Presents the verse and clears the query.
    pub fn navigate_to_verse(
        &mut self,
        translation_id: TranslationId,
        book_id: BookId,
        book_name: impl Into<String>,
        chapter: u32,
        verse_index: usize,
    ) {
        self.state.translation_id = Some(translation_id.clone());
        self.last_translation = Some(translation_id);
        self.state.book_id = Some(book_id);
        self.state.book_name = Some(book_name.into());
        self.state.chapter = Some(chapter);
        self.state.level = NavigationLevel::Verses;
        self.present_verse(verse_index);
        self.state.search_query.clear();
    }

    /// Return to the initial state, preserving the active translation.
    pub fn reset(&mut self) {
        let translation_id = self.state.translation_id.clone();
        self.state = NavigationState {
            translation_id,
            ..NavigationState::default()
        };
    }

    /// Synchronize with the active translation id.
    ///
    /// Whenever the id differs from its last-seen value the machine
    /// force-resets (content under a stale translation must not remain
    /// navigable), preserving only the query text and the saved previous
    /// query. Applied at this synchronization point, a translation change
    /// supersedes any navigation call it raced with.
    pub fn sync_translation(&mut self, translation_id: &TranslationId) {
        if self.last_translation.as_ref() == Some(translation_id) {
            return;
        }
        tracing::debug!("translation changed to {translation_id}, resetting navigation");
        let search_query = std::mem::take(&mut self.state.search_query);
        let previous_search_query = self.state.previous_search_query.take();
        self.state = NavigationState {
            translation_id: Some(translation_id.clone()),
            search_query,
            previous_search_query,
            ..NavigationState::default()
        };
        self.last_translation = Some(translation_id.clone());
    }

    /// Replace the live query text (the undebounced value).
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }
}
