//! Smart search coordination.
//!
//! Feeds live (undebounced) query text through the reference parser and, on
//! a *new* match, issues exactly one navigation: either on the local
//! [`Navigator`] or through the URL layer's [`NavigationSink`]. Repeated
//! renders with the same match are de-duplicated by a composite key; the
//! key resets whenever the query stops parsing, so re-entering the same
//! reference after clearing retriggers navigation.
//!
//! The de-duplication key is owned per coordinator instance, never shared
//! ambient state, so independent browsing sessions cannot suppress each
//! other's navigations.

use crate::navigation::{ChapterJump, Navigator};
use crate::provider::NavigationSink;
use crate::reference::{parse_reference, ReferenceMatch};
use crate::types::Book;

/// Per-session search coordinator.
#[derive(Debug, Default)]
pub struct SmartSearch {
    /// Composite key of the last navigation issued, `None` after the query
    /// last failed to parse.
    last_key: Option<String>,
    /// Last query text reported to a [`NavigationSink`].
    last_query: Option<String>,
}

/// Whether full-text search should run for this query: only when the
/// reference parser does not already classify it as a reference.
#[must_use]
pub fn should_text_search(query: &str, books: &[Book]) -> bool {
    !query.trim().is_empty() && parse_reference(query, books).is_none()
}

impl SmartSearch {
    /// Create a coordinator with no navigation history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite `kind-book-chapter-verse` key identifying a navigation.
    fn key_for(parsed: &ReferenceMatch) -> Option<String> {
        match parsed {
            ReferenceMatch::None => None,
            ReferenceMatch::Book { book } => Some(format!("book-{}", book.id)),
            ReferenceMatch::Chapter { book, chapter } => {
                Some(format!("chapter-{}-{chapter}", book.id))
            }
            ReferenceMatch::Verse { book, chapter, verse } => {
                Some(format!("verse-{}-{chapter}-{verse}", book.id))
            }
        }
    }

    /// Re-parse the query and return the match only when it differs from
    /// the last navigation issued. A non-parsing query clears the history.
    pub fn observe(&mut self, query: &str, books: &[Book]) -> Option<ReferenceMatch> {
        let parsed = parse_reference(query, books);
        let Some(key) = Self::key_for(&parsed) else {
            self.last_key = None;
            return None;
        };
        if self.last_key.as_ref() == Some(&key) {
            return None;
        }
        tracing::debug!("smart search navigating ({key})");
        self.last_key = Some(key);
        Some(parsed)
    }

    /// Observe the query and drive the local navigator.
    ///
    /// Book matches select the book, chapter/verse matches jump to the
    /// chapter in search mode (query preserved, verse highlighted at its
    /// 0-based index). Returns whether a navigation was issued.
    pub fn drive(&mut self, query: &str, books: &[Book], navigator: &mut Navigator) -> bool {
        let Some(parsed) = self.observe(query, books) else {
            return false;
        };
        match parsed {
            ReferenceMatch::Book { book } => {
                navigator.select_book(book.id, book.name, false);
            }
            ReferenceMatch::Chapter { book, chapter } => {
                navigator.navigate_to_chapter(
                    ChapterJump::new(book.id, book.name, chapter).keep_search(),
                );
            }
            ReferenceMatch::Verse { book, chapter, verse } => {
                navigator.navigate_to_chapter(
                    ChapterJump::new(book.id, book.name, chapter)
                        .verse(verse.saturating_sub(1) as usize)
                        .keep_search(),
                );
            }
            ReferenceMatch::None => {}
        }
        true
    }

    /// Observe the query and route navigation through the URL layer
    /// instead of local state. Returns whether a navigation was issued.
    pub fn drive_sink(
        &mut self,
        query: &str,
        books: &[Book],
        sink: &mut dyn NavigationSink,
    ) -> bool {
        if self.last_query.as_deref() != Some(query) {
            sink.search_query_changed(query);
            self.last_query = Some(query.to_string());
        }
        let Some(parsed) = self.observe(query, books) else {
            return false;
        };
        match &parsed {
            ReferenceMatch::Book { book } => sink.navigate_to_book(book),
            ReferenceMatch::Chapter { book, chapter } => {
                sink.navigate_to_chapter(book, *chapter, None);
            }
            ReferenceMatch::Verse { book, chapter, verse } => {
                sink.navigate_to_chapter(book, *chapter, Some(verse.saturating_sub(1) as usize));
            }
            ReferenceMatch::None => {}
        }
        true
    }

    /// Forget the last navigation so the next match always triggers.
    pub fn reset(&mut self) {
        self.last_key = None;
        self.last_query = None;
    }
}
