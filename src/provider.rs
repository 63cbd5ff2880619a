//! External data interfaces.
//!
//! The navigation core owns no HTTP client or storage; it consumes a data
//! fetch capability through [`BibleSource`] and reports URL-driven
//! navigation through [`NavigationSink`]. [`StaticBible`] is an in-memory
//! source for tests and embedders without a backend.

use crate::error::Result;
use crate::types::{Book, BookId, ChapterInfo, TranslationId, Verse};
use async_trait::async_trait;
use std::collections::HashMap;

/// How a search query was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// The query was a scripture reference; results are the located verses.
    Reference,
    /// Full-text search over verse text.
    Text,
}

/// Result set of a search fetch.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// How the query was interpreted.
    pub kind: SearchKind,
    /// Matching verses, already ordered by the source.
    pub results: Vec<Verse>,
}

/// Async data fetch capability the core depends on.
///
/// Implementations may be backed by a REST client, a local database, or
/// in-memory data. The core tolerates empty results from any method; fetch
/// errors surface as [`crate::Error`] and never corrupt navigation state.
#[async_trait]
pub trait BibleSource: Send + Sync {
    /// Fetch the book list of a translation.
    async fn fetch_books(&self, translation: &TranslationId) -> Result<Vec<Book>>;

    /// Fetch per-chapter verse counts for a book.
    async fn fetch_chapters(&self, book: &BookId) -> Result<Vec<ChapterInfo>>;

    /// Fetch all verses of one chapter.
    async fn fetch_verses(&self, book: &BookId, chapter: u32) -> Result<Vec<Verse>>;

    /// Full-text or reference search, bounded by `limit`.
    ///
    /// Only triggered when the reference parser does not already classify
    /// the query as a reference; see [`crate::search::SmartSearch`].
    async fn search(
        &self,
        query: &str,
        translation: &TranslationId,
        limit: usize,
    ) -> Result<SearchOutcome>;
}

/// Deep-link callbacks the coordinator and state machine call when the URL
/// layer, not in-memory state, is the source of truth.
///
/// Verse indices are 0-based, matching the navigation state machine.
pub trait NavigationSink {
    /// A book match should navigate to the book's chapter view.
    fn navigate_to_book(&mut self, book: &Book);

    /// A chapter or verse match should navigate to the chapter view,
    /// optionally highlighting a verse.
    fn navigate_to_chapter(&mut self, book: &Book, chapter: u32, verse_index: Option<usize>);

    /// The live query text changed.
    fn search_query_changed(&mut self, query: &str) {
        let _ = query;
    }
}

/// In-memory [`BibleSource`] over preloaded data.
#[derive(Debug, Default)]
pub struct StaticBible {
    books: HashMap<TranslationId, Vec<Book>>,
    chapters: HashMap<BookId, Vec<ChapterInfo>>,
    verses: HashMap<(BookId, u32), Vec<Verse>>,
}

impl StaticBible {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the book list of a translation.
    pub fn insert_books(&mut self, translation: TranslationId, books: Vec<Book>) {
        self.books.insert(translation, books);
    }

    /// Register per-chapter verse counts for a book.
    pub fn insert_chapters(&mut self, book: BookId, chapters: Vec<ChapterInfo>) {
        self.chapters.insert(book, chapters);
    }

    /// Register the verses of one chapter.
    pub fn insert_verses(&mut self, book: BookId, chapter: u32, verses: Vec<Verse>) {
        self.verses.insert((book, chapter), verses);
    }
}

#[async_trait]
impl BibleSource for StaticBible {
    async fn fetch_books(&self, translation: &TranslationId) -> Result<Vec<Book>> {
        Ok(self.books.get(translation).cloned().unwrap_or_default())
    }

    async fn fetch_chapters(&self, book: &BookId) -> Result<Vec<ChapterInfo>> {
        Ok(self.chapters.get(book).cloned().unwrap_or_default())
    }

    async fn fetch_verses(&self, book: &BookId, chapter: u32) -> Result<Vec<Verse>> {
        Ok(self
            .verses
            .get(&(book.clone(), chapter))
            .cloned()
            .unwrap_or_default())
    }

    async fn search(
        &self,
        query: &str,
        _translation: &TranslationId,
        limit: usize,
    ) -> Result<SearchOutcome> {
        let needle = query.to_lowercase();
        let mut results: Vec<Verse> = self
            .verses
            .values()
            .flatten()
            .filter(|v| v.text.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        results.sort_by(|a, b| (&a.book_id.0, a.chapter, a.verse).cmp(&(&b.book_id.0, b.chapter, b.verse)));
        results.truncate(limit);
        Ok(SearchOutcome {
            kind: SearchKind::Text,
            results,
        })
    }
}
