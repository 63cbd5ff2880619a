//! Infinite bidirectional chapter loading.
//!
//! Given a navigation position, [`ChapterLoader`] computes the sliding
//! window of chapters to fetch on each side, merges fetch results as they
//! arrive in any order, and exposes pagination triggers plus the
//! scroll-anchoring metadata the rendering layer needs to prepend content
//! without a visual jump.
//!
//! Fetch results are keyed by their own `(book, chapter)`, never by
//! completion order, so a slow fetch can never corrupt another chapter's
//! slot.

use crate::constants::window::{GROWTH_STEP, INITIAL_RADIUS};
use crate::provider::BibleSource;
use crate::types::{Book, BookId, Verse};
use std::collections::{HashMap, HashSet};

/// One chapter entry of the loader's window, in canonical Bible order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSlot {
    /// Owning book id.
    pub book_id: BookId,
    /// Owning book display name.
    pub book_name: String,
    /// Owning book short code.
    pub book_code: String,
    /// 1-based chapter number.
    pub chapter: u32,
    /// Fetched verses; empty while loading.
    pub verses: Vec<Verse>,
    /// True until this chapter's own fetch has completed.
    pub is_loading: bool,
}

/// Scroll position captured immediately before prepending chapters.
///
/// Contract: capture `{scroll_top, scroll_height}` synchronously before the
/// window grows backward, then after the DOM updates apply
/// [`ScrollAnchor::restore`] to the new scroll height and assign the result
/// back to `scroll_top`. Both steps must happen synchronously around the
/// prepend, not on a later frame, or the anchored content jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnchor {
    scroll_top: f64,
    scroll_height: f64,
}

impl ScrollAnchor {
    /// Capture the scroll position before the prepend.
    #[must_use]
    pub const fn capture(scroll_top: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
        }
    }

    /// The corrected `scroll_top` for the post-prepend scroll height.
    #[must_use]
    pub fn restore(&self, new_scroll_height: f64) -> f64 {
        self.scroll_top + (new_scroll_height - self.scroll_height)
    }
}

/// Chapter counts kept on each side of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    before: u32,
    after: u32,
}

impl Window {
    const fn initial() -> Self {
        Self {
            before: INITIAL_RADIUS,
            after: INITIAL_RADIUS,
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::initial()
    }
}

/// Sliding-window chapter loader centered on the navigation position.
///
/// The window starts at one chapter on each side and grows monotonically via
/// [`ChapterLoader::load_previous`] / [`ChapterLoader::load_next`]; it only
/// shrinks back to the initial radius when the position changes. Fetched
/// chapters are cached across position changes.
#[derive(Debug)]
pub struct ChapterLoader {
    books: Vec<Book>,
    position: Option<(BookId, u32)>,
    window: Window,
    growth_step: u32,
    loaded: HashMap<(BookId, u32), Vec<Verse>>,
    in_flight: HashSet<(BookId, u32)>,
    enabled: bool,
}

impl ChapterLoader {
    /// Create a loader over the given canonical book list.
    #[must_use]
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            position: None,
            window: Window::initial(),
            growth_step: GROWTH_STEP,
            loaded: HashMap::new(),
            in_flight: HashSet::new(),
            enabled: true,
        }
    }

    /// Replace the book list (translation change). Clears the cache and
    /// resets the window: cached chapters belong to the old translation.
    pub fn set_books(&mut self, books: Vec<Book>) {
        self.books = books;
        self.position = None;
        self.window = Window::initial();
        self.loaded.clear();
        self.in_flight.clear();
    }

    /// Enable or disable the loader. Disabled, it exposes an empty window
    /// and no pagination.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Override how many chapters each side gains per load call. Wired from
    /// [`CoreConfig::window_step`](crate::config::CoreConfig::window_step);
    /// clamped to at least one.
    pub fn set_window_step(&mut self, step: u32) {
        self.growth_step = step.max(1);
    }

    /// Center the window on a new position. A changed position resets the
    /// window to its initial radius; the verse cache is kept.
    pub fn set_position(&mut self, book_id: BookId, chapter: u32) {
        let position = Some((book_id, chapter));
        if self.position != position {
            tracing::debug!(
                "loader position -> {}:{}",
                position.as_ref().map_or("-", |(b, _)| b.as_str()),
                chapter
            );
            self.position = position;
            self.window = Window::initial();
        }
    }

    fn book_index(&self, id: &BookId) -> Option<usize> {
        self.books.iter().position(|b| &b.id == id)
    }

    /// The chapter before `(index, chapter)` in canonical order, rolling
    /// into the previous book's last chapter; `None` at the global start.
    fn step_back(&self, index: usize, chapter: u32) -> Option<(usize, u32)> {
        if chapter > 1 {
            return Some((index, chapter - 1));
        }
        let previous = index.checked_sub(1)?;
        Some((previous, self.books.get(previous)?.chapter_count))
    }

    /// The chapter after `(index, chapter)`, rolling into the next book's
    /// first chapter; `None` at the global end.
    fn step_forward(&self, index: usize, chapter: u32) -> Option<(usize, u32)> {
        let book = self.books.get(index)?;
        if chapter < book.chapter_count {
            return Some((index, chapter + 1));
        }
        if index + 1 < self.books.len() {
            return Some((index + 1, 1));
        }
        None
    }

    /// The `(book index, chapter)` references of the current window, in
    /// canonical order, contiguous, centered on the position. Empty when
    /// disabled or unpositioned.
    fn window_refs(&self) -> Vec<(usize, u32)> {
        if !self.enabled {
            return Vec::new();
        }
        let Some((book_id, chapter)) = &self.position else {
            return Vec::new();
        };
        let Some(index) = self.book_index(book_id) else {
            return Vec::new();
        };

        let mut refs = Vec::new();
        let mut cursor = (index, *chapter);
        for _ in 0..self.window.before {
            match self.step_back(cursor.0, cursor.1) {
                Some(previous) => {
                    refs.push(previous);
                    cursor = previous;
                }
                None => break,
            }
        }
        refs.reverse();
        refs.push((index, *chapter));
        let mut cursor = (index, *chapter);
        for _ in 0..self.window.after {
            match self.step_forward(cursor.0, cursor.1) {
                Some(next) => {
                    refs.push(next);
                    cursor = next;
                }
                None => break,
            }
        }
        refs
    }

    /// The ordered chapter window with per-chapter loading flags.
    #[must_use]
    pub fn chapters(&self) -> Vec<ChapterSlot> {
        self.window_refs()
            .into_iter()
            .filter_map(|(index, chapter)| {
                let book = self.books.get(index)?;
                let key = (book.id.clone(), chapter);
                let verses = self.loaded.get(&key);
                Some(ChapterSlot {
                    book_id: book.id.clone(),
                    book_name: book.name.clone(),
                    book_code: book.code.clone(),
                    chapter,
                    verses: verses.cloned().unwrap_or_default(),
                    is_loading: verses.is_none(),
                })
            })
            .collect()
    }

    /// Whether more chapters exist before the window's first entry.
    #[must_use]
    pub fn can_load_previous(&self) -> bool {
        self.window_refs()
            .first()
            .is_some_and(|&(index, chapter)| self.step_back(index, chapter).is_some())
    }

    /// Whether more chapters exist after the window's last entry.
    #[must_use]
    pub fn can_load_next(&self) -> bool {
        self.window_refs()
            .last()
            .is_some_and(|&(index, chapter)| self.step_forward(index, chapter).is_some())
    }

    /// Grow the window backward. No-op at the global start; growth is
    /// monotonic and the window never shrinks except on position reset.
    pub fn load_previous(&mut self) {
        if self.can_load_previous() {
            self.window.before += self.growth_step;
            tracing::debug!("window grows backward to {}", self.window.before);
        }
    }

    /// Grow the window forward. No-op at the global end.
    pub fn load_next(&mut self) {
        if self.can_load_next() {
            self.window.after += self.growth_step;
            tracing::debug!("window grows forward to {}", self.window.after);
        }
    }

    /// Whether any chapter before the current position is still loading.
    #[must_use]
    pub fn is_loading_previous(&self) -> bool {
        self.side_loading(true)
    }

    /// Whether any chapter after the current position is still loading.
    #[must_use]
    pub fn is_loading_next(&self) -> bool {
        self.side_loading(false)
    }

    fn side_loading(&self, before: bool) -> bool {
        let Some((book_id, chapter)) = &self.position else {
            return false;
        };
        let Some(current) = self.book_index(book_id).map(|index| (index, *chapter)) else {
            return false;
        };
        self.window_refs().iter().any(|&entry| {
            let on_side = if before { entry < current } else { entry > current };
            on_side && {
                let key = self
                    .books
                    .get(entry.0)
                    .map(|b| (b.id.clone(), entry.1));
                key.is_some_and(|key| !self.loaded.contains_key(&key))
            }
        })
    }

    /// Window references that still need a fetch. Marks them in-flight so
    /// each chapter is requested once.
    pub fn take_pending(&mut self) -> Vec<(BookId, u32)> {
        let mut pending = Vec::new();
        for (index, chapter) in self.window_refs() {
            let Some(book) = self.books.get(index) else {
                continue;
            };
            let key = (book.id.clone(), chapter);
            if !self.loaded.contains_key(&key) && !self.in_flight.contains(&key) {
                self.in_flight.insert(key.clone());
                pending.push(key);
            }
        }
        pending
    }

    /// Merge one chapter's fetch result into its own slot. Safe to call in
    /// any order relative to other fetches.
    pub fn complete(&mut self, book_id: BookId, chapter: u32, verses: Vec<Verse>) {
        let key = (book_id, chapter);
        self.in_flight.remove(&key);
        self.loaded.insert(key, verses);
    }

    /// Forget an in-flight fetch that failed so it can be retried.
    pub fn abandon(&mut self, book_id: &BookId, chapter: u32) {
        self.in_flight.remove(&(book_id.clone(), chapter));
    }

    /// Resolve every pending chapter through the source.
    ///
    /// Fetches run concurrently and may complete in any order; each result
    /// lands in its own slot. A failed fetch is logged and abandoned so a
    /// later call can retry it.
    pub async fn fill(&mut self, source: &dyn BibleSource) {
        let pending = self.take_pending();
        if pending.is_empty() {
            return;
        }
        let fetches = pending.into_iter().map(|(book_id, chapter)| async move {
            let result = source.fetch_verses(&book_id, chapter).await;
            (book_id, chapter, result)
        });
        for (book_id, chapter, result) in futures::future::join_all(fetches).await {
            match result {
                Ok(verses) => self.complete(book_id, chapter, verses),
                Err(e) => {
                    tracing::warn!("fetch failed for {book_id} {chapter}: {e}");
                    self.abandon(&book_id, chapter);
                }
            }
        }
    }
}
