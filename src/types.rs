//! Core type definitions for compile-time safety.
//!
//! Newtype wrappers around string identifiers prevent accidental mixing of
//! translation, book, and verse ids, and the data model mirrors what the
//! backend returns: books with chapter counts, per-chapter verse counts, and
//! individual verses carrying enough book context to render standalone.

use crate::constants::bible::OLD_TESTAMENT_BOOKS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Bible translation (e.g. a KJV edition).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslationId(pub String);

impl TranslationId {
    /// Create a new `TranslationId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TranslationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TranslationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a book within a translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(pub String);

impl BookId {
    /// Create a new `BookId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a single verse row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseId(pub String);

impl VerseId {
    /// Create a new `VerseId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which testament a book belongs to, derived from its canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Testament {
    /// Books 1-39.
    Old,
    /// Books 40 onward.
    New,
}

/// A Bible book as fetched for one translation. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Backend identifier.
    pub id: BookId,
    /// Short code (e.g. "GEN", "1JN").
    pub code: String,
    /// Display name in the translation's language.
    pub name: String,
    /// 1-based position in canonical Bible order.
    pub order: u32,
    /// Number of chapters in this book.
    pub chapter_count: u32,
}

impl Book {
    /// Which testament this book falls in by canonical order.
    #[must_use]
    pub const fn testament(&self) -> Testament {
        if self.order <= OLD_TESTAMENT_BOOKS {
            Testament::Old
        } else {
            Testament::New
        }
    }
}

/// Per-chapter verse count, used for passage-range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterInfo {
    /// 1-based chapter number.
    pub chapter: u32,
    /// Number of verses in the chapter.
    pub verse_count: u32,
}

/// A single verse with its text and enough book context to render alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Backend identifier.
    pub id: VerseId,
    /// Owning book.
    pub book_id: BookId,
    /// Owning book's short code.
    pub book_code: String,
    /// Owning book's display name.
    pub book_name: String,
    /// 1-based chapter number.
    pub chapter: u32,
    /// 1-based verse number, dense within the chapter.
    pub verse: u32,
    /// Verse text.
    pub text: String,
}

/// The drill-down level the navigation state machine is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationLevel {
    /// Book grid; no book selected yet.
    #[default]
    Books,
    /// Chapter grid of the selected book.
    Chapters,
    /// Verse list of the selected chapter.
    Verses,
}

impl NavigationLevel {
    /// Returns the human-readable name of this level.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Chapters => "chapters",
            Self::Verses => "verses",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn book(order: u32) -> Book {
        Book {
            id: BookId::new("b1"),
            code: "GEN".to_string(),
            name: "Genesis".to_string(),
            order,
            chapter_count: 50,
        }
    }

    #[test]
    fn testament_split_at_39() {
        assert_eq!(book(1).testament(), Testament::Old);
        assert_eq!(book(39).testament(), Testament::Old);
        assert_eq!(book(40).testament(), Testament::New);
        assert_eq!(book(66).testament(), Testament::New);
    }

    #[test]
    fn ids_round_trip_display() {
        let id = BookId::new("42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.as_str(), "42");
    }
}
