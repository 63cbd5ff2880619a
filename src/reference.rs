//! Smart reference parsing.
//!
//! Turns free search text like "ioan 3:16" or "1 Cor 13" into a structured
//! book/chapter/verse match against the fetched book list. The parser is
//! tolerant of diacritics and partial book names so a user typing in any
//! translation language gets instant reference detection.

use crate::types::Book;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Optional leading digit (for "1 John"-style books), a book name
    /// fragment, then an optional chapter and an optional verse separated by
    /// space, colon, or comma.
    static ref REFERENCE_RE: Regex =
        Regex::new(r"^(?P<book>\d?\s*\p{L}[\p{L}\s]*?)\s*(?:(?P<chapter>\d+)(?:\s*[:,\s]\s*(?P<verse>\d+))?)?$")
            .unwrap();
}

/// Result of parsing free text against the book list.
///
/// Ephemeral: recomputed per keystroke, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceMatch {
    /// The text is not a recognizable reference.
    None,
    /// A book name alone, e.g. "gen".
    Book {
        /// The matched book.
        book: Book,
    },
    /// Book plus chapter, e.g. "Psalm 23".
    Chapter {
        /// The matched book.
        book: Book,
        /// 1-based chapter number, validated against the book.
        chapter: u32,
    },
    /// Book, chapter, and verse, e.g. "John 3:16".
    Verse {
        /// The matched book.
        book: Book,
        /// 1-based chapter number, validated against the book.
        chapter: u32,
        /// 1-based verse number; existence is validated at fetch time.
        verse: u32,
    },
}

impl ReferenceMatch {
    /// The matched book, if any.
    #[must_use]
    pub const fn book(&self) -> Option<&Book> {
        match self {
            Self::None => None,
            Self::Book { book } | Self::Chapter { book, .. } | Self::Verse { book, .. } => {
                Some(book)
            }
        }
    }

    /// Whether the text failed to parse as a reference.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Normalize text for case- and diacritic-insensitive comparison:
/// lowercase, NFD-decompose, drop combining marks, drop non-alphanumerics.
#[must_use]
pub fn normalize_for_match(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Match a book name fragment against the book list.
///
/// Tiers are tried in strict priority order, first hit wins:
/// exact normalized name, name prefix, exact short code.
#[must_use]
pub fn match_book<'a>(fragment: &str, books: &'a [Book]) -> Option<&'a Book> {
    let needle = normalize_for_match(fragment);
    if needle.is_empty() {
        return None;
    }
    books
        .iter()
        .find(|b| normalize_for_match(&b.name) == needle)
        .or_else(|| {
            books
                .iter()
                .find(|b| normalize_for_match(&b.name).starts_with(&needle))
        })
        .or_else(|| books.iter().find(|b| normalize_for_match(&b.code) == needle))
}

/// Parse free text into a reference against the fetched book list.
///
/// Chapter existence is validated against the matched book's chapter count;
/// verse existence is deferred to the data fetch. Pure: identical inputs
/// yield identical output.
#[must_use]
pub fn parse_reference(query: &str, books: &[Book]) -> ReferenceMatch {
    // Trim and collapse runs of whitespace before matching.
    let cleaned = query.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return ReferenceMatch::None;
    }

    let Some(caps) = REFERENCE_RE.captures(&cleaned) else {
        return ReferenceMatch::None;
    };

    let Some(book) = caps
        .name("book")
        .and_then(|m| match_book(m.as_str(), books))
    else {
        return ReferenceMatch::None;
    };

    let chapter = match caps.name("chapter") {
        Some(m) => match m.as_str().parse::<u32>() {
            Ok(c) => Some(c),
            // Digits present but unusable; the whole parse fails.
            Err(_) => return ReferenceMatch::None,
        },
        None => None,
    };
    let verse = match caps.name("verse") {
        Some(m) => match m.as_str().parse::<u32>() {
            Ok(v) => Some(v),
            Err(_) => return ReferenceMatch::None,
        },
        None => None,
    };

    if let Some(chapter) = chapter {
        if chapter > book.chapter_count {
            return ReferenceMatch::None;
        }
    }

    match (chapter, verse) {
        (Some(chapter), Some(verse)) => ReferenceMatch::Verse {
            book: book.clone(),
            chapter,
            verse,
        },
        (Some(chapter), None) => ReferenceMatch::Chapter {
            book: book.clone(),
            chapter,
        },
        _ => ReferenceMatch::Book { book: book.clone() },
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::BookId;

    fn book(id: &str, code: &str, name: &str, order: u32, chapters: u32) -> Book {
        Book {
            id: BookId::new(id),
            code: code.to_string(),
            name: name.to_string(),
            order,
            chapter_count: chapters,
        }
    }

    fn romanian_books() -> Vec<Book> {
        vec![
            book("1", "GEN", "Geneza", 1, 50),
            book("19", "PSA", "Psalmii", 19, 150),
            book("43", "IOA", "Ioan", 43, 21),
            book("62", "1IO", "1 Ioan", 62, 5),
            book("5", "DT", "Deuteronomul", 5, 34),
        ]
    }

    #[test]
    fn parses_full_verse_reference_with_diacritic_insensitive_book() {
        let books = romanian_books();
        let result = parse_reference("ioan 3:16", &books);
        match result {
            ReferenceMatch::Verse { book, chapter, verse } => {
                assert_eq!(book.name, "Ioan");
                assert_eq!(chapter, 3);
                assert_eq!(verse, 16);
            }
            other => panic!("Expected verse match, got {other:?}"),
        }
    }

    #[test]
    fn parses_chapter_only_reference() {
        let books = romanian_books();
        let result = parse_reference("psalmii 23", &books);
        match result {
            ReferenceMatch::Chapter { book, chapter } => {
                assert_eq!(book.code, "PSA");
                assert_eq!(chapter, 23);
            }
            other => panic!("Expected chapter match, got {other:?}"),
        }
    }

    #[test]
    fn matches_book_by_prefix() {
        let books = romanian_books();
        let result = parse_reference("gen", &books);
        assert_eq!(result.book().map(|b| b.name.as_str()), Some("Geneza"));
    }

    #[test]
    fn exact_name_beats_prefix_of_another_book() {
        // "Ioan" is both an exact name and a prefix of nothing else here, but
        // "1 Ioan" must not shadow the exact match.
        let books = romanian_books();
        let result = parse_reference("ioan", &books);
        assert_eq!(result.book().map(|b| b.code.as_str()), Some("IOA"));
    }

    #[test]
    fn matches_numbered_book() {
        let books = romanian_books();
        let result = parse_reference("1 ioan 2:1", &books);
        match result {
            ReferenceMatch::Verse { book, chapter, verse } => {
                assert_eq!(book.code, "1IO");
                assert_eq!(chapter, 2);
                assert_eq!(verse, 1);
            }
            other => panic!("Expected verse match, got {other:?}"),
        }
    }

    #[test]
    fn matches_book_by_code_when_no_name_matches() {
        // "dt" is not a prefix of "Deuteronomul", only its short code.
        let books = romanian_books();
        let result = parse_reference("dt 6:4", &books);
        assert_eq!(result.book().map(|b| b.name.as_str()), Some("Deuteronomul"));
    }

    #[test]
    fn diacritics_in_book_names_are_ignored() {
        let books = vec![book("40", "MAT", "Matei întâiul", 40, 28)];
        let result = parse_reference("matei intaiul 5", &books);
        assert!(matches!(result, ReferenceMatch::Chapter { chapter: 5, .. }));
    }

    #[test]
    fn chapter_beyond_book_fails_whole_parse() {
        let books = romanian_books();
        assert!(parse_reference("ioan 22", &books).is_none());
        assert!(parse_reference("ioan 22:1", &books).is_none());
    }

    #[test]
    fn verse_existence_is_not_validated() {
        let books = romanian_books();
        let result = parse_reference("ioan 3:999", &books);
        assert!(matches!(result, ReferenceMatch::Verse { verse: 999, .. }));
    }

    #[test]
    fn comma_and_space_verse_separators() {
        let books = romanian_books();
        assert!(matches!(
            parse_reference("ioan 3,16", &books),
            ReferenceMatch::Verse { verse: 16, .. }
        ));
        assert!(matches!(
            parse_reference("ioan 3 16", &books),
            ReferenceMatch::Verse { verse: 16, .. }
        ));
    }

    #[test]
    fn whitespace_is_collapsed() {
        let books = romanian_books();
        let a = parse_reference("  ioan   3 : 16 ", &books);
        let b = parse_reference("ioan 3:16", &books);
        assert_eq!(a, b);
    }

    #[test]
    fn non_reference_text_and_empty_inputs_fail() {
        let books = romanian_books();
        assert!(parse_reference("", &books).is_none());
        assert!(parse_reference("   ", &books).is_none());
        assert!(parse_reference("3:16", &books).is_none());
        assert!(parse_reference("nonexistent 3:16", &books).is_none());
    }

    #[test]
    fn empty_book_list_matches_nothing() {
        assert!(parse_reference("ioan 3:16", &[]).is_none());
    }

    #[test]
    fn parse_is_idempotent() {
        let books = romanian_books();
        let a = parse_reference("1 ioan 2:1", &books);
        let b = parse_reference("1 ioan 2:1", &books);
        assert_eq!(a, b);
    }
}
