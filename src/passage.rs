//! Passage range parsing and validation.
//!
//! Parses literal passage input like "Gen 1:1-5" or "Ioan 3:16 - 4:2" into a
//! validated chapter:verse range. Failures are classified per field so the UI
//! can show a localized message next to the input; nothing here ever throws.

use crate::constants::bible::FIRST_CHAPTER;
use crate::reference::match_book;
use crate::types::{Book, ChapterInfo};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `Book C:V`, `Book C:V-V2`, or `Book C:V-C2:V2` with `:`/`.`/`,` as
    /// chapter separators and `-`/`–`/`—` as range separators.
    static ref PASSAGE_RE: Regex = Regex::new(
        r"^(?P<book>\d?\s*\p{L}[\p{L}\s]*?)\s*(?P<c1>\d+)\s*[:.,]\s*(?P<v1>\d+)(?:\s*[-–—]\s*(?:(?P<c2>\d+)\s*[:.,]\s*)?(?P<v2>\d+))?$"
    )
    .unwrap();
}

/// Validation outcome of a passage parse, evaluated in a fixed order; the
/// first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageStatus {
    /// Input was blank.
    Empty,
    /// Input did not match any supported passage form.
    InvalidFormat,
    /// No book matched the name fragment.
    BookNotFound,
    /// Start or end chapter outside the book's chapter range.
    InvalidChapter,
    /// End position chronologically precedes the start.
    EndBeforeStart,
    /// Start or end verse exceeds the chapter's verse count (only checked
    /// when per-chapter verse counts are supplied).
    InvalidVerse,
    /// The range is well-formed and valid.
    Valid,
}

impl PassageStatus {
    /// Stable localization key for the error message, `None` when valid.
    #[must_use]
    pub const fn error_key(self) -> Option<&'static str> {
        match self {
            Self::Empty => Some("passage.error.empty"),
            Self::InvalidFormat => Some("passage.error.invalid_format"),
            Self::BookNotFound => Some("passage.error.book_not_found"),
            Self::InvalidChapter => Some("passage.error.invalid_chapter"),
            Self::EndBeforeStart => Some("passage.error.end_before_start"),
            Self::InvalidVerse => Some("passage.error.invalid_verse"),
            Self::Valid => None,
        }
    }
}

/// A parsed passage range. Ephemeral: recomputed per input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPassageRange {
    /// Validation outcome.
    pub status: PassageStatus,
    /// Matched book; populated from the moment a book match succeeds so the
    /// caller keeps book context even after a later validation failure.
    pub book: Option<Book>,
    /// Start chapter, 1-based.
    pub start_chapter: Option<u32>,
    /// Start verse, 1-based.
    pub start_verse: Option<u32>,
    /// End chapter, 1-based (equal to start for same-chapter ranges).
    pub end_chapter: Option<u32>,
    /// End verse, 1-based (equal to start for single verses).
    pub end_verse: Option<u32>,
    /// Human-readable reference, populated when valid.
    pub formatted: Option<String>,
}

impl ParsedPassageRange {
    fn failed(status: PassageStatus) -> Self {
        Self {
            status,
            book: None,
            start_chapter: None,
            start_verse: None,
            end_chapter: None,
            end_verse: None,
            formatted: None,
        }
    }

    /// Matched book's short code, if a book was matched.
    #[must_use]
    pub fn book_code(&self) -> Option<&str> {
        self.book.as_ref().map(|b| b.code.as_str())
    }

    /// Stable localization key for the error, `None` when valid.
    #[must_use]
    pub const fn error_key(&self) -> Option<&'static str> {
        self.status.error_key()
    }
}

/// Format a validated range as a human-readable reference.
///
/// `Book C:V` for a single verse, `Book C:V-V2` within one chapter, and
/// `Book C:V - C2:V2` across chapters.
#[must_use]
pub fn format_reference(
    book_name: &str,
    start_chapter: u32,
    start_verse: u32,
    end_chapter: u32,
    end_verse: u32,
) -> String {
    if start_chapter == end_chapter {
        if start_verse == end_verse {
            format!("{book_name} {start_chapter}:{start_verse}")
        } else {
            format!("{book_name} {start_chapter}:{start_verse}-{end_verse}")
        }
    } else {
        format!("{book_name} {start_chapter}:{start_verse} - {end_chapter}:{end_verse}")
    }
}

/// Parse and validate a passage range against the book list.
///
/// When `chapters` (per-chapter verse counts for the matched book) is
/// supplied, verse numbers are validated too; otherwise verse existence is
/// deferred to the data fetch.
#[must_use]
pub fn parse_passage_range(
    input: &str,
    books: &[Book],
    chapters: Option<&[ChapterInfo]>,
) -> ParsedPassageRange {
    let cleaned = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return ParsedPassageRange::failed(PassageStatus::Empty);
    }

    let Some(caps) = PASSAGE_RE.captures(&cleaned) else {
        return ParsedPassageRange::failed(PassageStatus::InvalidFormat);
    };

    let digits = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
    let (Some(start_chapter), Some(start_verse)) = (digits("c1"), digits("v1")) else {
        return ParsedPassageRange::failed(PassageStatus::InvalidFormat);
    };
    // `Book C:V-V2` leaves c2 empty; the end chapter is the start chapter.
    let end_chapter = digits("c2").unwrap_or(start_chapter);
    let end_verse = digits("v2").unwrap_or(start_verse);

    let Some(book) = caps
        .name("book")
        .and_then(|m| match_book(m.as_str(), books))
        .cloned()
    else {
        return ParsedPassageRange::failed(PassageStatus::BookNotFound);
    };

    let mut result = ParsedPassageRange {
        status: PassageStatus::Valid,
        book: Some(book.clone()),
        start_chapter: Some(start_chapter),
        start_verse: Some(start_verse),
        end_chapter: Some(end_chapter),
        end_verse: Some(end_verse),
        formatted: None,
    };

    let chapter_in_range = |c: u32| (FIRST_CHAPTER..=book.chapter_count).contains(&c);
    if !chapter_in_range(start_chapter) || !chapter_in_range(end_chapter) {
        result.status = PassageStatus::InvalidChapter;
        return result;
    }

    if (end_chapter, end_verse) < (start_chapter, start_verse) {
        result.status = PassageStatus::EndBeforeStart;
        return result;
    }

    if let Some(chapters) = chapters {
        let verse_count =
            |c: u32| chapters.iter().find(|info| info.chapter == c).map(|info| info.verse_count);
        let start_overflows = verse_count(start_chapter).is_some_and(|n| start_verse > n);
        let end_overflows = verse_count(end_chapter).is_some_and(|n| end_verse > n);
        if start_overflows || end_overflows {
            result.status = PassageStatus::InvalidVerse;
            return result;
        }
    }

    result.formatted = Some(format_reference(
        &book.name,
        start_chapter,
        start_verse,
        end_chapter,
        end_verse,
    ));
    result
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::BookId;

    fn books() -> Vec<Book> {
        vec![
            Book {
                id: BookId::new("1"),
                code: "GEN".to_string(),
                name: "Genesis".to_string(),
                order: 1,
                chapter_count: 50,
            },
            Book {
                id: BookId::new("43"),
                code: "JHN".to_string(),
                name: "John".to_string(),
                order: 43,
                chapter_count: 21,
            },
        ]
    }

    #[test]
    fn valid_same_chapter_range() {
        let result = parse_passage_range("Gen 1:1-5", &books(), None);
        assert_eq!(result.status, PassageStatus::Valid);
        assert_eq!(result.start_chapter, Some(1));
        assert_eq!(result.start_verse, Some(1));
        assert_eq!(result.end_chapter, Some(1));
        assert_eq!(result.end_verse, Some(5));
        assert_eq!(result.formatted.as_deref(), Some("Genesis 1:1-5"));
    }

    #[test]
    fn valid_single_verse() {
        let result = parse_passage_range("John 3:16", &books(), None);
        assert_eq!(result.status, PassageStatus::Valid);
        assert_eq!(result.formatted.as_deref(), Some("John 3:16"));
        assert_eq!(result.end_verse, Some(16));
    }

    #[test]
    fn valid_cross_chapter_range() {
        let result = parse_passage_range("John 3:16-4:2", &books(), None);
        assert_eq!(result.status, PassageStatus::Valid);
        assert_eq!(result.end_chapter, Some(4));
        assert_eq!(result.formatted.as_deref(), Some("John 3:16 - 4:2"));
    }

    #[test]
    fn alternate_separators_accepted() {
        let dot = parse_passage_range("Gen 1.1-5", &books(), None);
        assert_eq!(dot.status, PassageStatus::Valid);
        let comma = parse_passage_range("Gen 1,1", &books(), None);
        assert_eq!(comma.status, PassageStatus::Valid);
        let en_dash = parse_passage_range("Gen 1:1–5", &books(), None);
        assert_eq!(en_dash.status, PassageStatus::Valid);
        let em_dash = parse_passage_range("Gen 1:1—2:3", &books(), None);
        assert_eq!(em_dash.status, PassageStatus::Valid);
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_passage_range("", &books(), None).status, PassageStatus::Empty);
        assert_eq!(parse_passage_range("  ", &books(), None).status, PassageStatus::Empty);
    }

    #[test]
    fn invalid_format() {
        let result = parse_passage_range("Genesis one one", &books(), None);
        assert_eq!(result.status, PassageStatus::InvalidFormat);
        assert_eq!(result.error_key(), Some("passage.error.invalid_format"));
        // Chapter without a verse is not a passage.
        assert_eq!(
            parse_passage_range("Gen 1", &books(), None).status,
            PassageStatus::InvalidFormat
        );
    }

    #[test]
    fn book_not_found() {
        let result = parse_passage_range("Nowhere 1:1", &books(), None);
        assert_eq!(result.status, PassageStatus::BookNotFound);
        assert!(result.book.is_none());
    }

    #[test]
    fn invalid_chapter_keeps_book_context() {
        let result = parse_passage_range("John 22:1", &books(), None);
        assert_eq!(result.status, PassageStatus::InvalidChapter);
        assert_eq!(result.book_code(), Some("JHN"));
    }

    #[test]
    fn chapter_zero_is_invalid() {
        let result = parse_passage_range("John 0:1", &books(), None);
        assert_eq!(result.status, PassageStatus::InvalidChapter);
    }

    #[test]
    fn end_before_start_across_chapters() {
        let result = parse_passage_range("Gen 5:1-1:1", &books(), None);
        assert_eq!(result.status, PassageStatus::EndBeforeStart);
    }

    #[test]
    fn end_before_start_within_chapter() {
        let result = parse_passage_range("Gen 1:9-3", &books(), None);
        assert_eq!(result.status, PassageStatus::EndBeforeStart);
    }

    #[test]
    fn verse_validation_only_with_chapter_data() {
        let chapters = [
            ChapterInfo { chapter: 1, verse_count: 31 },
            ChapterInfo { chapter: 2, verse_count: 25 },
        ];

        let unchecked = parse_passage_range("Gen 1:40", &books(), None);
        assert_eq!(unchecked.status, PassageStatus::Valid);

        let checked = parse_passage_range("Gen 1:40", &books(), Some(&chapters));
        assert_eq!(checked.status, PassageStatus::InvalidVerse);
        // Book context survives a verse validation failure.
        assert_eq!(checked.book_code(), Some("GEN"));
        assert_eq!(checked.error_key(), Some("passage.error.invalid_verse"));

        let end_checked = parse_passage_range("Gen 1:1-2:30", &books(), Some(&chapters));
        assert_eq!(end_checked.status, PassageStatus::InvalidVerse);
    }

    #[test]
    fn format_round_trips_valid_parse() {
        for input in ["Gen 1:1", "Gen 1:1-5", "John 3:16-4:2"] {
            let parsed = parse_passage_range(input, &books(), None);
            assert_eq!(parsed.status, PassageStatus::Valid, "{input}");
            let rebuilt = format_reference(
                &parsed.book.as_ref().unwrap().name,
                parsed.start_chapter.unwrap(),
                parsed.start_verse.unwrap(),
                parsed.end_chapter.unwrap(),
                parsed.end_verse.unwrap(),
            );
            assert_eq!(Some(rebuilt), parsed.formatted);
        }
    }
}
