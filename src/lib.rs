//! `VerseCast` navigation core - Bible browsing state for a presentation client.
//!
//! This crate owns the navigation and search state of a worship-display
//! application: reference parsing, passage-range validation, the browsing
//! state machine with its presented/searched highlight model, and the
//! infinite bidirectional chapter loader. Rendering, HTTP, and styling live
//! in the consuming UI layer; data access goes through the async
//! [`provider::BibleSource`] trait.

pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod navigation;
pub mod passage;
pub mod provider;
pub mod query;
pub mod reference;
pub mod search;
pub mod types;

pub use error::{Error, Result};
pub use loader::{ChapterLoader, ChapterSlot, ScrollAnchor};
pub use navigation::{ChapterJump, NavigationState, Navigator};
pub use passage::{format_reference, parse_passage_range, ParsedPassageRange, PassageStatus};
pub use provider::{BibleSource, NavigationSink, SearchKind, SearchOutcome, StaticBible};
pub use query::{Debouncer, SyncedQuery};
pub use reference::{parse_reference, ReferenceMatch};
pub use search::{should_text_search, SmartSearch};
pub use types::{Book, BookId, ChapterInfo, NavigationLevel, Testament, TranslationId, Verse, VerseId};
