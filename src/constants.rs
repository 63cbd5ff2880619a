//! Application constants.
//!
//! Centralizes magic numbers shared by the navigation core so the config
//! layer and tests agree on defaults.

/// Canonical Bible structure constants.
pub mod bible {
    /// Number of Old Testament books; a book order at or below this is OT.
    pub const OLD_TESTAMENT_BOOKS: u32 = 39;

    /// Lowest valid chapter number.
    pub const FIRST_CHAPTER: u32 = 1;
}

/// Search and debounce constants.
pub mod search {
    /// Debounce window between raw keystrokes and full-text search fetches.
    pub const DEBOUNCE_MS: u64 = 600;

    /// Default maximum number of full-text search results to request.
    pub const DEFAULT_RESULT_LIMIT: usize = 50;
}

/// Chapter window constants for the infinite loader.
pub mod window {
    /// Chapters kept on each side of the current position initially.
    pub const INITIAL_RADIUS: u32 = 1;

    /// Chapters added to one side per `load_previous`/`load_next` call.
    pub const GROWTH_STEP: u32 = 2;
}
