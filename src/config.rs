//! Core configuration.
//!
//! Tunables for the navigation core, loadable from environment variables and
//! a `.env` file. Every field has a sensible default from [`crate::constants`]
//! so embedders that never call [`CoreConfig::load`] still get the standard
//! behavior.

use crate::constants::{search, window};
use crate::error::Result;
use dotenv::dotenv;
use std::env;
use std::time::Duration;

/// Tunable parameters of the navigation core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Debounce window between keystrokes and full-text search fetches.
    pub debounce: Duration,
    /// Chapters added per side per load call in the infinite loader.
    pub window_step: u32,
    /// Maximum full-text search results to request.
    pub search_limit: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(search::DEBOUNCE_MS),
            window_step: window::GROWTH_STEP,
            search_limit: search::DEFAULT_RESULT_LIMIT,
        }
    }
}

impl CoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `VERSECAST_DEBOUNCE_MS`, `VERSECAST_WINDOW_STEP`,
    /// `VERSECAST_SEARCH_LIMIT`. Unset variables keep their defaults.
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(ms) = env::var("VERSECAST_DEBOUNCE_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                config.debounce = Duration::from_millis(ms);
            }
        }

        if let Ok(step) = env::var("VERSECAST_WINDOW_STEP") {
            if let Ok(step) = step.parse::<u32>() {
                config.window_step = step.max(1);
            }
        }

        if let Ok(limit) = env::var("VERSECAST_SEARCH_LIMIT") {
            if let Ok(limit) = limit.parse::<usize>() {
                config.search_limit = limit.max(1);
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = CoreConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(600));
        assert_eq!(config.window_step, 2);
        assert_eq!(config.search_limit, 50);
    }
}
