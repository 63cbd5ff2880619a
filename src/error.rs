//! Application error types.
//!
//! The navigation core itself has no fatal paths: parser failures are typed
//! result values and navigation operations are total. This error type covers
//! the two boundaries that can genuinely fail - data fetches behind
//! [`crate::provider::BibleSource`] and configuration loading.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the fetch and configuration boundaries.
#[derive(Debug, Error)]
pub enum Error {
    /// Data fetch error (network, backend, decode) with optional hint
    #[error("Fetch failed: {message}")]
    Fetch {
        /// Human-readable error description.
        message: String,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create a fetch error without a hint.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a fetch error with an actionable hint.
    pub fn fetch_hint(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Fetch {
            message: message.into(),
            hint: Some(hint),
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config {
            message: message.into(),
            hint,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}
