//! Unified error type for greekmovies.
//!
//! Extraction never surfaces these to add-on clients: the coordinator folds
//! every failure into an empty response. The [`FailureKind`] returned by
//! [`Error::kind`] decides how loudly that fold is logged.

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The source page could not be fetched (transport error, timeout, or a
    /// non-success status).
    FetchFailure,
    /// A content ID did not carry our namespace, or carried it around an
    /// empty locator.
    NamespaceMismatch,
    /// Configuration could not be turned into a working extractor.
    Configuration,
}

/// Unified error type covering all failure modes in greekmovies.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The outbound request failed before a response arrived.
    #[error("Fetch failed for {url}: {message}")]
    Fetch {
        /// The absolute URL that was requested.
        url: String,
        /// Human-readable transport error.
        message: String,
    },

    /// The outbound request exceeded its time budget.
    #[error("Fetch timed out for {url}")]
    Timeout {
        /// The absolute URL that was requested.
        url: String,
    },

    /// The source answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// The absolute URL that was requested.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// The content ID does not start with the configured namespace prefix.
    #[error("Content id outside namespace: {0}")]
    NamespaceMismatch(String),

    /// The content ID carries the prefix but no locator after it.
    #[error("Content id has an empty locator: {0}")]
    EmptyLocator(String),

    /// A configured CSS selector failed to compile.
    #[error("Invalid selector `{selector}`: {message}")]
    Selector {
        /// The offending selector string.
        selector: String,
        /// Parser error description.
        message: String,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify this error for the coordinator's fallback policy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Fetch { .. } | Error::Timeout { .. } | Error::Status { .. } => {
                FailureKind::FetchFailure
            }
            Error::NamespaceMismatch(_) | Error::EmptyLocator(_) => FailureKind::NamespaceMismatch,
            Error::Selector { .. } | Error::Internal(_) => {
                FailureKind::Configuration
            }
        }
    }

    /// Convenience constructor for [`Error::Fetch`].
    pub fn fetch(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Selector`].
    pub fn selector(selector: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
