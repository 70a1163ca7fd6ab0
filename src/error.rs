//! Error types for Customizer-aware REST operations.
//!
//! The [`Result`] type alias provides a convenient shorthand for operations
//! that may fail.
//!
//! # Error Categories
//!
//! | Category | Variants | When |
//! |----------|----------|------|
//! | Configuration | `Config` | Session attach, fatal |
//! | Encoding | `Json` | Snapshot serialization |
//! | Transport | `Http` | Dispatching a rewritten request |
//!
//! Configuration errors are raised once, synchronously, when a preview
//! session is attached; a misconfigured session must never silently send
//! un-augmented requests, so nothing is installed on failure. Encoding
//! errors surface to the caller of the affected request and no partial
//! snapshot is ever sent.

use thiserror::Error;

/// Result type for Customizer-aware REST operations.
pub type Result<T> = std::result::Result<T, CustomizeError>;

/// Errors that can occur while intercepting or dispatching REST requests.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CustomizeError {
    /// Invalid parameters or missing collaborators when attaching a
    /// preview session.
    ///
    /// Raised when a required session field is empty or the REST API
    /// registry has not been initialized yet. Fatal: no prefilter is
    /// installed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization of the customized-settings map failed.
    ///
    /// A live setting held a value that cannot be encoded. The snapshot is
    /// abandoned whole; the affected request is never sent partially
    /// augmented.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The rewritten request could not be transmitted.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl CustomizeError {
    /// Whether this error is fatal to the preview session as a whole.
    ///
    /// Only configuration errors are; everything else is scoped to a single
    /// request.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, CustomizeError::Config(_))
    }
}
