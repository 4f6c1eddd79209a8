//! Unified error types for convoport.
//!
//! This module provides a single [`ConvoportError`] enum that covers all error
//! cases in the library, following the pattern used by crates like `reqwest`,
//! `serde_json`, and `csv`.
//!
//! # Error Taxonomy
//!
//! - **Precondition errors** ([`Auth`](ConvoportError::Auth),
//!   [`Validation`](ConvoportError::Validation)) are raised before any request
//!   is made.
//! - **Protocol errors** ([`Protocol`](ConvoportError::Protocol)) mean the API
//!   answered with something other than the object the call asked for.
//! - **Transport and storage errors** wrap the underlying crate error.
//!
//! None of these are retried. They propagate to the top-level run, which
//! aborts; partially written output stays on disk.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for convoport operations.
///
/// # Example
///
/// ```rust
/// use convoport::error::Result;
/// use convoport::models::ConversationSummary;
///
/// fn load() -> Result<Vec<ConversationSummary>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConvoportError>;

/// The error type for all convoport operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvoportError {
    /// The credential is missing or empty.
    #[error("No API key provided")]
    Auth,

    /// A required identifier is missing or invalid.
    ///
    /// Raised for an empty conversation id, an id that is not a plain
    /// directory name, or a page number of zero.
    #[error("Missing or invalid {field}")]
    Validation {
        /// Name of the offending input (e.g. "conversation ID")
        field: &'static str,
    },

    /// The API returned a payload of the wrong shape.
    ///
    /// Either the declared `type` does not match what the call expects, or a
    /// required field is absent.
    #[error("Did not receive a proper {expected} while {context} (got {found})")]
    Protocol {
        /// Declared type the call expects (e.g. "conversation.list")
        expected: &'static str,
        /// What was actually received
        found: String,
        /// What the caller was doing
        context: String,
    },

    /// HTTP transport error.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned status {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// An I/O error occurred while reading the index or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ConvoportError {
    /// Creates a validation error for the named input.
    pub fn validation(field: &'static str) -> Self {
        ConvoportError::Validation { field }
    }

    /// Creates a protocol error.
    pub fn protocol(
        expected: &'static str,
        found: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        ConvoportError::Protocol {
            expected,
            found: found.into(),
            context: context.into(),
        }
    }

    /// Returns `true` if this is an authentication error.
    pub fn is_auth(&self) -> bool {
        matches!(self, ConvoportError::Auth)
    }

    /// Returns `true` if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, ConvoportError::Validation { .. })
    }

    /// Returns `true` if this is a protocol error.
    pub fn is_protocol(&self) -> bool {
        matches!(self, ConvoportError::Protocol { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ConvoportError::Io(_))
    }

    /// Returns `true` if the error concerns a single remote conversation and
    /// later conversations are unaffected by it.
    ///
    /// Credential, storage and validation failures are excluded: they would
    /// fail every subsequent conversation the same way.
    pub fn is_recoverable_per_conversation(&self) -> bool {
        match self {
            ConvoportError::Protocol { .. }
            | ConvoportError::Status { .. }
            | ConvoportError::Json(_) => true,
            #[cfg(feature = "http")]
            ConvoportError::Http(_) => true,
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
