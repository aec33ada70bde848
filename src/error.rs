//! Error types and result type for the cedict-ingest crate.
//!
//! Two layers of errors exist:
//!
//! - [`MalformedLine`] and [`IngestError`] describe a single bad dictionary line.
//!   They are cheap, comparable values produced by the parser and the ingest
//!   pipeline and never unwind past the line they belong to.
//! - [`CedictError`] is the crate-wide error for everything else (I/O, config,
//!   store backends, cancellation). It uses `snafu` with backtrace capture.
//!
//! # Examples
//!
//! ```
//! use cedict_ingest::{CedictError, Result};
//!
//! fn open_store(path: &str) -> Result<()> {
//!     if path.is_empty() {
//!         return Err(CedictError::invalid_parameter("Store path cannot be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(open_store("").is_err());
//! ```

use std::io;
use snafu::{Snafu, Backtrace};

// Re-export snafu for context providers
pub use snafu;

/// Structural grammar violation in a non-comment dictionary line.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum MalformedLine {
    /// Fewer than two whitespace separated headword tokens before `[`.
    #[snafu(display("expected traditional and simplified headwords before '['"))]
    MissingHeadwords,

    #[snafu(display("missing '[' opening the romanization"))]
    MissingOpenBracket,

    #[snafu(display("missing ']' closing the romanization"))]
    MissingCloseBracket,

    #[snafu(display("missing '/' introducing the glosses"))]
    MissingGlossDelimiter,

    /// The gloss span is empty, or every sense in it is blank.
    #[snafu(display("gloss is empty"))]
    EmptyGloss,
}

/// A [`MalformedLine`] tagged with the 1-based number of the raw line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("line {line_no}: {source}"))]
pub struct IngestError {
    /// Raw line number, counting comment and blank lines.
    pub line_no: u64,
    pub source: MalformedLine,
}

impl IngestError {
    pub fn new(line_no: u64, source: MalformedLine) -> Self {
        Self { line_no, source }
    }

    pub fn cause(&self) -> &MalformedLine {
        &self.source
    }
}

/// Main error type for the crate.
///
/// All variants capture a backtrace. Use the helper constructors on
/// `CedictError` instead of building variants by hand.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CedictError {
    /// I/O error while reading a source or writing a store.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Error parsing JSON configuration or serializing records.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },

    /// A malformed line stopped a run configured with the abort policy.
    #[snafu(display("Ingest aborted: {source}"))]
    IngestAborted {
        source: IngestError,
        backtrace: Backtrace,
    },

    /// The store already holds a record with the same
    /// (traditional, simplified, romanization) tuple.
    #[snafu(display("Duplicate record: {traditional} {simplified} [{romanization}]"))]
    DuplicateRecord {
        traditional: String,
        simplified: String,
        romanization: String,
        backtrace: Backtrace,
    },

    /// Full-text index backend failure.
    #[snafu(display("Index error: {message}"))]
    IndexError {
        message: String,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// Operation was interrupted by the progress callback.
    #[snafu(display("User interrupted"))]
    UserInterrupted {
        backtrace: Backtrace,
    },
}

impl From<io::Error> for CedictError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<serde_json::Error> for CedictError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError {
            source: Box::new(source),
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<IngestError> for CedictError {
    fn from(source: IngestError) -> Self {
        Self::IngestAborted { source, backtrace: Backtrace::capture() }
    }
}

impl From<tantivy::TantivyError> for CedictError {
    fn from(source: tantivy::TantivyError) -> Self {
        Self::IndexError {
            message: source.to_string(),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context providers.
impl CedictError {
    /// Creates an `InvalidParameter` error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use cedict_ingest::CedictError;
    ///
    /// let error = CedictError::invalid_parameter("report interval must be at most 100");
    /// ```
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn index_error<S: Into<String>>(message: S) -> Self {
        Self::IndexError {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `DuplicateRecord` error for the given uniqueness tuple.
    pub fn duplicate_record(traditional: &str, simplified: &str, romanization: &str) -> Self {
        Self::DuplicateRecord {
            traditional: traditional.to_string(),
            simplified: simplified.to_string(),
            romanization: romanization.to_string(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `UserInterrupted` error.
    pub fn user_interrupted() -> Self {
        Self::UserInterrupted {
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error stopped a run because of a malformed line.
    pub fn is_ingest_abort(&self) -> bool {
        matches!(self, CedictError::IngestAborted { .. })
    }
}

/// A specialized `Result` type for cedict-ingest operations.
pub type Result<T> = std::result::Result<T, CedictError>;
