//! Crate-level error types
//!
//! The extraction engine is total over document content (see the parser's
//! error-handling design): malformed captures and unmatched labels become
//! `None`, never an `Err`. The one class of fallible operation left is
//! pattern-table construction, which only fails if a maintainer hand-edits
//! a regex literal into something invalid.

use thiserror::Error;

/// Errors raised while building the static pattern/lexicon tables.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A named regex pattern failed to compile.
    #[error("invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Result type for the crate's configuration-time fallible operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;
