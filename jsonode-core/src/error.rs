//! Parse errors.
//!
//! Only structural problems abort a parse. Coercion misses and absent
//! children are absorbed by the accessor layer and never show up here.

use thiserror::Error;

/// Error returned when parsing fails.
///
/// Every variant carries the byte offset into the input where the problem
/// was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `}` or `]` with no open container.
    #[error("too many closing brackets: unmatched '{bracket}' at byte {offset}")]
    UnmatchedCloser { bracket: char, offset: usize },

    /// Input ended inside a string literal.
    #[error("unterminated string: quote opened at byte {offset} is never closed")]
    UnterminatedString { offset: usize },

    /// Input ended with containers still open.
    #[error("unclosed container: {open} still open at end of input (byte {offset})")]
    UnclosedContainer { open: usize, offset: usize },

    /// A backslash was the last character inside a string literal.
    #[error("dangling escape at byte {offset}")]
    DanglingEscape { offset: usize },

    /// `\u` not followed by four hex digits.
    #[error("invalid unicode escape at byte {offset}")]
    InvalidUnicodeEscape { offset: usize },

    /// Nesting exceeded the configured limit.
    #[error("nesting deeper than {limit} levels at byte {offset}")]
    DepthLimitExceeded { limit: usize, offset: usize },

    /// Input exceeded the configured size limit.
    #[error("input of {len} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { len: usize, limit: usize },
}

impl ParseError {
    /// True for grammar failures, false for configured resource limits.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            ParseError::DepthLimitExceeded { .. } | ParseError::InputTooLarge { .. }
        )
    }

    /// Byte offset where the error was detected.
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::UnmatchedCloser { offset, .. }
            | ParseError::UnterminatedString { offset }
            | ParseError::UnclosedContainer { offset, .. }
            | ParseError::DanglingEscape { offset }
            | ParseError::InvalidUnicodeEscape { offset }
            | ParseError::DepthLimitExceeded { offset, .. } => offset,
            ParseError::InputTooLarge { .. } => 0,
        }
    }
}
