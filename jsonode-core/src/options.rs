//! Parser configuration.

/// Resource limits for a single parse.
///
/// The default imposes no limits. Trees of any depth are built, compared,
/// serialized and dropped without recursion.
///
/// ```
/// use jsonode_core::{parse_with, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(2);
/// assert!(parse_with("[[1]]", &options).is_ok());
/// assert!(parse_with("[[[1]]]", &options).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: Option<usize>,
    max_input_len: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of simultaneously open containers.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Maximum input length in bytes.
    pub fn with_max_input_len(mut self, limit: usize) -> Self {
        self.max_input_len = Some(limit);
        self
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[inline]
    pub fn max_input_len(&self) -> Option<usize> {
        self.max_input_len
    }
}
