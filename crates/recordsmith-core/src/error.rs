use thiserror::Error;

/// Errors raised while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// No single `<...>` body could be located.
    #[error("can't locate pattern")]
    PatternNotFound,
    /// The bracketed body is not `letters[/digits[/specials]]`.
    #[error("invalid pattern body: {0}")]
    InvalidPatternBody(String),
    /// The counts add up to more than the length cap.
    #[error("max pattern len is {max}, actual: {actual}")]
    PatternTooLong { max: usize, actual: usize },
}

/// Convenience alias for pattern compilation results.
pub type Result<T> = std::result::Result<T, PatternError>;
