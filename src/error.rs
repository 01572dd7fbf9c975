use thiserror::Error;

/// Errors raised by [`PatternBuilder`](crate::builder::PatternBuilder).
#[derive(Error, Debug)]
pub enum PatternError {
    /// A mutating operation was called on a builder wrapping a precompiled pattern.
    #[error("cannot apply `{operation}` to a precompiled pattern")]
    InvalidState { operation: &'static str },

    /// The accumulated pattern text was rejected by the regex engine.
    #[error(transparent)]
    Syntax(#[from] regex::Error),
}

impl PatternError {
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, PatternError::InvalidState { .. })
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;
