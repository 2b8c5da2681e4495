/// Convenience result type used across novelkit.
pub type NovelKitResult<T> = Result<T, NovelKitError>;

/// Top-level error taxonomy used by presenter, parser and coordinator APIs.
///
/// Cancellation is deliberately absent: a cancelled reveal or effect is reported through
/// [`crate::PresentOutcome`] / [`crate::EffectOutcome`], never as an error.
#[derive(thiserror::Error, Debug)]
pub enum NovelKitError {
    /// Caller-supplied argument is absent, negative, inverted or non-finite.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Index lies outside the addressed text.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Operation is not allowed in the current session state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NovelKitError {
    /// Build a [`NovelKitError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`NovelKitError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build a [`NovelKitError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`NovelKitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for NovelKitError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
