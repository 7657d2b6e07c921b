/// Convenience result type used across Framelift.
pub type FrameliftResult<T> = Result<T, FrameliftError>;

/// Top-level error taxonomy used by filter APIs.
#[derive(thiserror::Error, Debug)]
pub enum FrameliftError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating the filter over a frame.
    #[error("filter error: {0}")]
    Filter(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrameliftError {
    /// Build a [`FrameliftError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FrameliftError::Filter`] value.
    pub fn filter(msg: impl Into<String>) -> Self {
        Self::Filter(msg.into())
    }

    /// Build a [`FrameliftError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
