/// Convenience result type used across the crate.
pub type ScanlineResult<T> = Result<T, ScanlineError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScanlineError {
    /// Invalid user-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A keyframe capture violated the scanline length precondition.
    #[error("capture error: {0}")]
    Capture(String),

    /// Frame recording was aborted or misused.
    #[error("record error: {0}")]
    Record(String),

    /// The external video encoder failed or could not be started.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration and scripts.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanlineError {
    /// Build a [`ScanlineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScanlineError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`ScanlineError::Record`] value.
    pub fn record(msg: impl Into<String>) -> Self {
        Self::Record(msg.into())
    }

    /// Build a [`ScanlineError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ScanlineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScanlineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
