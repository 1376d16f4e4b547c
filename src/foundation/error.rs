/// Convenience result type used across the recorder.
pub type RecorderResult<T> = Result<T, RecorderError>;

/// Top-level error taxonomy used by recorder APIs.
#[derive(thiserror::Error, Debug)]
pub enum RecorderError {
    /// Recorder settings failed validation. Aborts only the affected recording.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The recorder was driven with a number of capture inputs other than one.
    #[error("unsupported number of capture inputs: expected exactly 1, got {0}")]
    InputCardinality(usize),

    /// An output format selector outside the known set.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The captured pixel layout does not match what the output format consumes.
    #[error("format mismatch: {format} output requires {expected} pixels, got {actual}")]
    FormatMismatch {
        /// Output format name.
        format: &'static str,
        /// Pixel layout the format requires.
        expected: &'static str,
        /// Pixel layout that was supplied.
        actual: &'static str,
    },

    /// Ordering or state violation inside the capture pipeline.
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// The image codec rejected a buffer.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RecorderError {
    /// Build a [`RecorderError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`RecorderError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`RecorderError::Pipeline`] value.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Build a [`RecorderError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`RecorderError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the error ends the whole recording session.
    ///
    /// Configuration errors are reported to the host and only prevent this recorder from
    /// starting; everything else indicates a broken pipeline contract or an unrecoverable
    /// collaborator failure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::Serde(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
