/// Result alias that carries the custom [`AnnotatorError`] type.
pub type Result<T> = std::result::Result<T, AnnotatorError>;

/// Common error type for the core crate.
///
/// Every variant is recoverable: the operation that produced it leaves the
/// session untouched and the caller decides how to surface the rejection.
#[derive(Debug, thiserror::Error)]
pub enum AnnotatorError {
    /// An action was requested from a state that does not allow it, such as
    /// starting a recording twice or pausing while recording.
    #[error("cannot {action} while {state}")]
    InvalidStateTransition {
        state: &'static str,
        action: &'static str,
    },
    /// A media chunk arrived while no recording was in progress. The chunk is
    /// discarded.
    #[error("received a {len} byte media chunk while not recording")]
    UnexpectedChunk { len: usize },
    /// Recording was requested but the video source has no active stream.
    #[error("no active media source is available for recording")]
    NoMediaSource,
    /// Free-form message for collaborator and application level failures.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl AnnotatorError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn transition(state: &'static str, action: &'static str) -> Self {
        Self::InvalidStateTransition { state, action }
    }

    /// Returns `true` for errors that reflect a rejected user or collaborator
    /// action rather than an IO or parsing failure.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidStateTransition { .. } | Self::UnexpectedChunk { .. } | Self::NoMediaSource
        )
    }
}

impl From<&str> for AnnotatorError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for AnnotatorError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
