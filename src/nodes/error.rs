//! Errors reported by the audio node.

use thiserror::Error;

use crate::media::{FetchError, RejectedSource, MAX_INLINE_TEXT_CHARS};

/// Errors that end the processing of one message
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioNodeError {
    #[error("Don't know how to handle: {0}")]
    UnrecognizedContent(String),

    #[error(
        "Looks like you are passing a very long string ({length} characters, more than {}) \
         as audio path or URL. Perhaps an HTTP request node returned its body as a string \
         instead of a buffer?",
        MAX_INLINE_TEXT_CHARS
    )]
    OversizedText { length: usize },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Unsupported file format for audio node, allowed formats: {allowed}")]
    UnsupportedFormat { allowed: String },
}

impl From<RejectedSource> for AudioNodeError {
    fn from(rejected: RejectedSource) -> Self {
        match rejected {
            RejectedSource::InlineText(text) => AudioNodeError::UnrecognizedContent(text),
            RejectedSource::OversizedText { length } => AudioNodeError::OversizedText { length },
            RejectedSource::Unrecognized(value) => AudioNodeError::UnrecognizedContent(value),
        }
    }
}
