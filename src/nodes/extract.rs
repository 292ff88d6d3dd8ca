//! Pulling the audio reference and caption out of a message.

use serde_json::Value;

use super::config::AudioNodeConfig;
use crate::media::classify::is_path_syntax;
use crate::media::ContentCandidate;
use crate::messages::{buffer, InboundEvent, Payload};

/// Find the audio reference for `message`.
///
/// Looks at, in order: the node `audio` setting, `payload.audio`, the payload
/// itself, then the node `filename` setting or the message `filename` when
/// they hold a path. Empty strings and `null` count as missing.
pub fn extract_content(config: &AudioNodeConfig, message: &InboundEvent) -> ContentCandidate {
    config
        .audio
        .as_deref()
        .filter(|audio| !audio.is_empty())
        .map(|audio| ContentCandidate::Text(audio.to_string()))
        .or_else(|| message.payload.field("audio").and_then(candidate_from_value))
        .or_else(|| candidate_from_payload(&message.payload))
        .or_else(|| {
            config
                .filename
                .as_deref()
                .filter(|f| is_path_syntax(f))
                .or_else(|| message.message_filename().filter(|f| is_path_syntax(f)))
                .map(|f| ContentCandidate::Text(f.to_string()))
        })
        .unwrap_or(ContentCandidate::Absent)
}

/// Caption from the node setting, else from `payload.caption`.
pub fn extract_caption(config: &AudioNodeConfig, message: &InboundEvent) -> Option<String> {
    config
        .caption
        .as_deref()
        .filter(|caption| !caption.is_empty())
        .or_else(|| message.payload.field_str("caption"))
        .filter(|caption| !caption.is_empty())
        .map(str::to_string)
}

fn candidate_from_value(value: &Value) -> Option<ContentCandidate> {
    if let Some(bytes) = buffer::from_json(value) {
        return Some(ContentCandidate::Buffer(bytes));
    }
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(ContentCandidate::Text(s.clone())),
        other => Some(ContentCandidate::Other(other.clone())),
    }
}

fn candidate_from_payload(payload: &Payload) -> Option<ContentCandidate> {
    match payload {
        Payload::Text(text) if !text.is_empty() => Some(ContentCandidate::Text(text.clone())),
        Payload::Buffer(bytes) => Some(ContentCandidate::Buffer(bytes.clone())),
        Payload::Other(value) => Some(ContentCandidate::Other(value.clone())),
        Payload::Text(_) | Payload::Empty | Payload::Fields(_) => None,
    }
}
