//! Outbound audio messages
//!
//! The normalized message an audio node emits towards the chat transport.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::inbound::{InboundEvent, OriginalMessage};

/// Type of outbound content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Audio,
}

/// Payload of an outbound audio message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPayload {
    /// Always [`ContentType::Audio`]
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Audio bytes
    #[serde(with = "super::buffer")]
    pub content: Bytes,
    /// Optional caption text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// File name presented to the recipient; may be empty
    #[serde(default)]
    pub filename: String,
    /// Chat the message is addressed to
    #[serde(default)]
    pub chat_id: Option<Value>,
    /// Message being answered, if any
    #[serde(default)]
    pub message_id: Option<Value>,
    /// Always `false` for messages produced by a node
    pub inbound: bool,
}

/// An outbound audio message
///
/// Every field of the inbound message other than the payload is carried over
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundAudioEvent {
    /// Audio payload
    pub payload: AudioPayload,
    /// File name attached by upstream file nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Chat context of the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_message: Option<OriginalMessage>,
    /// Every other inbound field
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutboundAudioEvent {
    /// Build the reply to `inbound`, replacing its payload.
    pub fn reply_to(
        inbound: InboundEvent,
        content: Bytes,
        caption: Option<String>,
        filename: String,
    ) -> Self {
        let chat_id = inbound.chat_id().cloned();
        let message_id = inbound.message_id().cloned();
        Self {
            payload: AudioPayload {
                content_type: ContentType::Audio,
                content,
                caption,
                filename,
                chat_id,
                message_id,
                inbound: false,
            },
            filename: inbound.filename,
            original_message: inbound.original_message,
            extra: inbound.extra,
        }
    }
}
