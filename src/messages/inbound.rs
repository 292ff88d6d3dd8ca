//! Inbound flow messages
//!
//! A message entering a node: the chat context of the conversation it belongs
//! to, a payload, and whatever other fields upstream nodes attached. Unknown
//! fields are preserved so they can be passed through untouched.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::buffer;

/// Message payload
///
/// Serialized as plain JSON; binary payloads use the buffer object shape from
/// [`buffer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Payload {
    /// No payload (`null` or absent)
    #[default]
    Empty,
    /// String payload
    Text(String),
    /// Binary payload
    Buffer(Bytes),
    /// Object payload with named fields
    Fields(Map<String, Value>),
    /// Any other JSON value (numbers, booleans, arrays)
    Other(Value),
}

impl Payload {
    /// The payload as a string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// A named field of an object payload.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Fields(fields) => fields.get(name).filter(|v| !v.is_null()),
            _ => None,
        }
    }

    /// A named string field of an object payload.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        if let Some(bytes) = buffer::from_json(&value) {
            return Self::Buffer(bytes);
        }
        match value {
            Value::Null => Self::Empty,
            Value::String(text) => Self::Text(text),
            Value::Object(fields) => Self::Fields(fields),
            other => Self::Other(other),
        }
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::Empty => Value::Null,
            Payload::Text(text) => Value::String(text),
            Payload::Buffer(bytes) => buffer::to_json(&bytes),
            Payload::Fields(fields) => Value::Object(fields),
            Payload::Other(value) => value,
        }
    }
}

/// Chat context of the conversation a message belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalMessage {
    /// Transport identifier (e.g. "telegram", "slack")
    #[serde(default)]
    pub transport: String,
    /// Chat or conversation ID within the transport
    #[serde(default, alias = "chat_id", skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<Value>,
    /// ID of the message within the chat
    #[serde(default, alias = "message_id", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Value>,
    /// Transport-specific extra data
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A message flowing into a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    /// Message payload
    #[serde(default)]
    pub payload: Payload,
    /// File name attached by file-reading nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Chat context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_message: Option<OriginalMessage>,
    /// Every other field, passed through verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InboundEvent {
    /// Create a message for a chat on a transport
    pub fn new(transport: impl Into<String>, chat_id: impl Into<Value>, payload: Payload) -> Self {
        Self {
            payload,
            filename: None,
            original_message: Some(OriginalMessage {
                transport: transport.into(),
                chat_id: Some(chat_id.into()),
                message_id: None,
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    /// Set the message ID
    pub fn with_message_id(mut self, message_id: impl Into<Value>) -> Self {
        if let Some(original) = self.original_message.as_mut() {
            original.message_id = Some(message_id.into());
        }
        self
    }

    /// Set the file name attached by an upstream file node
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Whether the message carries a usable chat context: a transport and a
    /// chat ID.
    pub fn is_valid(&self) -> bool {
        self.transport().is_some() && self.chat_id().is_some()
    }

    /// Transport the message came from
    pub fn transport(&self) -> Option<&str> {
        self.original_message
            .as_ref()
            .map(|m| m.transport.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Chat ID, ignoring `null` and empty strings
    pub fn chat_id(&self) -> Option<&Value> {
        self.original_message
            .as_ref()
            .and_then(|m| m.chat_id.as_ref())
            .filter(|id| is_present(id))
    }

    /// Message ID, ignoring `null` and empty strings
    pub fn message_id(&self) -> Option<&Value> {
        self.original_message
            .as_ref()
            .and_then(|m| m.message_id.as_ref())
            .filter(|id| is_present(id))
    }

    /// `filename` field, if non-empty
    pub fn message_filename(&self) -> Option<&str> {
        self.filename.as_deref().filter(|f| !f.is_empty())
    }
}

fn is_present(id: &Value) -> bool {
    match id {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
