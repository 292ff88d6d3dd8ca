//! Binary values inside JSON messages.
//!
//! Flow messages are JSON documents, so raw bytes travel in the shape Node.js
//! gives `Buffer#toJSON()`: `{"type": "Buffer", "data": [1, 2, 3]}`.

use bytes::Bytes;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// Tag value marking a JSON object as a serialized buffer
pub const BUFFER_TAG: &str = "Buffer";

/// Decode a buffer object, returning `None` for any other JSON shape.
///
/// Every element of `data` must be an integer in `0..=255`.
pub fn from_json(value: &Value) -> Option<Bytes> {
    let obj = value.as_object()?;
    if obj.get("type").and_then(Value::as_str) != Some(BUFFER_TAG) {
        return None;
    }
    let data = obj.get("data")?.as_array()?;
    let mut bytes = Vec::with_capacity(data.len());
    for item in data {
        let byte = u8::try_from(item.as_u64()?).ok()?;
        bytes.push(byte);
    }
    Some(Bytes::from(bytes))
}

/// Encode bytes as a buffer object.
pub fn to_json(bytes: &[u8]) -> Value {
    json!({ "type": BUFFER_TAG, "data": bytes })
}

/// `#[serde(with = "crate::messages::buffer")]` support for `Bytes` fields.
pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    to_json(bytes).serialize(serializer)
}

/// See [`serialize`].
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
    let value = Value::deserialize(deserializer)?;
    from_json(&value).ok_or_else(|| D::Error::custom("expected a {\"type\": \"Buffer\"} object"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_buffer() {
        let value = json!({"type": "Buffer", "data": [73, 68, 51]});
        assert_eq!(from_json(&value), Some(Bytes::from_static(b"ID3")));
    }

    #[test]
    fn test_from_json_empty_buffer() {
        let value = json!({"type": "Buffer", "data": []});
        assert_eq!(from_json(&value), Some(Bytes::new()));
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        assert!(from_json(&json!("ID3")).is_none());
        assert!(from_json(&json!({"type": "Blob", "data": [1]})).is_none());
        assert!(from_json(&json!({"type": "Buffer"})).is_none());
        assert!(from_json(&json!({"type": "Buffer", "data": [256]})).is_none());
        assert!(from_json(&json!({"type": "Buffer", "data": [-1]})).is_none());
        assert!(from_json(&json!({"type": "Buffer", "data": ["a"]})).is_none());
    }

    #[test]
    fn test_to_json_shape() {
        let value = to_json(&[1, 2, 255]);
        assert_eq!(value, json!({"type": "Buffer", "data": [1, 2, 255]}));
        assert_eq!(from_json(&value), Some(Bytes::from_static(&[1, 2, 255])));
    }
}
