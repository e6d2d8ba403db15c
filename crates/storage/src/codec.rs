//! Payload Codec
//!
//! Converts the flexible key/value payload of a data point to and from
//! its stored text form (canonical JSON).

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode stored payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serialize a payload to its canonical stored form.
pub fn encode<T: Serialize>(payload: &T) -> Result<String, CodecError> {
    serde_json::to_string(payload).map_err(CodecError::Encode)
}

/// Parse previously encoded payload text back into a key/value mapping.
///
/// Malformed input is an explicit error; callers decide whether to drop
/// the record or surface it as degraded.
pub fn decode(text: &str) -> Result<Map<String, Value>, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_roundtrip_preserves_values() {
        let payload = json!({
            "temperature": 22.5,
            "online": true,
            "firmware": "1.4.2",
            "readings": [1, 2, 3],
            "meta": {"unit": "celsius"}
        });
        let map = payload.as_object().unwrap().clone();

        let encoded = encode(&map).unwrap();
        let decoded = decode(&encoded).unwrap();

        assert_eq!(decoded, map);
    }

    #[test]
    fn test_encode_rejects_non_string_keys() {
        // JSON object keys must be strings
        let mut bad: HashMap<Vec<u8>, i32> = HashMap::new();
        bad.insert(vec![1, 2], 3);

        let err = encode(&bad).unwrap_err();
        assert!(matches!(err, CodecError::Encode(_)));
    }

    #[test]
    fn test_decode_rejects_malformed_text() {
        let err = decode("not valid json{").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        // A stored payload is always an object, never a bare scalar
        assert!(decode("42").is_err());
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let map = Map::new();
        let decoded = decode(&encode(&map).unwrap()).unwrap();
        assert!(decoded.is_empty());
    }
}
