//! Wire codec for queue payloads.
//!
//! The transport carries base64-wrapped JSON. Consumers also accept plain
//! JSON text, since local tooling and test harnesses enqueue unwrapped
//! messages.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a message for the transport: JSON, then base64.
pub fn encode_message<T: Serialize>(message: &T) -> Result<String, CodecError> {
    let json = serde_json::to_string(message)?;
    Ok(BASE64.encode(json))
}

/// Decode a queue payload, trying the base64 wrapping first and falling
/// back to plain JSON.
pub fn decode_message<T: DeserializeOwned>(payload: &str) -> Result<T, CodecError> {
    if let Ok(bytes) = BASE64.decode(payload.trim()) {
        if let Ok(message) = serde_json::from_slice(&bytes) {
            return Ok(message);
        }
    }
    Ok(serde_json::from_str(payload)?)
}
