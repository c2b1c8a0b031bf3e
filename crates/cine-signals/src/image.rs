//! Image payload validation and encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::error::{SignalError, SignalResult};

/// Maximum accepted image size before encoding.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024; // 4 MiB

/// A validated, base64-encoded image ready for transmission.
///
/// Validation happens here, before any network call: non-image mime types
/// and oversized payloads are rejected synchronously.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    mime_type: String,
    encoded: String,
    raw_len: usize,
}

impl ImagePayload {
    /// Validate and encode raw image bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> SignalResult<Self> {
        if !mime_type.starts_with("image/") {
            return Err(SignalError::invalid_image(format!(
                "unsupported mime type: {}",
                mime_type
            )));
        }
        if bytes.is_empty() {
            return Err(SignalError::invalid_image("empty payload"));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(SignalError::invalid_image(format!(
                "payload is {} bytes, limit is {}",
                bytes.len(),
                MAX_IMAGE_BYTES
            )));
        }

        let encoded = STANDARD.encode(bytes);
        debug!(
            mime_type,
            raw_len = bytes.len(),
            encoded_len = encoded.len(),
            "Encoded image payload"
        );

        Ok(Self {
            mime_type: mime_type.to_string(),
            encoded,
            raw_len: bytes.len(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 content for inline transmission.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Size of the original payload in bytes.
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }
}
