//! Payload codec errors.

/// Error returned by [`encode`](crate::encode) and [`decode`](crate::decode).
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// Input is not valid URL-safe base64.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] base64::DecodeError),
    /// Base64 decoded but the bytes are not a valid zlib stream.
    #[error("corrupt compressed stream: {0}")]
    CorruptStream(#[source] std::io::Error),
    /// Input looks like a URL but no payload can be extracted from it.
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },
    /// Decompressed payload is not UTF-8 text.
    #[error("decoded payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// Compressor failed while encoding.
    #[error("compression failed: {0}")]
    Compress(String),
}

impl From<flate2::CompressError> for PayloadError {
    fn from(err: flate2::CompressError) -> Self {
        Self::Compress(err.to_string())
    }
}
