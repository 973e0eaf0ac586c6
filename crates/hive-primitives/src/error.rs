/// Unified error type for all primitives operations.
///
/// Covers errors from base58 decoding, key parsing, and signing.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("decode error: {0}")]
    DecodeError(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("encode error: {0}")]
    EncodeError(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
