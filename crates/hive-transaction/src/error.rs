/// Error types for operation encoding, transaction assembly and signing.
///
/// Codec errors name the offending value so a caller can find the bad field.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// An asset string is not `<decimal> <SYMBOL>` or its amount is not numeric.
    #[error("invalid asset {0}")]
    InvalidAsset(String),
    /// A timestamp does not match `YYYY-MM-DDTHH:MM:SS` or is outside the u32 range.
    #[error("invalid timestamp {0}")]
    InvalidTimestamp(String),
    /// An operation name has no assigned opcode.
    #[error("unknown operation {0:?}")]
    UnknownOperation(String),
    /// A raw broadcast was attempted with no signatures attached.
    #[error("transaction is not signed")]
    UnsignedTransaction,
    /// A chain identifier is not 32 hex-encoded bytes.
    #[error("invalid chain id: {0}")]
    InvalidChainId(String),
    /// Chain state could not be turned into block-reference fields.
    #[error("invalid signing data: {0}")]
    InvalidSigningData(String),
    /// A name list is longer than its one-byte wire count allows.
    #[error("{field}: {count} entries exceed the one-byte count")]
    TooManyEntries {
        /// Operation field holding the list.
        field: &'static str,
        /// Number of entries supplied.
        count: usize,
    },
    /// Transaction extensions are present; only an empty list can be encoded.
    #[error("{0} transaction extensions given, only an empty list is encodable")]
    UnsupportedExtensions(usize),
    /// The transaction could not be rendered as JSON.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// An underlying primitives error (forwarded from `hive-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] hive_primitives::PrimitivesError),
}
