//! Error types for node pool and client operations.

use hive_primitives::PrimitivesError;
use hive_transaction::TransactionError;

/// Errors that can occur when talking to Hive API nodes.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Every endpoint in the rotation was tried once and none succeeded.
    #[error("all API nodes failed ({attempts} tried, last error: {last_error})")]
    AllNodesFailed {
        /// Endpoints attempted during the call.
        attempts: usize,
        /// Reason the final endpoint was rejected.
        last_error: String,
    },

    /// The pool was built without endpoints.
    #[error("no API endpoints configured")]
    NoEndpoints,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error ({code}): {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the node.
        message: String,
    },

    /// The node answered without a result.
    #[error("empty result")]
    EmptyResult,

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be parsed or is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The requested call is not supported by this client.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// The node returned no account under the given name.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Building or signing the transaction failed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Key decoding failed.
    #[error(transparent)]
    Primitives(#[from] PrimitivesError),
}
