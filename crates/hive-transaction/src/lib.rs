/// Hive SDK - Operations, canonical serialization, and transaction signing.
///
/// Provides the operation catalogue with its opcode table, asset and
/// authority encoders, the `Transaction` type with chain-bound digests
/// and transaction ids, and block-reference signing data.

pub mod asset;
pub mod authority;
pub mod operation;
pub mod signing;
pub mod timestamp;
pub mod transaction;

mod error;
pub use asset::{Asset, AssetEncoding};
pub use authority::Authority;
pub use error::TransactionError;
pub use operation::{opcode_for_name, Operation};
pub use signing::{digest_for_signing, sign_digest, transaction_id, SigningData, DEFAULT_CHAIN_ID};
pub use transaction::Transaction;
