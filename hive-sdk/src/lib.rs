#![deny(missing_docs)]

//! Hive blockchain SDK.
//!
//! Re-exports the SDK components for single-crate usage:
//!
//! * [`primitives`]: hashing, base58-check, secp256k1 keys, compact signatures
//! * [`transaction`]: operations, canonical encoding, digests, signing
//! * [`rpc`]: failover node pool and broadcasting client

pub use hive_primitives as primitives;
pub use hive_rpc as rpc;
pub use hive_transaction as transaction;

pub use hive_primitives::ec::{KeyPair, PrivateKey, PublicKey};
pub use hive_rpc::{HiveClient, NodeConfig, RpcError};
pub use hive_transaction::{Operation, Transaction};
