/// Hive SDK - Cryptographic primitives, key codecs, and binary encoding.
///
/// This crate provides the foundational building blocks for the Hive SDK:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160)
/// - Base58 and versioned Base58Check encoding
/// - secp256k1 private keys (WIF) and public keys (`STM`-prefixed strings)
/// - Compact recoverable ECDSA signatures
/// - A little-endian binary writer with LEB128 variable-length integers

pub mod hash;
pub mod util;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
