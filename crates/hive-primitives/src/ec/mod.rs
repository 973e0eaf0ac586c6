/// Elliptic curve cryptography on secp256k1.
///
/// Provides WIF private keys, `STM`-prefixed public keys, key pairs,
/// and compact recoverable ECDSA signatures.

pub mod private_key;
pub mod public_key;
pub mod key_pair;
pub mod signature;

pub use key_pair::KeyPair;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::CompactSignature;
