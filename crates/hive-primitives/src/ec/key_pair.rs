//! Private key bundled with its derived public key.

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// A private key and its public key, derived once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Build a key pair from a private key.
    pub fn new(private_key: PrivateKey) -> Self {
        let public_key = private_key.pub_key();
        KeyPair { private_key, public_key }
    }

    /// Decode a WIF string into a key pair.
    ///
    /// # Returns
    /// `InvalidKey` if the WIF is malformed (bad Base58, checksum or version).
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        Ok(Self::new(PrivateKey::from_wif(wif)?))
    }

    /// Generate a fresh random key pair.
    pub fn random() -> Self {
        Self::new(PrivateKey::new())
    }
}

impl From<PrivateKey> for KeyPair {
    fn from(private_key: PrivateKey) -> Self {
        Self::new(private_key)
    }
}
