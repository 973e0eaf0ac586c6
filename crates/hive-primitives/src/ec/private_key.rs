//! secp256k1 private key with WIF encoding.
//!
//! Wraps a k256 signing key. Hive private keys travel as uncompressed-style
//! WIF strings: Base58Check of `0x80 || scalar` with a SHA-256d checksum.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::CompactSignature;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// WIF version byte.
pub const WIF_VERSION: u8 = 0x80;

/// Trailing flag some wallets append to mark a compressed-key WIF.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)`, or `InvalidKey` if the length is wrong or the
    /// scalar is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKey(format!(
                "expected {} private key bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|_| PrimitivesError::InvalidKey("private key scalar out of range".to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a hexadecimal scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a WIF string.
    ///
    /// Every failure, including a checksum mismatch or a wrong version
    /// byte, is reported as `InvalidKey` naming the underlying cause.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let (payload, version) = base58::check_decode(wif)
            .map_err(|e| PrimitivesError::InvalidKey(format!("malformed WIF: {}", e)))?;
        if version != WIF_VERSION {
            return Err(PrimitivesError::InvalidKey(format!(
                "unexpected WIF version byte 0x{:02x}",
                version
            )));
        }
        let key_bytes = match payload.len() {
            PRIVATE_KEY_BYTES_LEN => &payload[..],
            33 if payload[PRIVATE_KEY_BYTES_LEN] == COMPRESS_MAGIC => {
                &payload[..PRIVATE_KEY_BYTES_LEN]
            }
            n => {
                return Err(PrimitivesError::InvalidKey(format!(
                    "malformed WIF: payload length {}",
                    n
                )))
            }
        };
        Self::from_bytes(key_bytes)
    }

    /// Encode the private key as a WIF string.
    pub fn to_wif(&self) -> String {
        base58::check_encode(&self.to_bytes(), WIF_VERSION)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key().clone())
    }

    /// Produce a compact recoverable signature over a 32-byte digest.
    pub fn sign_compact(&self, digest: &[u8; 32]) -> Result<CompactSignature, PrimitivesError> {
        CompactSignature::sign(digest, self)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}
