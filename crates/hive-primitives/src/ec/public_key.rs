//! secp256k1 public key with Hive string encoding.
//!
//! A public key string is a network prefix (`STM` on mainnet) followed by
//! Base58 of `compressed_key || ripemd160(compressed_key)[..4]`.

use k256::ecdsa::VerifyingKey;
use std::fmt;
use std::str::FromStr;

use crate::base58;
use crate::hash::ripemd160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes.
pub const COMPRESSED_LEN: usize = 33;

/// Network prefix used by mainnet public key strings.
pub const PUBLIC_KEY_PREFIX: &str = "STM";

/// Length of the trailing RIPEMD-160 checksum in a public key string.
const KEY_CHECKSUM_LEN: usize = 4;

/// A secp256k1 public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a public key from SEC1 bytes (compressed or uncompressed).
    ///
    /// # Returns
    /// `Ok(PublicKey)`, or `InvalidKey` if the bytes are not a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidKey("public key bytes are empty".to_string()));
        }
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|_| PrimitivesError::InvalidKey("point is not on the curve".to_string()))?;
        Ok(PublicKey { inner })
    }

    /// Parse a mainnet (`STM`) public key string.
    pub fn from_hive_string(s: &str) -> Result<Self, PrimitivesError> {
        Self::from_prefixed_string(s, PUBLIC_KEY_PREFIX)
    }

    /// Parse a public key string carrying the given network prefix.
    ///
    /// Fails with `InvalidKey` on a missing prefix, undecodable Base58,
    /// wrong length, checksum mismatch, or a point not on the curve.
    pub fn from_prefixed_string(s: &str, prefix: &str) -> Result<Self, PrimitivesError> {
        let encoded = s.strip_prefix(prefix).ok_or_else(|| {
            PrimitivesError::InvalidKey(format!("public key {:?} does not start with {}", s, prefix))
        })?;
        let decoded = base58::decode(encoded)
            .map_err(|e| PrimitivesError::InvalidKey(format!("public key {:?}: {}", s, e)))?;
        if decoded.len() != COMPRESSED_LEN + KEY_CHECKSUM_LEN {
            return Err(PrimitivesError::InvalidKey(format!(
                "public key {:?}: decoded {} bytes, expected {}",
                s,
                decoded.len(),
                COMPRESSED_LEN + KEY_CHECKSUM_LEN
            )));
        }
        let (key, sum) = decoded.split_at(COMPRESSED_LEN);
        if sum != &ripemd160(key)[..KEY_CHECKSUM_LEN] {
            return Err(PrimitivesError::InvalidKey(format!(
                "public key {:?}: checksum mismatch",
                s
            )));
        }
        Self::from_bytes(key)
    }

    /// Encode as a mainnet public key string.
    pub fn to_hive_string(&self) -> String {
        self.to_prefixed_string(PUBLIC_KEY_PREFIX)
    }

    /// Encode as a public key string with the given network prefix.
    pub fn to_prefixed_string(&self, prefix: &str) -> String {
        let key = self.to_compressed();
        let sum = ripemd160(&key);
        let mut data = Vec::with_capacity(COMPRESSED_LEN + KEY_CHECKSUM_LEN);
        data.extend_from_slice(&key);
        data.extend_from_slice(&sum[..KEY_CHECKSUM_LEN]);
        format!("{}{}", prefix, base58::encode(&data))
    }

    /// Serialize in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the compressed key as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    pub(crate) fn from_verifying_key(inner: VerifyingKey) -> Self {
        PublicKey { inner }
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl FromStr for PublicKey {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hive_string(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hive_string())
    }
}
