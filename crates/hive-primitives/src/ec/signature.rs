//! Compact recoverable ECDSA signatures.
//!
//! Layout: `header || r || s`, 65 bytes. The header is `27 + 4 + recid`,
//! the `+4` marking a compressed public key. Nonces are RFC6979 and `s`
//! is always in the lower half of the curve order.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{self, RecoveryId, VerifyingKey};
use std::fmt;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a compact signature in bytes.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// Base value of the header byte.
const HEADER_BASE: u8 = 27;

/// Header offset flagging a compressed public key.
const COMPRESSED_FLAG: u8 = 4;

/// A 65-byte compact signature carrying its recovery id.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CompactSignature([u8; COMPACT_SIGNATURE_LEN]);

impl CompactSignature {
    /// Sign a 32-byte digest.
    ///
    /// Deterministic: the same key and digest always produce the same bytes.
    pub fn sign(digest: &[u8; 32], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let (sig, recovery_id) = priv_key
            .signing_key()
            .sign_prehash_recoverable(digest)
            .map_err(|e| PrimitivesError::SigningError(e.to_string()))?;

        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[0] = HEADER_BASE + COMPRESSED_FLAG + recovery_id.to_byte();
        let (r, s) = sig.split_bytes();
        out[1..33].copy_from_slice(&r);
        out[33..65].copy_from_slice(&s);
        Ok(CompactSignature(out))
    }

    /// Parse a compact signature from raw bytes.
    ///
    /// # Returns
    /// `InvalidSignature` if the length is not 65 or the header byte is
    /// outside `27..=34`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} signature bytes, got {}",
                COMPACT_SIGNATURE_LEN,
                bytes.len()
            )));
        }
        if !(HEADER_BASE..HEADER_BASE + 8).contains(&bytes[0]) {
            return Err(PrimitivesError::InvalidSignature(format!(
                "invalid header byte {}",
                bytes[0]
            )));
        }
        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out.copy_from_slice(bytes);
        Ok(CompactSignature(out))
    }

    /// Parse a hex-encoded compact signature.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> [u8; COMPACT_SIGNATURE_LEN] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex of all 65 bytes, the form carried in `signatures`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The recovery id encoded in the header (0..=3).
    pub fn recovery_id(&self) -> u8 {
        (self.0[0] - HEADER_BASE) & 0x03
    }

    /// Recover the public key that produced this signature over `digest`.
    pub fn recover_public_key(&self, digest: &[u8; 32]) -> Result<PublicKey, PrimitivesError> {
        let recovery_id = RecoveryId::from_byte(self.recovery_id())
            .ok_or_else(|| PrimitivesError::InvalidSignature("invalid recovery id".to_string()))?;
        let recovered = VerifyingKey::recover_from_prehash(digest, &self.k256_signature()?, recovery_id)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(PublicKey::from_verifying_key(recovered))
    }

    /// Check the signature against a digest and public key.
    pub fn verify(&self, digest: &[u8; 32], pub_key: &PublicKey) -> bool {
        match self.k256_signature() {
            Ok(sig) => pub_key.verifying_key().verify_prehash(digest, &sig).is_ok(),
            Err(_) => false,
        }
    }

    fn k256_signature(&self) -> Result<ecdsa::Signature, PrimitivesError> {
        ecdsa::Signature::from_scalars(
            *k256::FieldBytes::from_slice(&self.0[1..33]),
            *k256::FieldBytes::from_slice(&self.0[33..65]),
        )
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))
    }
}

impl fmt::Debug for CompactSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactSignature({})", self.to_hex())
    }
}

impl fmt::Display for CompactSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
