//! Chain-bound digests, transaction ids, and block-reference data.
//!
//! The signed digest is `sha256(chain_id || tx_bytes)`, so a signature
//! made for one network never verifies on another. The transaction id is
//! `sha256(tx_bytes)` truncated to 20 bytes and is not chain-bound.

use hive_primitives::ec::{CompactSignature, KeyPair};
use hive_primitives::hash::{sha256, sha256_concat};
use hive_primitives::PrimitivesError;

use crate::timestamp::add_seconds;
use crate::TransactionError;

/// Mainnet chain identifier.
pub const DEFAULT_CHAIN_ID: [u8; 32] = [
    0xbe, 0xea, 0xb0, 0xde, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0,
];

/// Seconds between the chain head time and a new transaction's expiration.
pub const EXPIRATION_SECONDS: i64 = 30;

/// Bytes of the SHA-256 kept in a transaction id.
const TX_ID_LEN: usize = 20;

/// Parse a hex chain identifier.
///
/// # Returns
/// `InvalidChainId` unless the input is exactly 32 hex-encoded bytes.
pub fn parse_chain_id(hex_str: &str) -> Result<[u8; 32], TransactionError> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| TransactionError::InvalidChainId(format!("{:?}: {}", hex_str, e)))?;
    bytes.as_slice().try_into().map_err(|_| {
        TransactionError::InvalidChainId(format!(
            "{:?}: expected 32 bytes, got {}",
            hex_str,
            bytes.len()
        ))
    })
}

/// Digest to sign: SHA-256 over the chain id followed by the serialized
/// transaction. `None` selects [`DEFAULT_CHAIN_ID`].
pub fn digest_for_signing(tx_bytes: &[u8], chain_id: Option<&[u8; 32]>) -> [u8; 32] {
    let chain_id = chain_id.unwrap_or(&DEFAULT_CHAIN_ID);
    sha256_concat(&[&chain_id[..], tx_bytes])
}

/// 40-character hex id of a serialized transaction.
pub fn transaction_id(tx_bytes: &[u8]) -> String {
    hex::encode(&sha256(tx_bytes)[..TX_ID_LEN])
}

/// Sign a digest with a WIF-encoded private key.
///
/// An undecodable key is a `SigningError` carrying the decode failure.
pub fn sign_digest(digest: &[u8; 32], wif: &str) -> Result<CompactSignature, TransactionError> {
    let pair = KeyPair::from_wif(wif)
        .map_err(|e| PrimitivesError::SigningError(format!("invalid signing key: {}", e)))?;
    Ok(pair.private_key.sign_compact(digest)?)
}

/// Block reference and expiration for a transaction about to be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningData {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: String,
}

impl SigningData {
    /// Derive signing data from the chain head.
    ///
    /// * `ref_block_num` is the low 16 bits of `head_block_number`.
    /// * `ref_block_prefix` is the little-endian u32 at byte 4 of the
    ///   decoded `head_block_id`.
    /// * `expiration` is `time` plus [`EXPIRATION_SECONDS`].
    pub fn from_chain_head(
        head_block_number: u64,
        head_block_id: &str,
        time: &str,
    ) -> Result<Self, TransactionError> {
        let id = hex::decode(head_block_id).map_err(|e| {
            TransactionError::InvalidSigningData(format!("head_block_id {:?}: {}", head_block_id, e))
        })?;
        let prefix: [u8; 4] = id
            .get(4..8)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                TransactionError::InvalidSigningData(format!(
                    "head_block_id {:?}: need at least 8 bytes, got {}",
                    head_block_id,
                    id.len()
                ))
            })?;

        Ok(SigningData {
            ref_block_num: (head_block_number & 0xffff) as u16,
            ref_block_prefix: u32::from_le_bytes(prefix),
            expiration: add_seconds(time, EXPIRATION_SECONDS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_WIF: &str = "5JuMt237G3m3BaT7zH4YdoycUtbw4AEPy6DLdCrKAnFGAtXyQ1W";
    const CUSTOM_CHAIN_ID: &str = "1234567800000000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_default_chain_id_hex() {
        assert_eq!(
            hex::encode(DEFAULT_CHAIN_ID),
            "beeab0de00000000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(parse_chain_id(&hex::encode(DEFAULT_CHAIN_ID)).unwrap(), DEFAULT_CHAIN_ID);
    }

    #[test]
    fn test_parse_chain_id_rejects_bad_input() {
        assert!(matches!(parse_chain_id("beeab0de"), Err(TransactionError::InvalidChainId(_))));
        assert!(matches!(parse_chain_id("zz"), Err(TransactionError::InvalidChainId(_))));
        assert!(parse_chain_id("").is_err());
    }

    #[test]
    fn test_digest_binds_chain_id() {
        let tx = b"some transaction bytes";
        let custom = parse_chain_id(CUSTOM_CHAIN_ID).unwrap();
        assert_eq!(digest_for_signing(tx, None), digest_for_signing(tx, Some(&DEFAULT_CHAIN_ID)));
        assert_ne!(digest_for_signing(tx, None), digest_for_signing(tx, Some(&custom)));
        assert_eq!(
            digest_for_signing(tx, None),
            sha256(&[&DEFAULT_CHAIN_ID[..], &tx[..]].concat())
        );
    }

    #[test]
    fn test_transaction_id_is_40_hex_chars() {
        let id = transaction_id(b"");
        assert_eq!(id, "e3b0c44298fc1c149afbf4c8996fb92427ae41e4");
    }

    #[test]
    fn test_sign_digest_recovers_to_wif_key() {
        let digest = digest_for_signing(b"payload", None);
        let sig = sign_digest(&digest, TEST_WIF).unwrap();
        let pair = KeyPair::from_wif(TEST_WIF).unwrap();
        assert_eq!(sig.recover_public_key(&digest).unwrap(), pair.public_key);
    }

    #[test]
    fn test_sign_digest_bad_wif() {
        match sign_digest(&[0u8; 32], "5Jbad") {
            Err(TransactionError::Primitives(PrimitivesError::SigningError(msg))) => {
                assert!(msg.starts_with("invalid signing key: "), "{}", msg);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            KeyPair::from_wif("5Jbad"),
            Err(PrimitivesError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_signing_data_from_chain_head() {
        let data = SigningData::from_chain_head(
            0x0123_4567,
            "01234567deadbeef00000000000000000000000000",
            "2024-03-01T10:00:00",
        )
        .unwrap();
        assert_eq!(data.ref_block_num, 0x4567);
        assert_eq!(data.ref_block_prefix, u32::from_le_bytes([0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(data.expiration, "2024-03-01T10:00:30");
    }

    #[test]
    fn test_signing_data_rejects_short_block_id() {
        assert!(matches!(
            SigningData::from_chain_head(1, "01234567dead", "2024-03-01T10:00:00"),
            Err(TransactionError::InvalidSigningData(_))
        ));
        assert!(matches!(
            SigningData::from_chain_head(1, "not hex", "2024-03-01T10:00:00"),
            Err(TransactionError::InvalidSigningData(_))
        ));
        assert!(matches!(
            SigningData::from_chain_head(1, "01234567deadbeef", "yesterday"),
            Err(TransactionError::InvalidTimestamp(_))
        ));
    }
}
