//! Hash function primitives for the Hive SDK.
//!
//! SHA-256 is used for transaction digests and ids, double SHA-256 for
//! WIF checksums, and RIPEMD-160 for public key string checksums.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-256 over several byte slices as if they were concatenated.
///
/// Avoids building an intermediate buffer when hashing a prefix
/// (such as a chain identifier) together with a message.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute double SHA-256: SHA-256(SHA-256(data)).
///
/// Used for Base58Check checksums on private keys.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute RIPEMD-160 hash of the input data.
///
/// Public key strings carry the first 4 bytes of the RIPEMD-160 of the
/// compressed key as their checksum.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DATA: &[u8] = b"I am a test";
    const TEST_DATA_2: &[u8] = b"this is the data I want to hash";

    #[test]
    fn test_sha256_empty_string() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_string() {
        assert_eq!(
            hex::encode(sha256(TEST_DATA_2)),
            "f88eec7ecabf88f9a64c4100cac1e0c0c4581100492137d1b656ea626cad63e3"
        );
    }

    #[test]
    fn test_sha256_concat_matches_single_buffer() {
        let joined = [TEST_DATA, TEST_DATA_2].concat();
        assert_eq!(sha256_concat(&[TEST_DATA, TEST_DATA_2]), sha256(&joined));
        assert_eq!(sha256_concat(&[]), sha256(b""));
    }

    #[test]
    fn test_sha256d_string() {
        assert_eq!(
            hex::encode(sha256d(TEST_DATA_2)),
            "2209ddda5914a3fbad507ff2284c4b6e559c18a669f9fc3ad3b5826a2a999d58"
        );
    }

    #[test]
    fn test_ripemd160_empty_string() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn test_ripemd160_string() {
        assert_eq!(
            hex::encode(ripemd160(TEST_DATA)),
            "09a23f506b4a37cabab8a9e49b541de582fca96b"
        );
    }
}
