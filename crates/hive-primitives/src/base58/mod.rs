//! Base58 encoding and versioned Base58Check encoding.
//!
//! Base58Check here is the WIF layout: `version || payload || checksum`,
//! where the checksum is the first 4 bytes of SHA-256d(version || payload).

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Number of checksum bytes appended by Base58Check.
pub const CHECKSUM_LEN: usize = 4;

/// Smallest decoded input accepted by [`check_decode`]: one version byte,
/// at least one payload byte, and the checksum.
const MIN_CHECK_DECODED_LEN: usize = 1 + 1 + CHECKSUM_LEN;

/// Encode a byte slice to a Base58 string using the Bitcoin alphabet.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or `DecodeError` for characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::DecodeError(e.to_string()))
}

/// Compute the 4-byte Base58Check checksum of `data`.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = sha256d(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

/// Encode `payload` under `version` with a trailing checksum.
///
/// # Arguments
/// * `payload` - The bytes to encode (without version byte).
/// * `version` - The version byte prepended before encoding.
///
/// # Returns
/// The Base58 string of `version || payload || checksum`.
pub fn check_encode(payload: &[u8], version: u8) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);
    let sum = checksum(&data);
    data.extend_from_slice(&sum);
    encode(&data)
}

/// Decode a Base58Check string, verifying the trailing checksum.
///
/// # Returns
/// `Ok((payload, version))` with version and checksum stripped,
/// `DecodeError` if the input is not Base58 or decodes to fewer than
/// 6 bytes, or `ChecksumMismatch` if the checksum does not verify.
pub fn check_decode(s: &str) -> Result<(Vec<u8>, u8), PrimitivesError> {
    let decoded = decode(s)?;
    if decoded.len() < MIN_CHECK_DECODED_LEN {
        return Err(PrimitivesError::DecodeError(format!(
            "version and/or checksum bytes missing: decoded {} bytes",
            decoded.len()
        )));
    }
    let (data, sum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    if sum != checksum(data) {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok((data[1..].to_vec(), data[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_empty_string() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_base58_leading_zeros() {
        let input = hex::decode("000000287FB4CD").unwrap();
        assert_eq!(encode(&input), "111233QC4");
        assert_eq!(decode("111233QC4").unwrap(), input);
    }

    #[test]
    fn test_base58_decoded_hash() {
        let input = hex::decode("0123456789ABCDEF").unwrap();
        assert_eq!(encode(&input), "C3CPq7c8PY");
        assert_eq!(decode("C3CPq7c8PY").unwrap(), input);
    }

    #[test]
    fn test_base58_decode_invalid_character() {
        assert!(matches!(
            decode("invalid!@#$%"),
            Err(PrimitivesError::DecodeError(_))
        ));
        // '0', 'O', 'I' and 'l' are not in the alphabet
        assert!(decode("0OIl").is_err());
    }

    #[test]
    fn test_check_roundtrip_wif_payload() {
        let payload =
            hex::decode("0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d").unwrap();
        let encoded = check_encode(&payload, 0x80);
        assert_eq!(encoded, "5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ");
        let (decoded, version) = check_decode(&encoded).unwrap();
        assert_eq!(decoded, payload);
        assert_eq!(version, 0x80);
    }

    #[test]
    fn test_check_decode_too_short() {
        // five bytes decode fine as base58 but are below the minimum
        let short = encode(&[0x80, 1, 2, 3, 4]);
        assert!(matches!(
            check_decode(&short),
            Err(PrimitivesError::DecodeError(_))
        ));
    }

    #[test]
    fn test_check_decode_bad_checksum() {
        let payload = vec![0x01, 0x02, 0x03];
        let encoded = check_encode(&payload, 0x80);
        let mut raw = decode(&encoded).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        assert!(matches!(
            check_decode(&encode(&raw)),
            Err(PrimitivesError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_check_decode_corrupted_payload_byte() {
        let payload = vec![0xaa; 32];
        let mut raw = decode(&check_encode(&payload, 0x80)).unwrap();
        raw[5] ^= 0xff;
        assert!(matches!(
            check_decode(&encode(&raw)),
            Err(PrimitivesError::ChecksumMismatch)
        ));
    }
}
