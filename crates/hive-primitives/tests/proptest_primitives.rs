use proptest::prelude::*;

use hive_primitives::base58;
use hive_primitives::ec::private_key::PrivateKey;
use hive_primitives::ec::public_key::PublicKey;
use hive_primitives::hash::sha256;
use hive_primitives::util::VarInt;
use hive_primitives::PrimitivesError;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn private_key_wif_and_public_key_string_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        // Not every 32-byte array is a valid scalar.
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let wif = pk.to_wif();
            prop_assert!(wif.starts_with('5'));
            let pk2 = PrivateKey::from_wif(&wif).unwrap();
            prop_assert_eq!(pk.to_hex(), pk2.to_hex());

            let pub_str = pk.pub_key().to_hive_string();
            prop_assert!(pub_str.starts_with("STM"));
            let parsed = PublicKey::from_hive_string(&pub_str).unwrap();
            prop_assert_eq!(parsed, pk.pub_key());
        }
    }

    #[test]
    fn compact_signature_recovers_signer(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let sig = pk.sign_compact(&digest).unwrap();
            prop_assert!((31..=34).contains(&sig.to_bytes()[0]));
            prop_assert_eq!(sig.recover_public_key(&digest).unwrap(), pk.pub_key());
        }
    }

    #[test]
    fn check_decode_inverts_check_encode(
        payload in prop::collection::vec(any::<u8>(), 1..64),
        version in any::<u8>()
    ) {
        let encoded = base58::check_encode(&payload, version);
        let (decoded, v) = base58::check_decode(&encoded).unwrap();
        prop_assert_eq!(decoded, payload);
        prop_assert_eq!(v, version);
    }

    #[test]
    fn check_decode_detects_single_byte_flip(
        payload in prop::collection::vec(any::<u8>(), 1..64),
        pos in any::<prop::sample::Index>(),
        flip in 1u8..=255
    ) {
        let mut raw = base58::decode(&base58::check_encode(&payload, 0x80)).unwrap();
        let i = pos.index(raw.len());
        raw[i] ^= flip;
        let result = base58::check_decode(&base58::encode(&raw));
        prop_assert!(matches!(result, Err(PrimitivesError::ChecksumMismatch)));
    }

    #[test]
    fn varint_length_matches_encoding(v in any::<u64>()) {
        let vi = VarInt(v);
        let bytes = vi.to_bytes();
        prop_assert_eq!(bytes.len(), vi.length());
        prop_assert!(bytes[..bytes.len() - 1].iter().all(|b| b & 0x80 != 0));
        prop_assert_eq!(bytes[bytes.len() - 1] & 0x80, 0);
    }
}
