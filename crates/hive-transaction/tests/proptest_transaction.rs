use proptest::prelude::*;

use hive_primitives::ec::KeyPair;
use hive_transaction::asset::{Asset, AssetEncoding};
use hive_transaction::authority::Authority;
use hive_transaction::operation::{CustomJsonOperation, TransferOperation, VoteOperation};
use hive_transaction::{Operation, Transaction};

const KEYS: [&str; 4] = [
    "STM4y4wdy4eNBVBzXAXEp5SSrXEQMqBstDu6TvMGN1aUz19zAruow",
    "STM6e1heeScT5oj8AsYKdRGfYcqiqbiZkpWY8qL3uuHZY4mLPjiYb",
    "STM8VPjfDcioxjkc5dRK8oi4jiyKagEZmvL9pCmmm4M9utkFh2SbK",
    "STM6n4WcwyiC63udKYR8jDFuzG9T48dhy2Qb5sVmQ9MyNuKM7xE29",
];

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.-]{2,15}"
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (arb_name(), arb_name(), "[a-z0-9-]{1,40}", -10000i16..=10000).prop_map(
            |(voter, author, permlink, weight)| {
                Operation::from(VoteOperation { voter, author, permlink, weight })
            }
        ),
        (arb_name(), arb_name(), 0u32..1_000_000, 0u32..1000, any::<bool>(), ".{0,64}").prop_map(
            |(from, to, whole, frac, hbd, memo)| {
                let symbol = if hbd { "HBD" } else { "HIVE" };
                Operation::from(TransferOperation {
                    from,
                    to,
                    amount: format!("{}.{:03} {}", whole, frac, symbol),
                    memo,
                })
            }
        ),
        (prop::collection::vec(arb_name(), 0..3), arb_name(), ".{0,200}").prop_map(
            |(posting, id, json)| {
                Operation::from(CustomJsonOperation {
                    required_auths: vec![],
                    required_posting_auths: posting,
                    id,
                    json,
                })
            }
        ),
    ]
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        any::<u16>(),
        any::<u32>(),
        0u32..2_000_000_000,
        prop::collection::vec(arb_operation(), 1..5),
    )
        .prop_map(|(ref_block_num, ref_block_prefix, secs, operations)| {
            let expiration = chrono::DateTime::from_timestamp(i64::from(secs), 0)
                .unwrap()
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string();
            Transaction {
                ref_block_num,
                ref_block_prefix,
                expiration,
                operations,
                ..Default::default()
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn header_fields_are_little_endian(tx in arb_transaction()) {
        let bytes = tx.to_bytes().unwrap();
        prop_assert_eq!(&bytes[0..2], &tx.ref_block_num.to_le_bytes()[..]);
        prop_assert_eq!(&bytes[2..6], &tx.ref_block_prefix.to_le_bytes()[..]);
        prop_assert_eq!(bytes[10] as usize, tx.operations.len());
        prop_assert_eq!(*bytes.last().unwrap(), 0u8);
    }

    #[test]
    fn transaction_bytes_are_header_then_operations(tx in arb_transaction()) {
        let bytes = tx.to_bytes().unwrap();
        let mut expected = bytes[..11].to_vec();
        for op in &tx.operations {
            expected.extend(op.to_bytes(AssetEncoding::Legacy).unwrap());
        }
        expected.push(0);
        prop_assert_eq!(bytes, expected);
    }

    #[test]
    fn signature_recovers_signer(tx in arb_transaction(), seed in prop::array::uniform32(any::<u8>())) {
        if let Ok(pk) = hive_primitives::ec::PrivateKey::from_bytes(&seed) {
            let pair = KeyPair::new(pk);
            let mut tx = tx;
            let sig = tx.sign(&pair).unwrap();
            tx.add_signature(sig);
            prop_assert_eq!(tx.signer_keys().unwrap(), vec![pair.public_key.clone()]);
            prop_assert_eq!(tx.id().unwrap().len(), 40);
        }
    }

    #[test]
    fn key_auth_order_does_not_change_bytes(
        order in Just((0..KEYS.len()).collect::<Vec<_>>()).prop_shuffle(),
        threshold in 1u32..5
    ) {
        let reference = Authority {
            weight_threshold: threshold,
            account_auths: vec![],
            key_auths: KEYS.iter().map(|k| (k.to_string(), 1)).collect(),
        };
        let shuffled = Authority {
            key_auths: order.iter().map(|&i| (KEYS[i].to_string(), 1)).collect(),
            ..reference.clone()
        };
        let mut a = hive_primitives::util::HiveWriter::new();
        let mut b = hive_primitives::util::HiveWriter::new();
        reference.write_to(&mut a).unwrap();
        shuffled.write_to(&mut b).unwrap();
        prop_assert_eq!(a.into_bytes(), b.into_bytes());
    }

    #[test]
    fn asset_amount_scales_by_precision(whole in 0i64..1_000_000_000, frac in 0i64..1000) {
        let asset = Asset::parse(&format!("{}.{:03} HIVE", whole, frac)).unwrap();
        prop_assert_eq!(asset.amount, whole * 1000 + frac);
        let vests = Asset::parse(&format!("{}.{:03} VESTS", whole, frac)).unwrap();
        prop_assert_eq!(vests.amount, (whole * 1000 + frac) * 1000);
    }
}
