//! Weighted account/key authorities.

use serde::{Deserialize, Serialize};

use hive_primitives::ec::PublicKey;
use hive_primitives::util::{HiveWriter, VarInt};

use crate::TransactionError;

/// A weight threshold plus the accounts and keys that count toward it.
///
/// Serializes to JSON as `{"weight_threshold": n, "account_auths":
/// [["name", w], ..], "key_auths": [["STM..", w], ..]}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    pub account_auths: Vec<(String, u16)>,
    pub key_auths: Vec<(String, u16)>,
}

impl Authority {
    /// A single-key authority with threshold 1 and weight 1.
    pub fn from_key(key: impl Into<String>) -> Self {
        Authority {
            weight_threshold: 1,
            account_auths: Vec::new(),
            key_auths: vec![(key.into(), 1)],
        }
    }

    /// Append the canonical encoding.
    ///
    /// Account auths keep their input order. Key auths are stably sorted
    /// ascending by key string before encoding; nodes reject any other
    /// order.
    pub fn write_to(&self, writer: &mut HiveWriter) -> Result<(), TransactionError> {
        writer.write_u32_le(self.weight_threshold);

        writer.write_varint(VarInt::from(self.account_auths.len()));
        for (account, weight) in &self.account_auths {
            writer.write_string(account);
            writer.write_u16_le(*weight);
        }

        let mut keys: Vec<&(String, u16)> = self.key_auths.iter().collect();
        keys.sort_by(|a, b| a.0.cmp(&b.0));

        writer.write_varint(VarInt::from(keys.len()));
        for (key, weight) in keys {
            let key = PublicKey::from_hive_string(key)?;
            writer.write_bytes(&key.to_compressed());
            writer.write_u16_le(*weight);
        }
        Ok(())
    }
}

/// Append an optional authority: `0x00` when absent, `0x01` then the
/// authority when present.
pub fn write_optional_authority(
    writer: &mut HiveWriter,
    authority: Option<&Authority>,
) -> Result<(), TransactionError> {
    writer.write_presence(authority.is_some());
    if let Some(auth) = authority {
        auth.write_to(writer)?;
    }
    Ok(())
}
