//! Hive transaction: block reference, expiration, operations, signatures.

use serde::Serialize;

use hive_primitives::ec::{CompactSignature, KeyPair, PublicKey};
use hive_primitives::util::{HiveWriter, VarInt};

use crate::asset::AssetEncoding;
use crate::operation::Operation;
use crate::signing::{digest_for_signing, transaction_id, SigningData};
use crate::timestamp::parse_timestamp;
use crate::TransactionError;

/// A transaction ready to be encoded, signed and broadcast.
///
/// # Wire format
///
/// | Field            | Size                        |
/// |------------------|-----------------------------|
/// | ref_block_num    | 2 bytes (LE)                |
/// | ref_block_prefix | 4 bytes (LE)                |
/// | expiration       | 4 bytes (LE, Unix seconds)  |
/// | op count         | VarInt                      |
/// | operations       | opcode byte + payload, each |
/// | extensions       | 1 byte, always `0x00`       |
///
/// Serializing with serde yields the broadcast JSON shape; `chain_id` and
/// `asset_encoding` are local settings and never leave the process.
///
/// Only an empty `extensions` list is encodable; anything else is rejected
/// by both the byte encoder and the broadcast JSON.
///
/// Signatures cover the encoded bytes. Changing any other field after
/// signing leaves stale signatures behind; nothing detects that.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    /// `YYYY-MM-DDTHH:MM:SS`, UTC.
    pub expiration: String,
    pub operations: Vec<Operation>,
    pub extensions: Vec<String>,
    /// Hex-encoded compact signatures, append-only.
    pub signatures: Vec<String>,
    /// Chain identifier override; `None` signs for mainnet.
    #[serde(skip)]
    pub chain_id: Option<[u8; 32]>,
    #[serde(skip)]
    pub asset_encoding: AssetEncoding,
}

impl Transaction {
    /// Build an unsigned transaction from fresh signing data.
    pub fn new(signing_data: &SigningData, operations: Vec<Operation>) -> Self {
        Transaction {
            ref_block_num: signing_data.ref_block_num,
            ref_block_prefix: signing_data.ref_block_prefix,
            expiration: signing_data.expiration.clone(),
            operations,
            ..Default::default()
        }
    }

    /// Sign for a different network.
    pub fn with_chain_id(mut self, chain_id: [u8; 32]) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn with_asset_encoding(mut self, encoding: AssetEncoding) -> Self {
        self.asset_encoding = encoding;
        self
    }

    /// Encode the transaction in canonical form (signatures excluded).
    ///
    /// # Returns
    /// The bytes that get hashed, or the first codec error encountered.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        self.check_extensions()?;
        let mut w = HiveWriter::with_capacity(64);
        w.write_u16_le(self.ref_block_num);
        w.write_u32_le(self.ref_block_prefix);
        w.write_u32_le(parse_timestamp(&self.expiration)?);
        w.write_varint(VarInt::from(self.operations.len()));
        for op in &self.operations {
            op.write_to(&mut w, self.asset_encoding)?;
        }
        // empty extensions
        w.write_u8(0);
        Ok(w.into_bytes())
    }

    /// Chain-bound digest that signatures cover.
    pub fn digest(&self) -> Result<[u8; 32], TransactionError> {
        Ok(digest_for_signing(&self.to_bytes()?, self.chain_id.as_ref()))
    }

    /// Transaction id: first 20 bytes of SHA-256 over the encoding, hex.
    pub fn id(&self) -> Result<String, TransactionError> {
        Ok(transaction_id(&self.to_bytes()?))
    }

    /// Sign the transaction and return the hex signature.
    ///
    /// The signature is not attached; pass it to [`add_signature`](Self::add_signature).
    pub fn sign(&self, key_pair: &KeyPair) -> Result<String, TransactionError> {
        let digest = self.digest()?;
        Ok(key_pair.private_key.sign_compact(&digest)?.to_hex())
    }

    /// Append a hex signature.
    pub fn add_signature(&mut self, signature: impl Into<String>) {
        self.signatures.push(signature.into());
    }

    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// Recover the public key behind every attached signature, in order.
    pub fn signer_keys(&self) -> Result<Vec<PublicKey>, TransactionError> {
        let digest = self.digest()?;
        self.signatures
            .iter()
            .map(|sig| -> Result<PublicKey, TransactionError> {
                Ok(CompactSignature::from_hex(sig)?.recover_public_key(&digest)?)
            })
            .collect()
    }

    /// JSON body for `condenser_api.broadcast_transaction`.
    ///
    /// Operations become `[name, fields]` pairs and `extensions` is always
    /// present and empty.
    pub fn to_broadcast_json(&self) -> Result<serde_json::Value, TransactionError> {
        self.check_extensions()?;
        serde_json::to_value(self).map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    fn check_extensions(&self) -> Result<(), TransactionError> {
        if self.extensions.is_empty() {
            Ok(())
        } else {
            Err(TransactionError::UnsupportedExtensions(self.extensions.len()))
        }
    }
}
