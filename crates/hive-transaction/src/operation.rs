//! Operations and their canonical encoders.
//!
//! Each operation is written as a one-byte opcode followed by its fields
//! in declaration order. The field order below is part of the consensus
//! format; reordering a struct field changes the bytes that get signed.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};

use hive_primitives::ec::PublicKey;
use hive_primitives::util::HiveWriter;

use crate::asset::{write_asset, AssetEncoding};
use crate::authority::{write_optional_authority, Authority};
use crate::TransactionError;

/// Network operation names indexed by opcode.
///
/// Append-only: an opcode never changes once assigned.
pub static OPERATION_NAMES: [&str; 50] = [
    "vote",
    "comment",
    "transfer",
    "transfer_to_vesting",
    "withdraw_vesting",
    "limit_order_create",
    "limit_order_cancel",
    "feed_publish",
    "convert",
    "account_create",
    "account_update",
    "witness_update",
    "account_witness_vote",
    "account_witness_proxy",
    "pow",
    "custom",
    "report_over_production",
    "delete_comment",
    "custom_json",
    "comment_options",
    "set_withdraw_vesting_route",
    "limit_order_create2",
    "claim_account",
    "create_claimed_account",
    "request_account_recovery",
    "recover_account",
    "change_recovery_account",
    "escrow_transfer",
    "escrow_dispute",
    "escrow_release",
    "pow2",
    "escrow_approve",
    "transfer_to_savings",
    "transfer_from_savings",
    "cancel_transfer_from_savings",
    "custom_binary",
    "decline_voting_rights",
    "reset_account",
    "set_reset_account",
    "claim_reward_balance",
    "delegate_vesting_shares",
    "account_create_with_delegation",
    "witness_set_properties",
    "account_update2",
    "create_proposal",
    "update_proposal_votes",
    "remove_proposal",
    "update_proposal",
    "collateralized_convert",
    "recurrent_transfer",
];

/// Look up the opcode for an operation name.
///
/// Accepts both `"vote"` and `"vote_operation"`.
pub fn opcode_for_name(name: &str) -> Result<u8, TransactionError> {
    let short = name.strip_suffix("_operation").unwrap_or(name);
    OPERATION_NAMES
        .iter()
        .position(|n| *n == short)
        .map(|i| i as u8)
        .ok_or_else(|| TransactionError::UnknownOperation(name.to_string()))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOperation {
    pub voter: String,
    pub author: String,
    pub permlink: String,
    /// Basis points, -10000..=10000.
    pub weight: i16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub memo: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomJsonOperation {
    pub required_auths: Vec<String>,
    pub required_posting_auths: Vec<String>,
    pub id: String,
    pub json: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateOperation {
    pub fee: String,
    pub creator: String,
    pub new_account_name: String,
    pub owner: Authority,
    pub active: Authority,
    pub posting: Authority,
    pub memo_key: String,
    pub json_metadata: String,
}

/// Authority changes on this operation have not been checked against a
/// live node; only the all-`None` shape is covered by fixtures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posting: Option<Authority>,
    pub memo_key: String,
    pub json_metadata: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRewardBalanceOperation {
    pub account: String,
    pub reward_hive: String,
    pub reward_hbd: String,
    pub reward_vests: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAccountOperation {
    pub creator: String,
    pub fee: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferToSavingsOperation {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub memo: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFromSavingsOperation {
    pub from: String,
    pub request_id: u32,
    pub to: String,
    pub amount: String,
    pub memo: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTransferFromSavingsOperation {
    pub from: String,
    pub request_id: u32,
}

/// The operations this library can encode.
///
/// Serializes to JSON as the `[name, fields]` pair nodes expect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Vote(VoteOperation),
    Transfer(TransferOperation),
    AccountCreate(AccountCreateOperation),
    AccountUpdate(AccountUpdateOperation),
    CustomJson(CustomJsonOperation),
    ClaimAccount(ClaimAccountOperation),
    TransferToSavings(TransferToSavingsOperation),
    TransferFromSavings(TransferFromSavingsOperation),
    CancelTransferFromSavings(CancelTransferFromSavingsOperation),
    ClaimRewardBalance(ClaimRewardBalanceOperation),
}

impl Operation {
    /// Network name, e.g. `"custom_json"`.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Vote(_) => "vote",
            Operation::Transfer(_) => "transfer",
            Operation::AccountCreate(_) => "account_create",
            Operation::AccountUpdate(_) => "account_update",
            Operation::CustomJson(_) => "custom_json",
            Operation::ClaimAccount(_) => "claim_account",
            Operation::TransferToSavings(_) => "transfer_to_savings",
            Operation::TransferFromSavings(_) => "transfer_from_savings",
            Operation::CancelTransferFromSavings(_) => "cancel_transfer_from_savings",
            Operation::ClaimRewardBalance(_) => "claim_reward_balance",
        }
    }

    /// Opcode looked up from [`OPERATION_NAMES`] by the variant's name.
    pub(crate) fn opcode(&self) -> Result<u8, TransactionError> {
        opcode_for_name(self.name())
    }

    /// Append the opcode and payload.
    ///
    /// # Returns
    /// `InvalidAsset` for a malformed amount, `Primitives(InvalidKey)`
    /// for an unparseable public key and `TooManyEntries` for a name list
    /// longer than 255. Nothing is retried.
    pub fn write_to(
        &self,
        w: &mut HiveWriter,
        encoding: AssetEncoding,
    ) -> Result<(), TransactionError> {
        w.write_u8(self.opcode()?);
        match self {
            Operation::Vote(op) => {
                w.write_string(&op.voter);
                w.write_string(&op.author);
                w.write_string(&op.permlink);
                w.write_i16_le(op.weight);
            }
            Operation::Transfer(op) => {
                w.write_string(&op.from);
                w.write_string(&op.to);
                write_asset(w, &op.amount, encoding)?;
                w.write_string(&op.memo);
            }
            Operation::AccountCreate(op) => {
                write_asset(w, &op.fee, encoding)?;
                w.write_string(&op.creator);
                w.write_string(&op.new_account_name);
                op.owner.write_to(w)?;
                op.active.write_to(w)?;
                op.posting.write_to(w)?;
                write_public_key(w, &op.memo_key)?;
                w.write_string(&op.json_metadata);
            }
            Operation::AccountUpdate(op) => {
                w.write_string(&op.account);
                write_optional_authority(w, op.owner.as_ref())?;
                write_optional_authority(w, op.active.as_ref())?;
                write_optional_authority(w, op.posting.as_ref())?;
                write_public_key(w, &op.memo_key)?;
                w.write_string(&op.json_metadata);
            }
            Operation::CustomJson(op) => {
                write_name_list(w, "required_auths", &op.required_auths)?;
                write_name_list(w, "required_posting_auths", &op.required_posting_auths)?;
                w.write_string(&op.id);
                w.write_string(&op.json);
            }
            Operation::ClaimAccount(op) => {
                w.write_string(&op.creator);
                write_asset(w, &op.fee, encoding)?;
                // empty extensions
                w.write_u8(0);
            }
            Operation::TransferToSavings(op) => {
                w.write_string(&op.from);
                w.write_string(&op.to);
                write_asset(w, &op.amount, encoding)?;
                w.write_string(&op.memo);
            }
            Operation::TransferFromSavings(op) => {
                w.write_string(&op.from);
                w.write_u32_le(op.request_id);
                w.write_string(&op.to);
                write_asset(w, &op.amount, encoding)?;
                w.write_string(&op.memo);
            }
            Operation::CancelTransferFromSavings(op) => {
                w.write_string(&op.from);
                w.write_u32_le(op.request_id);
            }
            Operation::ClaimRewardBalance(op) => {
                w.write_string(&op.account);
                write_asset(w, &op.reward_hive, encoding)?;
                write_asset(w, &op.reward_hbd, encoding)?;
                write_asset(w, &op.reward_vests, encoding)?;
            }
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self, encoding: AssetEncoding) -> Result<Vec<u8>, TransactionError> {
        let mut w = HiveWriter::new();
        self.write_to(&mut w, encoding)?;
        Ok(w.into_bytes())
    }
}

fn write_public_key(w: &mut HiveWriter, key: &str) -> Result<(), TransactionError> {
    let key = PublicKey::from_hive_string(key)?;
    w.write_bytes(&key.to_compressed());
    Ok(())
}

fn write_name_list(
    w: &mut HiveWriter,
    field: &'static str,
    names: &[String],
) -> Result<(), TransactionError> {
    if names.len() > u8::MAX as usize {
        return Err(TransactionError::TooManyEntries {
            field,
            count: names.len(),
        });
    }
    w.write_string_array(names)?;
    Ok(())
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(self.name())?;
        match self {
            Operation::Vote(op) => pair.serialize_element(op)?,
            Operation::Transfer(op) => pair.serialize_element(op)?,
            Operation::AccountCreate(op) => pair.serialize_element(op)?,
            Operation::AccountUpdate(op) => pair.serialize_element(op)?,
            Operation::CustomJson(op) => pair.serialize_element(op)?,
            Operation::ClaimAccount(op) => pair.serialize_element(op)?,
            Operation::TransferToSavings(op) => pair.serialize_element(op)?,
            Operation::TransferFromSavings(op) => pair.serialize_element(op)?,
            Operation::CancelTransferFromSavings(op) => pair.serialize_element(op)?,
            Operation::ClaimRewardBalance(op) => pair.serialize_element(op)?,
        }
        pair.end()
    }
}

macro_rules! impl_from_operation {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Operation {
                fn from(op: $ty) -> Self {
                    Operation::$variant(op)
                }
            }
        )*
    };
}

impl_from_operation!(
    Vote(VoteOperation),
    Transfer(TransferOperation),
    AccountCreate(AccountCreateOperation),
    AccountUpdate(AccountUpdateOperation),
    CustomJson(CustomJsonOperation),
    ClaimAccount(ClaimAccountOperation),
    TransferToSavings(TransferToSavingsOperation),
    TransferFromSavings(TransferFromSavingsOperation),
    CancelTransferFromSavings(CancelTransferFromSavingsOperation),
    ClaimRewardBalance(ClaimRewardBalanceOperation),
);
