//! High-level Hive client: chain queries, transaction assembly and
//! broadcasting over a [`NodePool`].

use serde_json::{json, Value};

use hive_primitives::ec::KeyPair;
use hive_transaction::operation::{
    AccountUpdateOperation, ClaimRewardBalanceOperation, CustomJsonOperation, TransferOperation,
    VoteOperation,
};
use hive_transaction::{AssetEncoding, Authority, Operation, SigningData, Transaction};

use crate::error::RpcError;
use crate::pool::NodePool;
use crate::transport::{HttpTransport, RpcTransport};
use crate::types::{AccountData, GlobalProps, NodeConfig, RpcCall};

const GET_DYNAMIC_GLOBAL_PROPERTIES: &str = "condenser_api.get_dynamic_global_properties";
const GET_ACCOUNTS: &str = "condenser_api.get_accounts";
const BROADCAST_TRANSACTION: &str = "condenser_api.broadcast_transaction";

/// Client for a set of Hive API nodes.
pub struct HiveClient<T = HttpTransport> {
    pool: NodePool<T>,
    chain_id: Option<[u8; 32]>,
    asset_encoding: AssetEncoding,
    no_broadcast: bool,
}

impl HiveClient<HttpTransport> {
    /// Client over HTTP with one connection and one request per batch.
    pub fn new(endpoints: Vec<String>) -> Result<Self, RpcError> {
        Self::with_config(NodeConfig::new(endpoints))
    }

    /// Client over HTTP using the connection settings in `config`.
    pub fn with_config(config: NodeConfig) -> Result<Self, RpcError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: RpcTransport> HiveClient<T> {
    /// Client over any transport; `config` is validated first.
    pub fn with_transport(config: NodeConfig, transport: T) -> Result<Self, RpcError> {
        config.validate()?;
        let chain_id = config.chain_id_bytes()?;
        Ok(Self {
            pool: NodePool::new(config.endpoints, transport)?,
            chain_id,
            asset_encoding: AssetEncoding::default(),
            no_broadcast: config.no_broadcast,
        })
    }

    /// Encode assets in the numeric (NAI) format instead of legacy symbols.
    pub fn with_asset_encoding(mut self, encoding: AssetEncoding) -> Self {
        self.asset_encoding = encoding;
        self
    }

    /// Toggle dry-run mode: transactions are signed but never submitted.
    pub fn set_no_broadcast(&mut self, no_broadcast: bool) {
        self.no_broadcast = no_broadcast;
    }

    /// The underlying node pool.
    pub fn pool(&self) -> &NodePool<T> {
        &self.pool
    }

    /// Fetch the chain head via `condenser_api.get_dynamic_global_properties`.
    pub async fn get_dynamic_global_props(&self) -> Result<GlobalProps, RpcError> {
        let result = self
            .pool
            .execute(&RpcCall::new(GET_DYNAMIC_GLOBAL_PROPERTIES, json!([])))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Block reference and expiration derived from the current chain head.
    pub async fn get_signing_data(&self) -> Result<SigningData, RpcError> {
        self.get_dynamic_global_props().await?.signing_data()
    }

    /// Fetch account records; unknown names are simply absent from the result.
    pub async fn get_accounts(&self, names: &[&str]) -> Result<Vec<AccountData>, RpcError> {
        let result = self
            .pool
            .execute(&RpcCall::new(GET_ACCOUNTS, json!([names])))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Run raw calls as one batch against a single node.
    pub async fn exec_batch(&self, calls: &[RpcCall]) -> Result<Vec<Value>, RpcError> {
        self.pool.execute_batch(calls).await
    }

    /// Build, sign and submit a transaction carrying `operations`.
    ///
    /// The key is decoded and the transaction fully encoded before anything
    /// is submitted. Returns the transaction id; with `no_broadcast` set the
    /// id is returned without submitting.
    pub async fn broadcast(&self, operations: Vec<Operation>, wif: &str) -> Result<String, RpcError> {
        let key_pair = KeyPair::from_wif(wif)?;
        let signing_data = self.get_signing_data().await?;

        let mut tx = Transaction::new(&signing_data, operations)
            .with_asset_encoding(self.asset_encoding);
        if let Some(chain_id) = self.chain_id {
            tx = tx.with_chain_id(chain_id);
        }
        let tx_id = tx.id()?;
        let signature = tx.sign(&key_pair)?;
        tx.add_signature(signature);

        self.submit(&tx, &tx_id).await?;
        Ok(tx_id)
    }

    /// Submit a transaction that was built and signed elsewhere.
    ///
    /// Fails with `UnsignedTransaction` before any network call when no
    /// signature is attached.
    pub async fn broadcast_raw(&self, tx: &Transaction) -> Result<String, RpcError> {
        if !tx.is_signed() {
            return Err(hive_transaction::TransactionError::UnsignedTransaction.into());
        }
        let tx_id = tx.id()?;
        self.submit(tx, &tx_id).await?;
        Ok(tx_id)
    }

    async fn submit(&self, tx: &Transaction, tx_id: &str) -> Result<(), RpcError> {
        if self.no_broadcast {
            tracing::debug!(tx_id = %tx_id, "broadcast disabled, transaction not submitted");
            return Ok(());
        }
        let body = tx.to_broadcast_json()?;
        tracing::info!(tx_id = %tx_id, operations = tx.operations.len(), "broadcasting transaction");
        self.pool
            .execute(&RpcCall::new(BROADCAST_TRANSACTION, json!([body])))
            .await?;
        Ok(())
    }

    /// Vote on a post; `weight` is in basis points, -10000 to 10000.
    pub async fn vote(
        &self,
        voter: &str,
        author: &str,
        permlink: &str,
        weight: i16,
        wif: &str,
    ) -> Result<String, RpcError> {
        let op = VoteOperation {
            voter: voter.to_string(),
            author: author.to_string(),
            permlink: permlink.to_string(),
            weight,
        };
        self.broadcast(vec![op.into()], wif).await
    }

    /// Transfer `amount` (e.g. `"1.000 HIVE"`) from `from` to `to`.
    pub async fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        memo: &str,
        wif: &str,
    ) -> Result<String, RpcError> {
        let op = TransferOperation {
            from: from.to_string(),
            to: to.to_string(),
            amount: amount.to_string(),
            memo: memo.to_string(),
        };
        self.broadcast(vec![op.into()], wif).await
    }

    /// Broadcast a `custom_json` operation.
    pub async fn broadcast_json(
        &self,
        required_auths: Vec<String>,
        required_posting_auths: Vec<String>,
        id: &str,
        json: &str,
        wif: &str,
    ) -> Result<String, RpcError> {
        let op = CustomJsonOperation {
            required_auths,
            required_posting_auths,
            id: id.to_string(),
            json: json.to_string(),
        };
        self.broadcast(vec![op.into()], wif).await
    }

    /// Claim every pending reward balance of `account`.
    pub async fn claim_rewards(&self, account: &str, wif: &str) -> Result<String, RpcError> {
        let data = self
            .get_accounts(&[account])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RpcError::AccountNotFound(account.to_string()))?;
        let op = ClaimRewardBalanceOperation {
            account: account.to_string(),
            reward_hive: data.reward_hive_balance,
            reward_hbd: data.reward_hbd_balance,
            reward_vests: data.reward_vesting_balance,
        };
        self.broadcast(vec![op.into()], wif).await
    }

    /// Update metadata and memo key.
    ///
    /// Changing authorities is refused: pass `None` for all three.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_account(
        &self,
        account: &str,
        owner: Option<Authority>,
        active: Option<Authority>,
        posting: Option<Authority>,
        json_metadata: &str,
        memo_key: &str,
        wif: &str,
    ) -> Result<String, RpcError> {
        if owner.is_some() || active.is_some() || posting.is_some() {
            return Err(RpcError::Unsupported(
                "owner, active and posting authority changes".to_string(),
            ));
        }
        let op = AccountUpdateOperation {
            account: account.to_string(),
            owner,
            active,
            posting,
            memo_key: memo_key.to_string(),
            json_metadata: json_metadata.to_string(),
        };
        self.broadcast(vec![op.into()], wif).await
    }
}
