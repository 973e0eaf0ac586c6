//! JSON-RPC envelopes, node configuration, and the condenser API shapes
//! this client reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hive_transaction::signing::parse_chain_id;
use hive_transaction::{Authority, SigningData};

use crate::error::RpcError;

/// A method name plus positional parameters, not yet bound to an id.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCall {
    /// Fully qualified method, e.g. `condenser_api.get_accounts`.
    pub method: String,
    /// Positional parameters, normally a JSON array.
    pub params: Value,
}

impl RpcCall {
    /// Call `method` with `params`.
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC 2.0 request as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: String,
    /// Request id echoed back in the response.
    pub id: u64,
    /// Method name.
    pub method: String,
    /// Positional parameters.
    pub params: Value,
}

impl RpcRequest {
    /// Bind `call` to request id `id`.
    pub fn new(id: u64, call: &RpcCall) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: call.method.clone(),
            params: call.params.clone(),
        }
    }
}

/// Error object carried by a failed JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// JSON-RPC error code.
    pub code: i64,
    /// Human-readable description from the node.
    pub message: String,
    /// Extra detail, when the node sends any.
    #[serde(default)]
    pub data: Option<Value>,
}

/// JSON-RPC 2.0 response.
///
/// A JSON `null` result deserializes to `None`, the same as a missing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Id of the request this answers.
    #[serde(default)]
    pub id: Option<u64>,
    /// Call result; absent or `null` on failure.
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object, present when the call failed.
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    /// Successful response carrying `result`.
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Unwrap the result, treating an error object or an empty payload as
    /// failure.
    pub fn into_result(self) -> Result<Value, RpcError> {
        if let Some(err) = self.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        self.result.ok_or(RpcError::EmptyResult)
    }
}

fn default_one() -> usize {
    1
}

/// Node pool and client settings.
///
/// ```toml
/// endpoints = ["https://api.hive.blog", "https://anyx.io"]
/// max_conn = 4
/// max_batch = 10
/// timeout_secs = 15
/// no_broadcast = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeConfig {
    /// API node URLs, tried in this order.
    pub endpoints: Vec<String>,
    /// Idle connections kept per host by the HTTP client.
    #[serde(default = "default_one")]
    pub max_conn: usize,
    /// Requests per HTTP round-trip when executing a batch.
    #[serde(default = "default_one")]
    pub max_batch: usize,
    /// Per-request timeout handed to the HTTP client; `None` means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Build and sign transactions but never submit them.
    #[serde(default)]
    pub no_broadcast: bool,
    /// Hex chain id override for testnets.
    #[serde(default)]
    pub chain_id: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            max_conn: 1,
            max_batch: 1,
            timeout_secs: None,
            no_broadcast: false,
            chain_id: None,
        }
    }
}

impl NodeConfig {
    /// Defaults for everything except the endpoint list.
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, RpcError> {
        let config: NodeConfig =
            toml::from_str(input).map_err(|e| RpcError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that at least one endpoint is set and that the chain id, if
    /// any, is 32 hex bytes.
    pub fn validate(&self) -> Result<(), RpcError> {
        if self.endpoints.is_empty() {
            return Err(RpcError::NoEndpoints);
        }
        if self.max_conn == 0 || self.max_batch == 0 {
            return Err(RpcError::Config(
                "max_conn and max_batch must be at least 1".to_string(),
            ));
        }
        self.chain_id_bytes()?;
        Ok(())
    }

    /// Decoded chain id override.
    pub fn chain_id_bytes(&self) -> Result<Option<[u8; 32]>, RpcError> {
        self.chain_id
            .as_deref()
            .map(parse_chain_id)
            .transpose()
            .map_err(|e| RpcError::Config(e.to_string()))
    }
}

/// The fields of `condenser_api.get_dynamic_global_properties` needed to
/// reference the chain head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalProps {
    /// Height of the head block.
    pub head_block_number: u64,
    /// Hex id of the head block.
    pub head_block_id: String,
    /// Head block time, `YYYY-MM-DDTHH:MM:SS` UTC.
    pub time: String,
}

impl GlobalProps {
    /// Block reference and expiration for a transaction built on this head.
    pub fn signing_data(&self) -> Result<SigningData, RpcError> {
        Ok(SigningData::from_chain_head(
            self.head_block_number,
            &self.head_block_id,
            &self.time,
        )?)
    }
}

/// Subset of an account record from `condenser_api.get_accounts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    /// Account name.
    pub name: String,
    /// Owner authority.
    #[serde(default)]
    pub owner: Authority,
    /// Active authority.
    #[serde(default)]
    pub active: Authority,
    /// Posting authority.
    #[serde(default)]
    pub posting: Authority,
    /// Memo public key, `STM`-prefixed.
    #[serde(default)]
    pub memo_key: String,
    /// Free-form profile metadata.
    #[serde(default)]
    pub json_metadata: String,
    /// Liquid HIVE, e.g. `"1.000 HIVE"`.
    #[serde(default)]
    pub balance: String,
    /// Liquid HBD.
    #[serde(default)]
    pub hbd_balance: String,
    /// Staked VESTS.
    #[serde(default)]
    pub vesting_shares: String,
    /// Unclaimed HBD rewards.
    #[serde(default)]
    pub reward_hbd_balance: String,
    /// Unclaimed HIVE rewards.
    #[serde(default)]
    pub reward_hive_balance: String,
    /// Unclaimed VESTS rewards.
    #[serde(default)]
    pub reward_vesting_balance: String,
}
