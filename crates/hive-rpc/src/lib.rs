//! Hive SDK - API node access.
//!
//! A [`NodePool`] spreads JSON-RPC calls over several API nodes with
//! sticky failover, and [`HiveClient`] builds, signs and broadcasts
//! transactions through it.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), hive_rpc::RpcError> {
//! use hive_rpc::HiveClient;
//!
//! let client = HiveClient::new(vec![
//!     "https://api.hive.blog".to_string(),
//!     "https://anyx.io".to_string(),
//! ])?;
//! let props = client.get_dynamic_global_props().await?;
//! println!("head block {}", props.head_block_number);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod policy;
pub mod pool;
pub mod transport;
pub mod types;

pub use client::HiveClient;
pub use error::RpcError;
pub use policy::{NodeStats, RotationPolicy, StatsRecorder, StickyRoundRobin};
pub use pool::NodePool;
pub use transport::{HttpTransport, RpcTransport};
pub use types::{AccountData, GlobalProps, NodeConfig, RpcCall, RpcRequest, RpcResponse};
