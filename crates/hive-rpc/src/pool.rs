//! Failover executor over a fixed list of API nodes.

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::RpcError;
use crate::policy::{NodeStats, RotationPolicy, StatsRecorder, StickyRoundRobin};
use crate::transport::RpcTransport;
use crate::types::{RpcCall, RpcRequest, RpcResponse};

/// Request id used for single calls.
const SINGLE_CALL_ID: u64 = 1;

struct PoolState<P> {
    policy: P,
    stats: StatsRecorder,
}

/// A pool of API nodes tried in rotation until one answers.
///
/// Every call holds one lock from endpoint selection through the final
/// stats update, so concurrent callers run one at a time even when they
/// would hit different endpoints.
pub struct NodePool<T, P = StickyRoundRobin> {
    endpoints: Vec<String>,
    transport: T,
    state: Mutex<PoolState<P>>,
}

impl<T: RpcTransport> NodePool<T, StickyRoundRobin> {
    /// Pool with sticky round-robin rotation; fails on an empty endpoint list.
    pub fn new(endpoints: Vec<String>, transport: T) -> Result<Self, RpcError> {
        Self::with_policy(endpoints, transport, StickyRoundRobin::new())
    }
}

impl<T: RpcTransport, P: RotationPolicy> NodePool<T, P> {
    /// Pool with a custom rotation policy; fails on an empty endpoint list.
    pub fn with_policy(endpoints: Vec<String>, transport: T, policy: P) -> Result<Self, RpcError> {
        if endpoints.is_empty() {
            return Err(RpcError::NoEndpoints);
        }
        let stats = StatsRecorder::new(endpoints.len());
        Ok(Self {
            endpoints,
            transport,
            state: Mutex::new(PoolState { policy, stats }),
        })
    }

    /// Endpoint URLs in configuration order.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// The transport requests go through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Per-endpoint counters, in endpoint order.
    pub async fn stats(&self) -> Vec<NodeStats> {
        self.state.lock().await.stats.snapshot()
    }

    /// Endpoint the next call will try first.
    pub async fn current_index(&self) -> usize {
        self.state.lock().await.policy.current_index()
    }

    /// Run one call, failing over until an endpoint returns a non-empty
    /// result without an error object.
    pub async fn execute(&self, call: &RpcCall) -> Result<Value, RpcError> {
        let request = RpcRequest::new(SINGLE_CALL_ID, call);
        let mut state = self.state.lock().await;
        let order = state.policy.order(self.endpoints.len(), state.stats.as_slice());
        let mut last_error = String::new();

        for &index in &order {
            let endpoint = &self.endpoints[index];
            let outcome = match self.transport.call(endpoint, &request).await {
                Ok(response) => response.into_result(),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(result) => {
                    state.stats.record_success(index);
                    state.policy.on_success(index);
                    tracing::debug!(endpoint = %endpoint, method = %call.method, "RPC call succeeded");
                    return Ok(result);
                }
                Err(e) => {
                    state.stats.record_failure(index);
                    tracing::warn!(endpoint = %endpoint, reason = %e, "RPC call failed, trying next node");
                    last_error = e.to_string();
                }
            }
        }

        tracing::error!(method = %call.method, attempts = order.len(), "all API nodes failed");
        Err(RpcError::AllNodesFailed {
            attempts: order.len(),
            last_error,
        })
    }

    /// Run a batch against one endpoint at a time.
    ///
    /// An endpoint only counts as successful if it answers every call; a
    /// single empty or errored response fails the whole attempt and the
    /// entire batch moves to the next endpoint. Requests carry ids
    /// `0..calls.len()`.
    pub async fn execute_batch(&self, calls: &[RpcCall]) -> Result<Vec<Value>, RpcError> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }
        let requests: Vec<RpcRequest> = calls
            .iter()
            .enumerate()
            .map(|(i, call)| RpcRequest::new(i as u64, call))
            .collect();
        let mut state = self.state.lock().await;
        let order = state.policy.order(self.endpoints.len(), state.stats.as_slice());
        let mut last_error = String::new();

        for &index in &order {
            let endpoint = &self.endpoints[index];
            let outcome = match self.transport.call_batch(endpoint, &requests).await {
                Ok(responses) => collect_batch(responses, requests.len()),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(results) => {
                    state.stats.record_success(index);
                    state.policy.on_success(index);
                    tracing::debug!(endpoint = %endpoint, calls = calls.len(), "RPC batch succeeded");
                    return Ok(results);
                }
                Err(e) => {
                    state.stats.record_failure(index);
                    tracing::warn!(endpoint = %endpoint, reason = %e, "RPC batch failed, trying next node");
                    last_error = e.to_string();
                }
            }
        }

        tracing::error!(calls = calls.len(), attempts = order.len(), "all API nodes failed");
        Err(RpcError::AllNodesFailed {
            attempts: order.len(),
            last_error,
        })
    }
}

fn collect_batch(responses: Vec<RpcResponse>, expected: usize) -> Result<Vec<Value>, RpcError> {
    if responses.len() != expected {
        return Err(RpcError::EmptyResult);
    }
    responses.into_iter().map(RpcResponse::into_result).collect()
}
