//! The seam between the node pool and the network.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::error::RpcError;
use crate::types::{NodeConfig, RpcRequest, RpcResponse};

/// Sends JSON-RPC requests to a single endpoint.
///
/// Implementations report transport failures as `Err`; protocol errors and
/// empty results come back inside the [`RpcResponse`] for the pool to judge.
pub trait RpcTransport: Send + Sync {
    /// Send one request.
    fn call(
        &self,
        endpoint: &str,
        request: &RpcRequest,
    ) -> impl Future<Output = Result<RpcResponse, RpcError>> + Send;

    /// Send a batch. Responses are returned in request order; a request the
    /// node did not answer gets an empty response.
    fn call_batch(
        &self,
        endpoint: &str,
        requests: &[RpcRequest],
    ) -> impl Future<Output = Result<Vec<RpcResponse>, RpcError>> + Send;
}

/// JSON-RPC over HTTP POST.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    max_batch: usize,
}

impl HttpTransport {
    /// Build the HTTP client from `max_conn`, `max_batch` and `timeout_secs`.
    pub fn new(config: &NodeConfig) -> Result<Self, RpcError> {
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(config.max_conn.max(1));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            max_batch: config.max_batch.max(1),
        })
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, RpcError> {
        let resp = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl RpcTransport for HttpTransport {
    async fn call(&self, endpoint: &str, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        self.post(endpoint, request).await
    }

    async fn call_batch(
        &self,
        endpoint: &str,
        requests: &[RpcRequest],
    ) -> Result<Vec<RpcResponse>, RpcError> {
        let mut out = Vec::with_capacity(requests.len());
        for chunk in requests.chunks(self.max_batch) {
            let mut responses: Vec<RpcResponse> = self.post(endpoint, &chunk).await?;
            // nodes may answer a batch out of order
            for request in chunk {
                let found = responses.iter().position(|r| r.id == Some(request.id));
                out.push(found.map(|i| responses.swap_remove(i)).unwrap_or_default());
            }
        }
        Ok(out)
    }
}
