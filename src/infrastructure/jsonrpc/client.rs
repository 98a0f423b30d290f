//! Minimal JSON-RPC 2.0 client over HTTP POST

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;

/// Errors from a single JSON-RPC call.
///
/// Every variant carries the method name and the target address (`-` for
/// calls that take no address) so failures stay diagnosable after they
/// bubble up through the lookup.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{method} for {target}: transport error: {source}")]
    Transport {
        method: &'static str,
        target: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} for {target}: server returned HTTP {status}")]
    BadStatus {
        method: &'static str,
        target: String,
        status: u16,
    },
    #[error("{method} for {target}: response has no result")]
    MissingResult {
        method: &'static str,
        target: String,
    },
    #[error("{method} for {target}: {message}")]
    Decode {
        method: &'static str,
        target: String,
        message: String,
    },
}

impl RpcError {
    /// Build a decode error for a malformed `result` payload
    pub fn decode(method: &'static str, target: &str, message: impl Into<String>) -> Self {
        RpcError::Decode {
            method,
            target: target.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RpcError>;

/// JSON-RPC client bound to one endpoint URL.
///
/// The endpoint is injected at construction; nothing here reads the
/// environment, so tests can point a client at a local mock server.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RpcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.into(),
        }
    }

    /// Send one request and unwrap the `result` field.
    ///
    /// Transport failures, non-2xx responses, and absent/null `result` all
    /// fail; no retries.
    pub async fn call(&self, method: &'static str, params: Value, target: &str) -> Result<Value> {
        match self.call_optional(method, params, target).await? {
            Some(result) => Ok(result),
            None => Err(RpcError::MissingResult {
                method,
                target: target.to_string(),
            }),
        }
    }

    /// Like [`call`](Self::call), but an absent or null `result` yields
    /// `Ok(None)`. Solana signature listings use this: no result means no
    /// recorded activity, not a broken call.
    pub async fn call_optional(
        &self,
        method: &'static str,
        params: Value,
        target: &str,
    ) -> Result<Option<Value>> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|source| RpcError::Transport {
                method,
                target: target.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::BadStatus {
                method,
                target: target.to_string(),
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|source| RpcError::Transport {
                method,
                target: target.to_string(),
                source,
            })?;

        match body.get("result") {
            Some(Value::Null) | None => Ok(None),
            Some(result) => Ok(Some(result.clone())),
        }
    }
}
