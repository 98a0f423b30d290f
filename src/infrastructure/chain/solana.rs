//! Solana account reader
//!
//! Solana RPC answers with plain JSON integers (lamports, slots) rather
//! than hex strings; several methods wrap the payload in a
//! `{context, value}` envelope.

use serde_json::{json, Value};

use crate::domain::account::Network;
use crate::infrastructure::jsonrpc::{Result, RpcClient, RpcError};

/// Page size for `getSignaturesForAddress`. One page is all we fetch, so
/// activity counts saturate here: an account with more history reports
/// exactly this many signatures. The UI marks the cap rather than
/// pretending the count is a lifetime total.
pub const SIGNATURE_PAGE_LIMIT: u64 = 1000;

/// 1 SOL = 1e9 lamports
const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

pub struct SolanaReader {
    client: RpcClient,
}

impl SolanaReader {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl super::ChainAccountReader for SolanaReader {
    fn network(&self) -> Network {
        Network::Solana
    }

    async fn balance(&self, address: &str) -> Result<f64> {
        let method = "getBalance";
        let result = self.client.call(method, json!([address]), address).await?;
        let lamports = result
            .get("value")
            .and_then(Value::as_u64)
            .ok_or_else(|| RpcError::decode(method, address, "expected integer value"))?;
        Ok(lamports_to_sol(lamports))
    }

    async fn transaction_activity_count(&self, address: &str) -> Result<u64> {
        let result = self
            .client
            .call_optional(
                "getSignaturesForAddress",
                json!([address, {"limit": SIGNATURE_PAGE_LIMIT}]),
                address,
            )
            .await?;
        // No result means no recorded signatures, not a failed call
        Ok(signature_count(result.as_ref()))
    }

    async fn is_contract_account(&self, address: &str) -> Result<bool> {
        let result = self
            .client
            .call(
                "getAccountInfo",
                json!([address, {"encoding": "jsonParsed"}]),
                address,
            )
            .await?;
        // A nonexistent account comes back as value: null; not executable,
        // not an error
        Ok(account_is_executable(&result))
    }

    async fn latest_block_height(&self) -> Result<u64> {
        let method = "getSlot";
        let result = self.client.call(method, json!([]), "-").await?;
        result
            .as_u64()
            .ok_or_else(|| RpcError::decode(method, "-", "expected integer slot"))
    }
}

fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

fn signature_count(result: Option<&Value>) -> u64 {
    result
        .and_then(Value::as_array)
        .map(|sigs| sigs.len() as u64)
        .unwrap_or(0)
}

fn account_is_executable(result: &Value) -> bool {
    result
        .get("value")
        .and_then(|value| value.get("executable"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(2_500_000_000), 2.5);
        assert_eq!(lamports_to_sol(0), 0.0);
        assert_eq!(lamports_to_sol(1), 0.000_000_001);
    }

    #[test]
    fn test_signature_count() {
        assert_eq!(signature_count(None), 0);
        assert_eq!(signature_count(Some(&json!([]))), 0);

        let two = json!([{"signature": "a"}, {"signature": "b"}]);
        assert_eq!(signature_count(Some(&two)), 2);

        // A full page reports exactly the cap, even if more exist on-chain
        let sigs: Vec<Value> = (0..SIGNATURE_PAGE_LIMIT)
            .map(|i| json!({"signature": format!("sig{i}")}))
            .collect();
        let full_page = Value::Array(sigs);
        assert_eq!(signature_count(Some(&full_page)), SIGNATURE_PAGE_LIMIT);
    }

    #[test]
    fn test_account_is_executable() {
        // Nonexistent account: value is null, treated as not executable
        assert!(!account_is_executable(&json!({"context": {}, "value": null})));
        assert!(!account_is_executable(&json!({"value": {"executable": false}})));
        assert!(account_is_executable(&json!({"value": {"executable": true}})));
    }
}
