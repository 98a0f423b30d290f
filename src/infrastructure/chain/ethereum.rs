//! Ethereum account reader
//!
//! Speaks raw JSON-RPC so the request shapes stay explicit: every value
//! comes back as a 0x-prefixed hex string. Balances go through U256 first
//! because wei amounts overflow u64 long before they are interesting.

use alloy_primitives::U256;
use serde_json::{json, Value};

use crate::domain::account::Network;
use crate::infrastructure::jsonrpc::{Result, RpcClient, RpcError};

pub struct EthereumReader {
    client: RpcClient,
}

impl EthereumReader {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl super::ChainAccountReader for EthereumReader {
    fn network(&self) -> Network {
        Network::Ethereum
    }

    async fn balance(&self, address: &str) -> Result<f64> {
        let method = "eth_getBalance";
        let result = self
            .client
            .call(method, json!([address, "latest"]), address)
            .await?;
        let wei = result_hex_u256(method, address, &result)?;
        Ok(wei_to_eth(wei))
    }

    async fn transaction_activity_count(&self, address: &str) -> Result<u64> {
        let method = "eth_getTransactionCount";
        let result = self
            .client
            .call(method, json!([address, "latest"]), address)
            .await?;
        result_hex_u64(method, address, &result)
    }

    async fn is_contract_account(&self, address: &str) -> Result<bool> {
        let method = "eth_getCode";
        let result = self
            .client
            .call(method, json!([address, "latest"]), address)
            .await?;
        let code = result
            .as_str()
            .ok_or_else(|| RpcError::decode(method, address, "expected hex string"))?;
        Ok(is_contract_code(code))
    }

    async fn latest_block_height(&self) -> Result<u64> {
        let method = "eth_blockNumber";
        let result = self.client.call(method, json!([]), "-").await?;
        result_hex_u64(method, "-", &result)
    }
}

/// An address is a contract iff its bytecode is non-empty. Nodes report
/// empty code as "0x", and a few as "0x0".
fn is_contract_code(code: &str) -> bool {
    code != "0x" && code != "0x0"
}

fn result_hex_u64(method: &'static str, target: &str, result: &Value) -> Result<u64> {
    let s = result
        .as_str()
        .ok_or_else(|| RpcError::decode(method, target, "expected hex string"))?;
    parse_hex_u64(s).ok_or_else(|| RpcError::decode(method, target, format!("bad hex: {s}")))
}

fn result_hex_u256(method: &'static str, target: &str, result: &Value) -> Result<U256> {
    let s = result
        .as_str()
        .ok_or_else(|| RpcError::decode(method, target, "expected hex string"))?;
    parse_hex_u256(s).ok_or_else(|| RpcError::decode(method, target, format!("bad hex: {s}")))
}

/// Parse hex string to u64
fn parse_hex_u64(s: &str) -> Option<u64> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16).ok()
}

/// Parse hex string to U256
fn parse_hex_u256(s: &str) -> Option<U256> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() || s == "0" {
        return Some(U256::ZERO);
    }
    // Pad to 64 chars for proper parsing
    let padded = format!("{:0>64}", s);
    let bytes = hex::decode(&padded).ok()?;
    Some(U256::from_be_slice(&bytes))
}

/// Convert Wei to ETH as f64
fn wei_to_eth(wei: U256) -> f64 {
    let eth_in_wei = U256::from(1_000_000_000_000_000_000u64);
    let whole = wei / eth_in_wei;
    let frac = wei % eth_in_wei;

    let whole_f64: f64 = whole.to_string().parse().unwrap_or(0.0);
    let frac_f64: f64 = frac.to_string().parse().unwrap_or(0.0);

    whole_f64 + frac_f64 / 1e18
}
