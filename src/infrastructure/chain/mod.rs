//! Per-network account readers over JSON-RPC

mod ethereum;
mod solana;

pub use ethereum::EthereumReader;
pub use solana::{SolanaReader, SIGNATURE_PAGE_LIMIT};

use crate::domain::account::Network;
use crate::infrastructure::jsonrpc::{Result, RpcClient};

/// Read-only account facts for one network.
///
/// Both chains answer the same four questions; the implementations own the
/// chain-specific method names, parameters, and value decoding. Decoding is
/// a pure function of the raw response, so identical responses always yield
/// identical snapshot fields.
#[async_trait::async_trait]
pub trait ChainAccountReader: Send + Sync + 'static {
    fn network(&self) -> Network;

    /// Native balance in the chain's human unit (ETH or SOL)
    async fn balance(&self, address: &str) -> Result<f64>;

    /// Ethereum: account nonce. Solana: recent signature count, capped at
    /// [`SIGNATURE_PAGE_LIMIT`] per page, an approximation rather than a total.
    async fn transaction_activity_count(&self, address: &str) -> Result<u64>;

    /// Whether the address holds executable code
    async fn is_contract_account(&self, address: &str) -> Result<bool>;

    /// Current block number (Ethereum) or slot (Solana)
    async fn latest_block_height(&self) -> Result<u64>;
}

/// Create the reader for a network
pub fn create_reader(network: Network, client: RpcClient) -> std::sync::Arc<dyn ChainAccountReader> {
    match network {
        Network::Ethereum => std::sync::Arc::new(EthereumReader::new(client)),
        Network::Solana => std::sync::Arc::new(SolanaReader::new(client)),
    }
}
