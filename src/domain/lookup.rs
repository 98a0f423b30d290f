//! Account lookup orchestration
//!
//! One lookup fans out the four reader calls concurrently and either
//! assembles a full [`AccountSnapshot`] or fails as a whole. The four
//! facts are independent reads with no transactional relationship, so no
//! partial result is ever surfaced and no cross-field consistency is
//! claimed.

use thiserror::Error;

use crate::domain::account::{AccountSnapshot, Network};
use crate::infrastructure::chain::ChainAccountReader;
use crate::infrastructure::jsonrpc::RpcError;

/// A whole-lookup failure, wrapping the first reader error.
#[derive(Debug, Error)]
#[error("account lookup failed for {address} on {network}")]
pub struct LookupError {
    pub network: Network,
    pub address: String,
    #[source]
    pub source: RpcError,
}

/// Fetch all four account facts for `address` on the reader's network.
///
/// All four calls are issued concurrently and all are allowed to settle;
/// they are cheap reads with nothing to clean up, so there is no
/// short-circuit on first failure. If any call failed, the first error in
/// field order wins and no snapshot is produced.
pub async fn lookup(
    reader: &dyn ChainAccountReader,
    address: &str,
) -> Result<AccountSnapshot, LookupError> {
    let address = address.trim();

    let (balance, transaction_count, is_contract, latest_block_height) = tokio::join!(
        reader.balance(address),
        reader.transaction_activity_count(address),
        reader.is_contract_account(address),
        reader.latest_block_height(),
    );

    let wrap = |source: RpcError| LookupError {
        network: reader.network(),
        address: address.to_string(),
        source,
    };

    Ok(AccountSnapshot {
        network: reader.network(),
        address: address.to_string(),
        balance: balance.map_err(wrap)?,
        transaction_count: transaction_count.map_err(wrap)?,
        is_contract: is_contract.map_err(wrap)?,
        latest_block_height: latest_block_height.map_err(wrap)?,
    })
}
