//! Networks and the normalized account record

use std::fmt;

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Ethereum,
    Solana,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Ethereum, Network::Solana];

    pub fn title(&self) -> &'static str {
        match self {
            Network::Ethereum => "Ethereum",
            Network::Solana => "Solana",
        }
    }

    /// Native token ticker
    pub fn ticker(&self) -> &'static str {
        match self {
            Network::Ethereum => "ETH",
            Network::Solana => "SOL",
        }
    }

    /// What this chain calls its height counter. Solana counts slots,
    /// which are analogous but not identical to blocks.
    pub fn height_label(&self) -> &'static str {
        match self {
            Network::Ethereum => "Block",
            Network::Solana => "Slot",
        }
    }

    /// Label for an executable account on this chain
    pub fn program_label(&self) -> &'static str {
        match self {
            Network::Ethereum => "Contract",
            Network::Solana => "Program",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Network::Ethereum => '1',
            Network::Solana => '2',
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Normalized result of one account lookup.
///
/// Either fully populated or not produced at all; there is no partial
/// snapshot. Each lookup replaces the previous snapshot wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub network: Network,
    /// Echo of the looked-up address, as entered (trimmed)
    pub address: String,
    /// Native balance in the chain's human unit (ETH or SOL)
    pub balance: f64,
    /// Ethereum: the account nonce. Solana: signatures returned by a single
    /// page query capped at [`crate::infrastructure::chain::SIGNATURE_PAGE_LIMIT`],
    /// which undercounts busy accounts.
    pub transaction_count: u64,
    /// Ethereum: address has non-empty bytecode. Solana: `executable` flag.
    pub is_contract: bool,
    /// Ethereum block number / Solana slot at lookup time. Fields of one
    /// snapshot may reflect slightly different heights; no cross-field
    /// consistency is promised.
    pub latest_block_height: u64,
}
