//! Scry: a terminal viewer for blockchain account facts
//!
//! Pick a network (Ethereum or Solana), enter an address, and see the
//! account's native balance, transaction activity, contract/program
//! status, and the chain's latest block height: four read-only JSON-RPC
//! calls normalized into one snapshot.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
