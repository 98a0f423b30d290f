//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The JSON-RPC transport and per-network account readers
//! - Tokio runtime bridge for async operations

pub mod chain;
pub mod jsonrpc;
pub mod runtime;
