//! JSON-RPC transport

mod client;

pub use client::{Result, RpcClient, RpcError};
