//! End-to-end lookup tests against a local mock JSON-RPC server
//!
//! The server answers canned per-method responses, so these pin both the
//! request shapes the readers send and the decoding of what comes back.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};

use scry::domain::account::Network;
use scry::domain::lookup::lookup;
use scry::infrastructure::chain::{EthereumReader, SolanaReader};
use scry::infrastructure::jsonrpc::RpcClient;

type SeenRequests = Arc<Mutex<Vec<(String, Value)>>>;

/// Spawn a one-thread HTTP server that answers JSON-RPC POSTs with
/// `respond(method) -> (status, body)`. Returns the endpoint URL and the
/// log of (method, params) it saw.
fn spawn_rpc_server<F>(respond: F) -> (String, SeenRequests)
where
    F: Fn(&str) -> (u16, String) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    let seen: SeenRequests = Arc::new(Mutex::new(Vec::new()));
    let seen_writer = Arc::clone(&seen);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            handle_connection(stream, &respond, &seen_writer);
        }
    });

    (format!("http://{}", addr), seen)
}

fn handle_connection<F>(mut stream: TcpStream, respond: &F, seen: &SeenRequests)
where
    F: Fn(&str) -> (u16, String),
{
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap_or(0) == 0 {
            return;
        }
        let header = header.trim();
        if header.is_empty() {
            break;
        }
        if let Some(value) = header.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let params = request.get("params").cloned().unwrap_or(Value::Null);
    seen.lock().unwrap().push((method.clone(), params));

    let (status, response_body) = respond(&method);
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response_body.len(),
        response_body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn rpc_result(result: Value) -> String {
    json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string()
}

fn ethereum_responder(method: &str) -> (u16, String) {
    match method {
        "eth_getBalance" => (200, rpc_result(json!("0x0"))),
        "eth_getTransactionCount" => (200, rpc_result(json!("0x5"))),
        "eth_getCode" => (200, rpc_result(json!("0x0"))),
        "eth_blockNumber" => (200, rpc_result(json!("0x10"))),
        _ => (404, "not found".to_string()),
    }
}

#[tokio::test]
async fn test_ethereum_lookup_scenario() {
    let (endpoint, seen) = spawn_rpc_server(ethereum_responder);
    let reader = EthereumReader::new(RpcClient::new(&endpoint));
    let address = "0xAbC1234567890fffffffffffffffffffffff4123";

    let snapshot = lookup(&reader, address).await.expect("lookup should succeed");

    assert_eq!(snapshot.network, Network::Ethereum);
    assert_eq!(snapshot.address, address);
    assert_eq!(snapshot.balance, 0.0);
    assert_eq!(snapshot.transaction_count, 5);
    assert!(!snapshot.is_contract);
    assert_eq!(snapshot.latest_block_height, 16);

    // Request shapes: address + "latest" for account calls, empty params
    // for the head query
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    for (method, params) in seen.iter() {
        match method.as_str() {
            "eth_getBalance" | "eth_getTransactionCount" | "eth_getCode" => {
                assert_eq!(params, &json!([address, "latest"]), "params for {method}");
            }
            "eth_blockNumber" => assert_eq!(params, &json!([])),
            other => panic!("unexpected method {other}"),
        }
    }

    println!("✓ Ethereum lookup scenario passed");
}

#[tokio::test]
async fn test_ethereum_balance_and_contract_decoding() {
    let (endpoint, _) = spawn_rpc_server(|method| match method {
        // 1e18 wei = 1 ETH
        "eth_getBalance" => (200, rpc_result(json!("0xDE0B6B3A7640000"))),
        "eth_getTransactionCount" => (200, rpc_result(json!("0x0"))),
        "eth_getCode" => (200, rpc_result(json!("0x6080604052"))),
        "eth_blockNumber" => (200, rpc_result(json!("0x1"))),
        _ => (404, "not found".to_string()),
    });
    let reader = EthereumReader::new(RpcClient::new(&endpoint));

    let snapshot = lookup(&reader, "0x000000000000000000000000000000000000dEaD")
        .await
        .expect("lookup should succeed");

    assert_eq!(snapshot.balance, 1.0);
    assert!(snapshot.is_contract);

    println!("✓ Ethereum decoding checks passed");
}

#[tokio::test]
async fn test_solana_lookup_scenario() {
    let (endpoint, seen) = spawn_rpc_server(|method| match method {
        "getBalance" => (
            200,
            rpc_result(json!({"context": {"slot": 1}, "value": 2_500_000_000u64})),
        ),
        "getSignaturesForAddress" => (
            200,
            rpc_result(json!([
                {"signature": "a"},
                {"signature": "b"},
                {"signature": "c"},
            ])),
        ),
        // Nonexistent account: value is null, which must not error
        "getAccountInfo" => (200, rpc_result(json!({"context": {"slot": 1}, "value": null}))),
        "getSlot" => (200, rpc_result(json!(250_000_000u64))),
        _ => (404, "not found".to_string()),
    });
    let reader = SolanaReader::new(RpcClient::new(&endpoint));
    let address = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

    let snapshot = lookup(&reader, address).await.expect("lookup should succeed");

    assert_eq!(snapshot.network, Network::Solana);
    assert_eq!(snapshot.address, address);
    assert_eq!(snapshot.balance, 2.5);
    assert_eq!(snapshot.transaction_count, 3);
    assert!(!snapshot.is_contract);
    assert_eq!(snapshot.latest_block_height, 250_000_000);

    let seen = seen.lock().unwrap();
    for (method, params) in seen.iter() {
        match method.as_str() {
            "getBalance" => assert_eq!(params, &json!([address])),
            "getSignaturesForAddress" => {
                assert_eq!(params, &json!([address, {"limit": 1000}]));
            }
            "getAccountInfo" => {
                assert_eq!(params, &json!([address, {"encoding": "jsonParsed"}]));
            }
            "getSlot" => assert_eq!(params, &json!([])),
            other => panic!("unexpected method {other}"),
        }
    }

    println!("✓ Solana lookup scenario passed");
}

#[tokio::test]
async fn test_solana_executable_program() {
    let (endpoint, _) = spawn_rpc_server(|method| match method {
        "getBalance" => (200, rpc_result(json!({"context": {}, "value": 1u64}))),
        // Missing result: treated as zero activity, not an error
        "getSignaturesForAddress" => (200, json!({"jsonrpc": "2.0", "id": 1}).to_string()),
        "getAccountInfo" => (
            200,
            rpc_result(json!({"context": {}, "value": {"executable": true, "lamports": 1}})),
        ),
        "getSlot" => (200, rpc_result(json!(7u64))),
        _ => (404, "not found".to_string()),
    });
    let reader = SolanaReader::new(RpcClient::new(&endpoint));

    let snapshot = lookup(&reader, "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA")
        .await
        .expect("lookup should succeed");

    assert!(snapshot.is_contract);
    assert_eq!(snapshot.transaction_count, 0);

    println!("✓ Solana program/empty-activity checks passed");
}

#[tokio::test]
async fn test_lookup_fails_whole_when_one_call_fails() {
    // Everything answers except the head query, which hits a server error
    let (endpoint, _) = spawn_rpc_server(|method| match method {
        "eth_blockNumber" => (500, "internal error".to_string()),
        other => ethereum_responder(other),
    });
    let reader = EthereumReader::new(RpcClient::new(&endpoint));

    let err = lookup(&reader, "0x000000000000000000000000000000000000dEaD")
        .await
        .expect_err("lookup must fail as a whole");

    // No partial snapshot exists; the wrapped error names the failed call
    assert_eq!(err.network, Network::Ethereum);
    let cause = err.source.to_string();
    assert!(
        cause.contains("eth_blockNumber"),
        "cause should name the method: {cause}"
    );

    println!("✓ All-or-nothing failure check passed");
}

#[tokio::test]
async fn test_missing_result_fails_call() {
    let (endpoint, _) = spawn_rpc_server(|method| match method {
        "eth_getBalance" => (
            200,
            json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32602, "message": "bad params"}})
                .to_string(),
        ),
        other => ethereum_responder(other),
    });
    let reader = EthereumReader::new(RpcClient::new(&endpoint));

    let err = lookup(&reader, "not-an-address")
        .await
        .expect_err("missing result must fail the lookup");
    assert!(err.source.to_string().contains("eth_getBalance"));

    println!("✓ Missing-result check passed");
}

#[tokio::test]
async fn test_decoding_is_pure_across_lookups() {
    let (endpoint, _) = spawn_rpc_server(ethereum_responder);
    let reader = EthereumReader::new(RpcClient::new(&endpoint));
    let address = "0x000000000000000000000000000000000000dEaD";

    // Identical raw responses decode to identical snapshots
    let first = lookup(&reader, address).await.expect("first lookup");
    let second = lookup(&reader, address).await.expect("second lookup");
    assert_eq!(first, second);

    println!("✓ Pure-decoding check passed");
}

#[tokio::test]
async fn test_address_is_trimmed_before_use() {
    let (endpoint, seen) = spawn_rpc_server(ethereum_responder);
    let reader = EthereumReader::new(RpcClient::new(&endpoint));

    let snapshot = lookup(&reader, "  0xabc  ").await.expect("lookup");
    assert_eq!(snapshot.address, "0xabc");

    let seen = seen.lock().unwrap();
    let (_, params) = seen
        .iter()
        .find(|(method, _)| method == "eth_getBalance")
        .expect("balance call seen");
    assert_eq!(params, &json!(["0xabc", "latest"]));
}
