//! Async worker - runs in Tokio runtime and performs the RPC lookups

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::Endpoints;
use crate::domain::account::Network;
use crate::domain::lookup::lookup;
use crate::infrastructure::chain::create_reader;
use crate::infrastructure::jsonrpc::RpcClient;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the async worker loop.
///
/// Both readers are constructed once from the resolved endpoint config; a
/// Lookup command picks one by network and runs as its own task. At most
/// one lookup is in flight: a newer command aborts the previous task, and
/// the `seq` echoed on every event lets the app drop anything that still
/// slips out of a superseded lookup.
pub async fn run_async_worker(
    endpoints: Endpoints,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) {
    let ethereum = create_reader(Network::Ethereum, RpcClient::new(&endpoints.ethereum));
    let solana = create_reader(Network::Solana, RpcClient::new(&endpoints.solana));

    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        // Process commands (non-blocking)
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                RuntimeCommand::Shutdown => {
                    if let Some(handle) = in_flight.take() {
                        handle.abort();
                    }
                    return;
                }

                RuntimeCommand::Lookup {
                    seq,
                    network,
                    address,
                } => {
                    // Supersede: the previous lookup's result is no longer
                    // wanted, so cancel it instead of racing it
                    if let Some(handle) = in_flight.take() {
                        handle.abort();
                    }

                    let reader = match network {
                        Network::Ethereum => Arc::clone(&ethereum),
                        Network::Solana => Arc::clone(&solana),
                    };
                    let evt_tx = evt_tx.clone();

                    in_flight = Some(tokio::spawn(async move {
                        match lookup(reader.as_ref(), &address).await {
                            Ok(snapshot) => {
                                let _ = evt_tx.send(RuntimeEvent::LookupReady { seq, snapshot });
                            }
                            Err(err) => {
                                let _ = evt_tx.send(RuntimeEvent::LookupFailed {
                                    seq,
                                    message: format!("{:#}", anyhow::Error::new(err)),
                                });
                            }
                        }
                    }));
                }
            }
        }

        if let Some(handle) = &in_flight {
            if handle.is_finished() {
                in_flight = None;
            }
        }

        // Small yield to prevent busy loop
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
