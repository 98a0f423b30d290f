use std::time::{Duration, Instant};

use crate::config::Endpoints;
use crate::domain::account::{AccountSnapshot, Network};

/// Screens in the application flow: pick a network, then look up addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

/// Lookup state as seen by the UI.
///
/// A new lookup replaces whatever was here: Success and Failed are
/// terminal until the next submit, and there is never a partially filled
/// snapshot on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Loading,
    Success(AccountSnapshot),
    Failed(String),
}

/// A lookup request waiting to be sent to the runtime worker
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub seq: u64,
    pub network: Network,
    pub address: String,
}

const STATUS_TTL: Duration = Duration::from_secs(5);

pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    /// Resolved RPC endpoints, for display in the header
    pub endpoints: Endpoints,
    /// Card selection on the Home screen
    pub network_index: usize,
    /// Network chosen for the current lookup session
    pub network: Option<Network>,
    /// Address input buffer
    pub input: String,
    pub lookup: LookupState,
    /// Sequence number of the lookup whose result we still want. Events
    /// carrying an older seq belong to a superseded lookup and are dropped.
    pub lookup_seq: u64,
    pending_lookup: Option<LookupRequest>,
    pub status: Option<(String, StatusLevel)>,
    status_set_at: Option<Instant>,
    pub help_open: bool,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            endpoints: Endpoints::default(),
            network_index: 0,
            network: None,
            input: String::new(),
            lookup: LookupState::Idle,
            lookup_seq: 0,
            pending_lookup: None,
            status: None,
            status_set_at: None,
            help_open: false,
            should_quit: false,
        }
    }

    /// Endpoint URL for a network, for display
    pub fn endpoint_for(&self, network: Network) -> &str {
        match network {
            Network::Ethereum => &self.endpoints.ethereum,
            Network::Solana => &self.endpoints.solana,
        }
    }

    pub fn selected_card(&self) -> Network {
        Network::ALL[self.network_index % Network::ALL.len()]
    }

    pub fn move_card_selection(&mut self, next: bool) {
        let len = Network::ALL.len();
        self.network_index = if next {
            (self.network_index + 1) % len
        } else {
            (self.network_index + len - 1) % len
        };
    }

    /// Pick a network and move to the Lookup screen, ready for typing
    pub fn select_network(&mut self, network: Network) {
        self.network = Some(network);
        self.network_index = Network::ALL
            .iter()
            .position(|n| *n == network)
            .unwrap_or(0);
        self.screen = Screen::Lookup;
        self.input_mode = InputMode::Editing;
    }

    /// Return to the Home screen, discarding the session's input and result
    pub fn back_home(&mut self) {
        self.screen = Screen::Home;
        self.input_mode = InputMode::Normal;
        self.network = None;
        self.input.clear();
        self.lookup = LookupState::Idle;
    }

    /// Submit the current input as a lookup. Returns false when there is
    /// nothing to look up (blank input or no network selected).
    pub fn begin_lookup(&mut self) -> bool {
        let Some(network) = self.network else {
            return false;
        };
        let address = self.input.trim().to_string();
        if address.is_empty() {
            self.set_status("Enter an address first", StatusLevel::Warn);
            return false;
        }

        // Entering Loading discards any prior result immediately; no
        // stale snapshot stays visible under an in-flight lookup
        self.lookup_seq += 1;
        self.lookup = LookupState::Loading;
        self.pending_lookup = Some(LookupRequest {
            seq: self.lookup_seq,
            network,
            address,
        });
        true
    }

    pub fn take_lookup_request(&mut self) -> Option<LookupRequest> {
        self.pending_lookup.take()
    }

    pub fn apply_lookup_success(&mut self, seq: u64, snapshot: AccountSnapshot) {
        if seq != self.lookup_seq {
            // Late result from a superseded lookup
            return;
        }
        self.lookup = LookupState::Success(snapshot);
    }

    pub fn apply_lookup_failure(&mut self, seq: u64, message: String) {
        if seq != self.lookup_seq {
            return;
        }
        self.lookup = LookupState::Failed(message);
        self.set_status("Lookup failed. Check the address", StatusLevel::Error);
    }

    /// Address of the currently displayed snapshot, else the input buffer
    pub fn display_address(&self) -> Option<String> {
        match &self.lookup {
            LookupState::Success(snapshot) => Some(snapshot.address.clone()),
            _ => {
                let trimmed = self.input.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = Some((message.into(), level));
        self.status_set_at = Some(Instant::now());
    }

    pub fn on_tick(&mut self) {
        if let Some(set_at) = self.status_set_at {
            if set_at.elapsed() >= STATUS_TTL {
                self.status = None;
                self.status_set_at = None;
            }
        }
    }
}

/// Truncate an address for display: `0x1234..abcd`
pub fn short_address(value: &str) -> String {
    let value = value.trim();
    if value.len() <= 12 {
        return value.to_string();
    }
    let start: String = value.chars().take(6).collect();
    let end: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    format!("{}..{}", start, end)
}
