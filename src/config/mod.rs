use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Default public endpoints, used when nothing else is configured
pub const DEFAULT_ETHEREUM_RPC: &str = "https://cloudflare-eth.com";
pub const DEFAULT_SOLANA_RPC: &str = "https://api.mainnet-beta.solana.com";

/// Optional on-disk configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ethereum_rpc: Option<String>,

    #[serde(default)]
    pub solana_rpc: Option<String>,
}

/// Resolved endpoint URLs, one per network.
///
/// This is the explicit object handed to the runtime worker; adapters
/// never read the environment themselves, so tests can inject a local
/// mock server here.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub ethereum: String,
    pub solana: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ethereum: DEFAULT_ETHEREUM_RPC.to_string(),
            solana: DEFAULT_SOLANA_RPC.to_string(),
        }
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SCRY_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("scry").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("scry").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "scry", "scry")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
