//! Viewer configuration.

use serde::Deserialize;

/// Configuration for the viewer service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint. `None` means no provider is installed.
    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: Option<String>,

    #[serde(default = "defaults::contract_address")]
    pub contract_address: String,

    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    /// Per-call timeout for the provider. Unset means the HTTP client never
    /// times out a call.
    #[serde(default)]
    pub rpc_timeout_secs: Option<u64>,

    #[serde(default = "defaults::sample_ids")]
    pub sample_ids: Vec<String>,

    #[serde(default = "defaults::theme")]
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: defaults::rpc_url(),
            contract_address: defaults::contract_address(),
            bind_address: defaults::bind_address(),
            rpc_timeout_secs: None,
            sample_ids: defaults::sample_ids(),
            theme: defaults::theme(),
        }
    }
}

impl Config {
    /// Configured RPC URL, treating an empty string as unset.
    pub fn provider_url(&self) -> Option<&str> {
        self.rpc_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

mod defaults {
    pub fn rpc_url() -> Option<String> {
        std::env::var("ETH_RPC_URL").ok().filter(|url| !url.is_empty())
    }

    /// First contract deployed from the default Hardhat account.
    pub fn contract_address() -> String {
        "0x5FbDB2315678afecb367f032d93F642f64180aa3".into()
    }

    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }

    pub fn sample_ids() -> Vec<String> {
        (3001..=3005).map(|n| format!("P{n}")).collect()
    }

    pub fn theme() -> String {
        "agrichain".into()
    }
}
