//! Provider boundary: where read requests leave the process.
//!
//! The contract binding receives a provider explicitly instead of looking one
//! up globally, so tests substitute a mock and the service substitutes an
//! alloy HTTP provider.

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::rpc::NodeClient;

/// Read-only access to an Ethereum node.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Execute a read-only call against the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, crate::Error>;

    async fn chain_id(&self) -> Result<u64, crate::Error>;

    /// Human-readable endpoint, for logs and health output.
    fn endpoint(&self) -> String;
}

#[async_trait]
impl Provider for NodeClient {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, crate::Error> {
        self.eth_call(to, data).await
    }

    async fn chain_id(&self) -> Result<u64, crate::Error> {
        NodeClient::chain_id(self).await
    }

    fn endpoint(&self) -> String {
        self.url().to_string()
    }
}

/// Presence check only: a configured RPC URL yields a provider.
///
/// Returns `Ok(None)` when nothing is configured; the binding turns that into
/// a user-facing error instead of failing start-up.
pub fn detect(config: &Config) -> Result<Option<Arc<dyn Provider>>, crate::Error> {
    let Some(url) = config.provider_url() else {
        warn!("No Ethereum provider configured");
        return Ok(None);
    };
    let timeout = config.rpc_timeout_secs.map(Duration::from_secs);
    let client = NodeClient::connect(url, timeout, None)?;
    info!(endpoint = url, "Ethereum provider detected");
    Ok(Some(Arc::new(client)))
}
