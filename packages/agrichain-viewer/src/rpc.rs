//! Ethereum node client: an alloy HTTP provider bound to one endpoint.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{DynProvider, Provider as _, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::Http;
use alloy::transports::utils::guess_local_url;
use alloy::transports::TransportError;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::{debug, info};

use crate::metrics::METRICS;

/// Node client used for contract reads and the one-shot deployment.
pub struct NodeClient {
    provider: DynProvider,
    url: String,
}

impl NodeClient {
    /// Connect over HTTP. `timeout` of `None` leaves calls unbounded;
    /// `poll_interval` overrides how often pending transactions are polled.
    pub fn connect(
        url: &str,
        timeout: Option<Duration>,
        poll_interval: Option<Duration>,
    ) -> Result<Self, crate::Error> {
        let endpoint: reqwest::Url = url
            .parse()
            .map_err(|e| crate::Error::Config(format!("Invalid RPC URL {url:?}: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| crate::Error::Config(format!("HTTP client init failed: {e}")))?;

        let mut client = RpcClient::new(Http::with_client(http, endpoint), guess_local_url(url));
        if let Some(interval) = poll_interval {
            client = client.with_poll_interval(interval);
        }

        // The node signs with its own unlocked accounts, so nothing is filled
        // locally before `eth_sendTransaction`.
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_client(client)
            .erased();

        info!(url = url, timeout = ?timeout, "Node client initialized");
        Ok(Self {
            provider,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Underlying provider, for requests this wrapper does not cover.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// `eth_call` against the latest block.
    pub async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, crate::Error> {
        debug!(to = %to, len = data.len(), "eth_call");
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        self.provider.call(tx).await.map_err(rpc_error)
    }

    pub async fn chain_id(&self) -> Result<u64, crate::Error> {
        self.provider.get_chain_id().await.map_err(rpc_error)
    }
}

/// Map a transport failure to [`crate::Error::Rpc`], counting it.
///
/// Node error objects (reverts arrive with code `3`) keep their code and
/// message; everything else keeps the transport's description.
pub fn rpc_error(err: TransportError) -> crate::Error {
    METRICS.rpc_errors.fetch_add(1, Ordering::Relaxed);
    match err.as_error_resp() {
        Some(payload) => crate::Error::Rpc(format!(
            "code={} message={}",
            payload.code, payload.message
        )),
        None => crate::Error::Rpc(err.to_string()),
    }
}
