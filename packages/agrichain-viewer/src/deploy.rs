//! One-shot contract deployment against a dev node with unlocked accounts.

use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::rpc::{rpc_error, NodeClient};

/// Hardhat compilation artifact (only the fields deployment needs).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub contract_name: Option<String>,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Config(format!("Cannot read artifact {}: {e}", path.display()))
        })?;
        let artifact: Artifact = serde_json::from_str(&raw).map_err(|e| {
            crate::Error::Config(format!("Invalid artifact {}: {e}", path.display()))
        })?;
        if artifact.bytecode.is_empty() {
            return Err(crate::Error::Config(format!(
                "Artifact {} has no bytecode (abstract contract or interface?)",
                path.display()
            )));
        }
        Ok(artifact)
    }

    pub fn name(&self) -> &str {
        self.contract_name.as_deref().unwrap_or("FoodTraceabilityLite")
    }
}

/// Send the creation transaction from the node's first account and wait for
/// its receipt. No retry: any error is returned to the caller.
pub async fn deploy(client: &NodeClient, init_code: Bytes) -> Result<Address, crate::Error> {
    let provider = client.provider();
    let from = provider
        .get_accounts()
        .await
        .map_err(rpc_error)?
        .into_iter()
        .next()
        .ok_or_else(|| crate::Error::Rpc("node has no unlocked accounts".into()))?;

    let tx = TransactionRequest::default()
        .with_from(from)
        .with_deploy_code(init_code);
    let pending = provider.send_transaction(tx).await.map_err(rpc_error)?;
    info!(from = %from, tx_hash = %pending.tx_hash(), "Deployment transaction sent");

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| crate::Error::Rpc(format!("waiting for deployment receipt: {e}")))?;

    if !receipt.status() {
        return Err(crate::Error::Rpc(format!(
            "deployment transaction {} reverted",
            receipt.transaction_hash
        )));
    }
    receipt
        .contract_address
        .ok_or_else(|| crate::Error::Rpc("receipt has no contract address".into()))
}
