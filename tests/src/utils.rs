//! In-process mock Ethereum node and viewer server for integration tests.

use agrichain_viewer::contract::product_function;
use agrichain_viewer::{create_router, AppState, Config};
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::primitives::{hex, Bytes};
use anyhow::Result;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const DEV_ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const DEPLOY_TX_HASH: &str =
    "0x1111111111111111111111111111111111111111111111111111111111111111";
pub const CHAIN_ID: u64 = 31337;

/// `(product_id, name, batch_id, details)` served by the mock contract.
pub fn sample_catalogue() -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
    vec![
        (
            "P3001",
            "Apple Juice",
            "B123",
            "Stage: Harvest, Location: Farm A | Stage: Processing, Location: Plant B",
        ),
        (
            "P3002",
            "Whole Milk",
            "B204",
            "Ingredient: Milk, Source: Green Valley Dairy | Stage: Pasteurization, Temperature: 72C",
        ),
        ("P3003", "Wildflower Honey", "B311", ""),
        ("P3004", "", "B402", "Organic, Origin: Spain"),
    ]
}

/// Observable state of the mock node.
#[derive(Default)]
pub struct NodeState {
    products: HashMap<String, (String, String, String)>,
    pub eth_calls: AtomicU64,
    pub last_product_id: Mutex<Option<String>>,
    pub deploy_transactions: AtomicU64,
    pub receipt_polls: AtomicU64,
}

impl NodeState {
    pub fn eth_call_count(&self) -> u64 {
        self.eth_calls.load(Ordering::SeqCst)
    }

    pub fn last_product_id(&self) -> Option<String> {
        self.last_product_id.lock().unwrap().clone()
    }
}

pub struct MockNode {
    pub url: String,
    pub state: Arc<NodeState>,
}

/// Start a JSON-RPC node on an ephemeral port serving `catalogue`.
pub async fn start_mock_node(
    catalogue: &[(&str, &str, &str, &str)],
) -> Result<MockNode> {
    let state = Arc::new(NodeState {
        products: catalogue
            .iter()
            .map(|(id, name, batch, details)| {
                (
                    id.to_string(),
                    (name.to_string(), batch.to_string(), details.to_string()),
                )
            })
            .collect(),
        ..NodeState::default()
    });

    let app = Router::new()
        .route("/", post(handle_rpc))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockNode {
        url: format!("http://{addr}"),
        state,
    })
}

async fn handle_rpc(State(state): State<Arc<NodeState>>, Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    let method = req["method"].as_str().unwrap_or_default();
    let outcome = match method {
        "eth_chainId" => Ok(json!(format!("0x{CHAIN_ID:x}"))),
        "eth_call" => eth_call(&state, &req["params"]),
        "eth_accounts" => Ok(json!([DEV_ACCOUNT])),
        "eth_sendTransaction" => {
            state.deploy_transactions.fetch_add(1, Ordering::SeqCst);
            Ok(json!(DEPLOY_TX_HASH))
        }
        // Block height never advances; receipts are found by polling.
        "eth_blockNumber" => Ok(json!("0x1")),
        "eth_getTransactionReceipt" => {
            // Mined on the second poll.
            if state.receipt_polls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(Value::Null)
            } else {
                Ok(deploy_receipt())
            }
        }
        other => Err((-32601, format!("the method {other} does not exist/is not available"))),
    };

    Json(match outcome {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err((code, message)) => {
            json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
        }
    })
}

fn deploy_receipt() -> Value {
    json!({
        "type": "0x2",
        "status": "0x1",
        "cumulativeGasUsed": "0x4c4b40",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": DEPLOY_TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": "0x1",
        "gasUsed": "0x4c4b40",
        "effectiveGasPrice": "0x3b9aca00",
        "from": DEV_ACCOUNT.to_lowercase(),
        "to": null,
        "contractAddress": CONTRACT_ADDRESS.to_lowercase()
    })
}

fn eth_call(state: &NodeState, params: &Value) -> Result<Value, (i64, String)> {
    state.eth_calls.fetch_add(1, Ordering::SeqCst);
    let function = product_function().map_err(|e| (-32603, e.to_string()))?;

    let data = params[0]["input"]
        .as_str()
        .or_else(|| params[0]["data"].as_str())
        .ok_or((-32602, "missing call data".to_string()))?;
    let data = hex::decode(data).map_err(|e| (-32602, e.to_string()))?;
    if data.len() < 4 || data[..4] != function.selector()[..] {
        return Err((-32000, "execution reverted".to_string()));
    }
    let product_id = match function.abi_decode_input(&data[4..]) {
        Ok(values) => match values.first() {
            Some(DynSolValue::String(s)) => s.clone(),
            _ => return Err((-32000, "execution reverted".to_string())),
        },
        Err(e) => return Err((-32000, format!("execution reverted: {e}"))),
    };
    *state.last_product_id.lock().unwrap() = Some(product_id.clone());

    let Some((name, batch, details)) = state.products.get(&product_id) else {
        return Err((3, "execution reverted: Product not found".to_string()));
    };
    let out = function
        .abi_encode_output(&[
            DynSolValue::String(name.clone()),
            DynSolValue::String(batch.clone()),
            DynSolValue::String(details.clone()),
        ])
        .map_err(|e| (-32603, e.to_string()))?;
    Ok(json!(Bytes::from(out)))
}

/// Viewer configuration pointing at `rpc_url`.
pub fn viewer_config(rpc_url: Option<String>) -> Config {
    Config {
        rpc_url,
        contract_address: CONTRACT_ADDRESS.into(),
        bind_address: "127.0.0.1:0".into(),
        rpc_timeout_secs: Some(5),
        ..Config::default()
    }
}

/// Start the viewer on an ephemeral port. Returns its base URL.
pub async fn start_viewer(config: Config) -> Result<String> {
    let state = Arc::new(AppState::new(config)?);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

/// URL of a port with nothing listening.
pub async fn closed_port_url() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
