//! # AgriChain Viewer
//!
//! Web front end for on-chain food traceability records. Binds a read-only
//! client to the `FoodTraceabilityLite` contract and renders the result of
//! `getProductDetails` for a product id entered by the user.
//!
//! ## Quick Start
//! ```bash
//! AGRICHAIN_RPC_URL=http://127.0.0.1:8545 cargo run --bin agrichain-viewer
//! ```
//!
//! ## Endpoints
//! - `GET /` - Landing page
//! - `GET /track?product_id=P3001` - Lookup page (`?sample=P3001` from sample links)
//! - `GET /api/products/{product_id}` - Lookup as JSON
//! - `GET /health`, `GET /ready`, `GET /metrics`

pub mod config;
pub mod contract;
pub mod deploy;
mod error;
mod handlers;
pub mod lookup;
pub mod metrics;
pub mod middleware;
pub mod provider;
pub mod response;
mod router;
pub mod rpc;
mod state;
pub mod view;

pub use config::Config;
pub use contract::{ContractBinding, ProductContract};
pub use error::Error;
pub use lookup::{LookupPhase, LookupSession};
pub use provider::Provider;
pub use router::create as create_router;
pub use state::AppState;
