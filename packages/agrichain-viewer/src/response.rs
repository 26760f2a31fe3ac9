//! Response types for the JSON API.

use agrichain_types::{parse_detail_blob, DetailEntry, ProductRecord};
use serde::Serialize;

/// Product as returned by `GET /api/products/{product_id}`.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub name: String,
    pub batch_id: String,
    pub details: Vec<DetailEntry>,
    pub raw_details: String,
}

impl From<&ProductRecord> for ProductView {
    fn from(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            batch_id: record.batch_id.clone(),
            details: parse_detail_blob(&record.detail_blob),
            raw_details: record.detail_blob.clone(),
        }
    }
}

/// Response from the product endpoint.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductResponse {
    pub fn ok(product_id: impl Into<String>, record: &ProductRecord) -> Self {
        Self {
            success: true,
            product_id: product_id.into(),
            product: Some(record.into()),
            error: None,
        }
    }

    pub fn err(product_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            product_id: product_id.into(),
            product: None,
            error: Some(error.into()),
        }
    }
}

/// Response from the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub contract_address: String,
    pub contract_bound: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    pub uptime_secs: u64,
    pub requests: u64,
}
