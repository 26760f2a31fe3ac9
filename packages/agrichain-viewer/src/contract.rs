//! Contract client binding for `FoodTraceabilityLite`.

use agrichain_types::{ProductRecord, PROVIDER_NOT_INSTALLED};
use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Address, Bytes};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::provider::Provider;

/// ABI bundled at compile time.
pub const PRODUCT_ABI: &str = include_str!("../abi/FoodTraceabilityLite.json");

/// The one method this viewer consumes.
pub const GET_PRODUCT_DETAILS: &str = "getProductDetails";

/// Callable handle: fixed address, fixed ABI, injected provider.
#[derive(Clone)]
pub struct ProductContract {
    address: Address,
    function: Function,
    provider: Arc<dyn Provider>,
}

impl std::fmt::Debug for ProductContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductContract")
            .field("address", &self.address)
            .field("function", &self.function.signature())
            .field("provider", &self.provider.endpoint())
            .finish()
    }
}

impl ProductContract {
    /// Bind `provider` to `address` using the bundled ABI.
    pub fn new(provider: Arc<dyn Provider>, address: &str) -> Result<Self, crate::Error> {
        let address: Address = address
            .trim()
            .parse()
            .map_err(|e| crate::Error::Config(format!("Invalid contract address {address:?}: {e}")))?;
        let function = product_function()?;
        Ok(Self {
            address,
            function,
            provider,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Call `getProductDetails(product_id)` and coerce the output tuple.
    pub async fn get_product_details(&self, product_id: &str) -> Result<ProductRecord, crate::Error> {
        let input = self
            .function
            .abi_encode_input(&[DynSolValue::String(product_id.to_string())])
            .map_err(|e| crate::Error::Abi(format!("encode {GET_PRODUCT_DETAILS}: {e}")))?;

        debug!(product_id = product_id, to = %self.address, "Calling contract");
        let output = self.provider.call(self.address, Bytes::from(input)).await?;

        let values = self
            .function
            .abi_decode_output(&output)
            .map_err(|e| crate::Error::Abi(format!("decode {GET_PRODUCT_DETAILS}: {e}")))?;

        Ok(record_from_values(values))
    }
}

/// Coerce decoded outputs into a record. Non-string values become empty.
fn record_from_values(values: Vec<DynSolValue>) -> ProductRecord {
    ProductRecord::from_fields(values.into_iter().map(|value| match value {
        DynSolValue::String(s) => Some(s),
        _ => None,
    }))
}

/// Parse the bundled ABI and pick `getProductDetails`.
pub fn product_function() -> Result<Function, crate::Error> {
    let abi: JsonAbi = serde_json::from_str(PRODUCT_ABI)
        .map_err(|e| crate::Error::Config(format!("Bundled ABI is invalid: {e}")))?;
    abi.function(GET_PRODUCT_DETAILS)
        .and_then(|overloads| overloads.first())
        .cloned()
        .ok_or_else(|| crate::Error::Config(format!("ABI has no {GET_PRODUCT_DETAILS} method")))
}

/// Result of the one-time binding step: a handle, or the reason there is none.
#[derive(Clone, Debug)]
pub struct ContractBinding {
    contract: Option<ProductContract>,
    error: Option<String>,
}

impl ContractBinding {
    /// Runs once at start-up. Never fails; problems are kept as a
    /// user-displayable message and the handle stays unset.
    pub fn bind(provider: Option<Arc<dyn Provider>>, address: &str) -> Self {
        let Some(provider) = provider else {
            error!("{PROVIDER_NOT_INSTALLED}");
            return Self::unbound(PROVIDER_NOT_INSTALLED);
        };
        match ProductContract::new(provider, address) {
            Ok(contract) => {
                info!(address = %contract.address(), endpoint = %contract.provider().endpoint(), "Contract bound");
                Self {
                    contract: Some(contract),
                    error: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Contract binding failed");
                Self::unbound(e.to_string())
            }
        }
    }

    pub fn unbound(error: impl Into<String>) -> Self {
        Self {
            contract: None,
            error: Some(error.into()),
        }
    }

    pub fn contract(&self) -> Option<&ProductContract> {
        self.contract.as_ref()
    }

    /// Message recorded at binding time, if binding failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.contract.is_some()
    }
}
