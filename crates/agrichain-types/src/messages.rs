//! User-facing messages. One text slot in the UI carries all of them.

/// Binding-time error when no provider was detected. Permanent for the process.
pub const PROVIDER_NOT_INSTALLED: &str =
    "Wallet provider is not installed. Configure an Ethereum RPC provider to use this application.";

/// Lookup attempted before a contract handle was bound.
pub const CONTRACT_NOT_INITIALIZED: &str = "Contract is not initialized!";

pub const EMPTY_PRODUCT_ID: &str = "Please enter a Product ID";

/// Shown for every failed lookup regardless of the underlying cause.
pub const PRODUCT_NOT_FOUND: &str = "Product not found. Please check the Product ID.";

pub const NOT_AVAILABLE: &str = "N/A";

pub const NO_DETAILS: &str = "No additional details available.";
