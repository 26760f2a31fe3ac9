//! Application state shared across handlers.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::Config;
use crate::contract::ContractBinding;
use crate::provider::{self, Provider};
use crate::view::Theme;

/// Shared application state. The binding is made once and never re-evaluated.
pub struct AppState {
    pub config: Config,
    pub binding: ContractBinding,
    pub theme: Theme,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Detect the provider from configuration and bind the contract.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let provider = provider::detect(&config)?;
        Ok(Self::with_provider(config, provider))
    }

    /// Bind the contract to an explicitly supplied provider.
    pub fn with_provider(config: Config, provider: Option<Arc<dyn Provider>>) -> Self {
        let binding = ContractBinding::bind(provider, &config.contract_address);
        let theme = Theme::from_name(&config.theme);
        info!(bound = binding.is_bound(), theme = ?theme, "Application state ready");
        Self {
            config,
            binding,
            theme,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }
}
