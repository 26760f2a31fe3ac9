//! Query pipeline: `Idle → Loading → {Success, Failed}` per lookup.
//!
//! A session holds what one page shows: the query text, the last result, the
//! last error, and whether a call is in flight. While a call is in flight the
//! trigger is inert.

use agrichain_types::{
    CONTRACT_NOT_INITIALIZED, EMPTY_PRODUCT_ID, PRODUCT_NOT_FOUND, ProductRecord,
};
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::{info, warn};

use crate::contract::{ContractBinding, ProductContract};
use crate::metrics::METRICS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Why a trigger was refused before any call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyProductId,
    ContractNotInitialized,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Rejection::EmptyProductId => EMPTY_PRODUCT_ID,
            Rejection::ContractNotInitialized => CONTRACT_NOT_INITIALIZED,
        }
    }
}

/// An accepted lookup that must be completed with [`LookupSession::finish`].
#[derive(Debug)]
pub struct PendingLookup {
    pub product_id: String,
    contract: ProductContract,
    started: Instant,
}

impl PendingLookup {
    pub async fn run(&self) -> Result<ProductRecord, crate::Error> {
        self.contract.get_product_details(&self.product_id).await
    }
}

/// Per-page UI state.
#[derive(Debug, Clone, Default)]
pub struct LookupSession {
    query_text: String,
    last_result: Option<ProductRecord>,
    last_error: Option<String>,
    rejection: Option<Rejection>,
    phase: LookupPhase,
}

impl LookupSession {
    /// New session showing the binding error, if any, from the start.
    pub fn mount(binding: &ContractBinding) -> Self {
        Self {
            last_error: binding.error().map(str::to_string),
            ..Self::default()
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn last_result(&self) -> Option<&ProductRecord> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Set when the last trigger was refused without a call.
    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    pub fn phase(&self) -> LookupPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LookupPhase::Loading
    }

    /// Validate and move to `Loading`. Returns `None`, without any call
    /// being issued, when the trigger is inert or a precondition fails.
    pub fn begin(&mut self, binding: &ContractBinding) -> Option<PendingLookup> {
        if self.is_loading() {
            return None;
        }

        let product_id = self.query_text.trim();
        if product_id.is_empty() {
            METRICS.lookup_rejected.fetch_add(1, Ordering::Relaxed);
            self.reject(Rejection::EmptyProductId);
            return None;
        }

        let Some(contract) = binding.contract() else {
            METRICS.lookup_rejected.fetch_add(1, Ordering::Relaxed);
            self.reject(Rejection::ContractNotInitialized);
            return None;
        };

        let pending = PendingLookup {
            product_id: product_id.to_string(),
            contract: contract.clone(),
            started: Instant::now(),
        };
        METRICS.lookups_total.fetch_add(1, Ordering::Relaxed);
        self.last_result = None;
        self.last_error = None;
        self.rejection = None;
        self.phase = LookupPhase::Loading;
        Some(pending)
    }

    /// Apply the outcome of a pending lookup. The cause of a failure is
    /// logged, never stored.
    pub fn finish(&mut self, pending: PendingLookup, outcome: Result<ProductRecord, crate::Error>) {
        METRICS.record_lookup_duration(pending.started);
        match outcome {
            Ok(record) => {
                METRICS.lookup_success.fetch_add(1, Ordering::Relaxed);
                info!(product_id = %pending.product_id, name = %record.name, "Product found");
                self.last_result = Some(record);
                self.last_error = None;
                self.phase = LookupPhase::Success;
            }
            Err(e) => {
                METRICS.lookup_failed.fetch_add(1, Ordering::Relaxed);
                warn!(product_id = %pending.product_id, error = %e, "Product lookup failed");
                self.last_result = None;
                self.last_error = Some(PRODUCT_NOT_FOUND.to_string());
                self.phase = LookupPhase::Failed;
            }
        }
    }

    /// Full cycle: begin, one contract call, finish. Returns the phase after
    /// the cycle; an inert or rejected trigger leaves the phase untouched
    /// (rejections only set the error).
    pub async fn submit(&mut self, binding: &ContractBinding) -> LookupPhase {
        if let Some(pending) = self.begin(binding) {
            let outcome = pending.run().await;
            self.finish(pending, outcome);
        }
        self.phase
    }

    /// Sample-id affordance: fill the query and submit it.
    pub async fn submit_sample(&mut self, binding: &ContractBinding, sample_id: &str) -> LookupPhase {
        self.set_query(sample_id);
        self.submit(binding).await
    }

    #[cfg(test)]
    pub(crate) fn with_result(query: &str, record: ProductRecord) -> Self {
        Self {
            query_text: query.to_string(),
            last_result: Some(record),
            last_error: None,
            rejection: None,
            phase: LookupPhase::Success,
        }
    }

    fn reject(&mut self, rejection: Rejection) {
        self.last_result = None;
        self.last_error = Some(rejection.message().to_string());
        self.rejection = Some(rejection);
    }
}
