//! Prometheus metrics (lock-free atomics, zero allocation on hot path).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Lookups ---
    pub lookups_total: AtomicU64,
    pub lookup_success: AtomicU64,
    pub lookup_failed: AtomicU64,
    /// Rejected before any call: empty id or unbound contract.
    pub lookup_rejected: AtomicU64,

    // --- Latency (μs, updated via CAS) ---
    pub lookup_duration_us_sum: AtomicU64,
    pub lookup_duration_us_max: AtomicU64,

    // --- RPC ---
    pub rpc_errors: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            lookups_total: AtomicU64::new(0),
            lookup_success: AtomicU64::new(0),
            lookup_failed: AtomicU64::new(0),
            lookup_rejected: AtomicU64::new(0),
            lookup_duration_us_sum: AtomicU64::new(0),
            lookup_duration_us_max: AtomicU64::new(0),
            rpc_errors: AtomicU64::new(0),
        }
    }

    pub fn record_lookup_duration(&self, start: Instant) {
        let us = start.elapsed().as_micros() as u64;
        self.lookup_duration_us_sum.fetch_add(us, Ordering::Relaxed);
        // CAS loop for max tracking
        let mut cur = self.lookup_duration_us_max.load(Ordering::Relaxed);
        while us > cur {
            match self.lookup_duration_us_max.compare_exchange_weak(
                cur,
                us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self, contract_bound: bool, uptime_secs: u64) -> String {
        let lookups_total = self.lookups_total.load(Ordering::Relaxed);
        let lookup_success = self.lookup_success.load(Ordering::Relaxed);
        let lookup_failed = self.lookup_failed.load(Ordering::Relaxed);
        let lookup_rejected = self.lookup_rejected.load(Ordering::Relaxed);
        let dur_sum = self.lookup_duration_us_sum.load(Ordering::Relaxed);
        let dur_max = self.lookup_duration_us_max.swap(0, Ordering::Relaxed);
        let rpc_errors = self.rpc_errors.load(Ordering::Relaxed);
        let bound = u8::from(contract_bound);

        // Convert μs to seconds for Prometheus conventions
        let dur_sum_s = dur_sum as f64 / 1_000_000.0;
        let dur_max_s = dur_max as f64 / 1_000_000.0;

        format!(
            "\
# HELP agrichain_lookups_total Lookups triggered by users.\n\
# TYPE agrichain_lookups_total counter\n\
agrichain_lookups_total {lookups_total}\n\
# HELP agrichain_lookup_success_total Lookups that returned a product.\n\
# TYPE agrichain_lookup_success_total counter\n\
agrichain_lookup_success_total {lookup_success}\n\
# HELP agrichain_lookup_failed_total Lookups whose contract call failed.\n\
# TYPE agrichain_lookup_failed_total counter\n\
agrichain_lookup_failed_total {lookup_failed}\n\
# HELP agrichain_lookup_rejected_total Lookups rejected before calling the contract.\n\
# TYPE agrichain_lookup_rejected_total counter\n\
agrichain_lookup_rejected_total {lookup_rejected}\n\
# HELP agrichain_lookup_duration_seconds_sum Total contract call time (seconds).\n\
# TYPE agrichain_lookup_duration_seconds_sum counter\n\
agrichain_lookup_duration_seconds_sum {dur_sum_s:.6}\n\
# HELP agrichain_lookup_duration_seconds_max Max contract call time since last scrape (seconds).\n\
# TYPE agrichain_lookup_duration_seconds_max gauge\n\
agrichain_lookup_duration_seconds_max {dur_max_s:.6}\n\
# HELP agrichain_rpc_errors_total JSON-RPC errors.\n\
# TYPE agrichain_rpc_errors_total counter\n\
agrichain_rpc_errors_total {rpc_errors}\n\
# HELP agrichain_contract_bound Whether a contract handle is bound.\n\
# TYPE agrichain_contract_bound gauge\n\
agrichain_contract_bound {bound}\n\
# HELP agrichain_uptime_seconds Seconds since start.\n\
# TYPE agrichain_uptime_seconds gauge\n\
agrichain_uptime_seconds {uptime_secs}\n"
        )
    }
}
