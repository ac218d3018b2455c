//! Prometheus metrics for read latency and transaction outcomes.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Contract read latency metric name.
pub const METRIC_READ_LATENCY: &str = "chain_read_latency_ms";
/// Full snapshot refresh latency metric name.
pub const METRIC_REFRESH_LATENCY: &str = "snapshot_refresh_latency_ms";
/// Snapshot refreshes counter metric name.
pub const METRIC_REFRESHES: &str = "snapshot_refreshes_total";
/// Transactions submitted counter metric name.
pub const METRIC_TX_SUBMITTED: &str = "tx_submitted_total";
/// Transactions confirmed counter metric name.
pub const METRIC_TX_CONFIRMED: &str = "tx_confirmed_total";
/// Transactions reverted counter metric name.
pub const METRIC_TX_REVERTED: &str = "tx_reverted_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_READ_LATENCY,
        "Contract read latency in milliseconds"
    );
    describe_histogram!(
        METRIC_REFRESH_LATENCY,
        "Full dashboard snapshot refresh latency in milliseconds"
    );

    describe_counter!(METRIC_REFRESHES, "Total number of snapshot refreshes");
    describe_counter!(METRIC_TX_SUBMITTED, "Total number of transactions submitted");
    describe_counter!(METRIC_TX_CONFIRMED, "Total number of transactions confirmed");
    describe_counter!(METRIC_TX_REVERTED, "Total number of transactions reverted");

    debug!("Metrics initialized");
}

/// Record contract read latency for one read method.
pub fn record_read_latency(start: Instant, method: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_READ_LATENCY, "method" => method).record(latency_ms);
}

/// Record full snapshot refresh latency.
pub fn record_refresh_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_REFRESH_LATENCY).record(latency_ms);
}

/// Increment the snapshot refresh counter.
pub fn inc_refreshes() {
    counter!(METRIC_REFRESHES).increment(1);
}

/// Increment the transactions submitted counter.
pub fn inc_tx_submitted() {
    counter!(METRIC_TX_SUBMITTED).increment(1);
}

/// Increment the transactions confirmed counter.
pub fn inc_tx_confirmed() {
    counter!(METRIC_TX_CONFIRMED).increment(1);
}

/// Increment the transactions reverted counter.
pub fn inc_tx_reverted() {
    counter!(METRIC_TX_REVERTED).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::new("test_metric");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
        // Timer will record on drop
    }
}
