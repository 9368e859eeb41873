use std::net::SocketAddr;
use tracing::{info, warn};

pub const CATALOG_FETCH_TOTAL: &str = "catalog_fetch_total";
pub const CATALOG_FETCH_ERRORS_TOTAL: &str = "catalog_fetch_errors_total";
pub const CATALOG_CACHE_HITS_TOTAL: &str = "catalog_cache_hits_total";
pub const CATALOG_RECORDS_REJECTED_TOTAL: &str = "catalog_records_rejected_total";
pub const SUBMISSIONS_TOTAL: &str = "submissions_total";

/// Install the Prometheus exporter on `port`.
/// Without an installed recorder the counters below are no-ops.
pub fn init_metrics(port: u16) {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed (possibly already installed): {}", e),
    }
}

pub fn catalog_fetched() {
    metrics::counter!(CATALOG_FETCH_TOTAL).increment(1);
}

pub fn catalog_fetch_failed() {
    metrics::counter!(CATALOG_FETCH_ERRORS_TOTAL).increment(1);
}

pub fn cache_hit() {
    metrics::counter!(CATALOG_CACHE_HITS_TOTAL).increment(1);
}

pub fn records_rejected(count: usize) {
    metrics::counter!(CATALOG_RECORDS_REJECTED_TOTAL).increment(count as u64);
}

pub fn submission(outcome: &'static str) {
    metrics::counter!(SUBMISSIONS_TOTAL, "outcome" => outcome).increment(1);
}
