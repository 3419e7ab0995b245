//! Metrics collection and exposition.
//!
//! # Metrics
//! - `urlshort_redirects_total` (counter): redirects issued, by path
//! - `urlshort_fallbacks_total` (counter): requests handed to the fallback

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REDIRECTS_TOTAL: &str = "urlshort_redirects_total";
pub const FALLBACKS_TOTAL: &str = "urlshort_fallbacks_total";

/// Install the Prometheus recorder with a scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// `path` is always a key of the redirect table.
pub fn record_redirect(path: &str) {
    metrics::counter!(REDIRECTS_TOTAL, "path" => path.to_owned()).increment(1);
}

pub fn record_fallback() {
    metrics::counter!(FALLBACKS_TOTAL).increment(1);
}
