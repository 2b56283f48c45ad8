//! Metrics for the travel API.
//!
//! Each area (resolver, http) owns its metric names in a dedicated submodule.
//! Names follow `travel_{area}_{metric}` with a `_total` suffix for counters.

pub mod http;
pub mod registry;
pub mod resolver;

pub use http::HttpMetrics;
pub use resolver::ResolverMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use tracing::{info, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Idempotent.
///
/// Without a recorder the `record_*` helpers are no-ops, so tests and the
/// CLI may skip this.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("Prometheus handle was already set");
            }
            registry::register_all_metrics();
            info!("Prometheus recorder installed");
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    });
}

/// Prometheus text exposition of everything recorded so far.
pub fn render() -> Option<String> {
    HANDLE.get().map(PrometheusHandle::render)
}

/// Metric families owned by one area of the service.
pub trait AreaMetrics {
    /// Describe and pre-register every metric of the area.
    fn register_metrics();

    fn area_name() -> &'static str;

    fn metrics_documentation() -> Vec<MetricDoc>;
}

#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Build a metric name following `travel_{area}_{name}[_total]`.
macro_rules! area_metric {
    (counter, $area:literal, $name:literal) => {
        concat!("travel_", $area, "_", $name, "_total")
    };
    (histogram, $area:literal, $name:literal) => {
        concat!("travel_", $area, "_", $name)
    };
}

pub(crate) use area_metric;
