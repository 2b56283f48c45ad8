//! Registers every area's metrics and detects name collisions early.

use super::{AreaMetrics, MetricDoc};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub fn register_all_metrics() {
    let mut all_metrics = HashMap::new();

    register_area_metrics::<super::resolver::ResolverMetrics>(&mut all_metrics);
    register_area_metrics::<super::http::HttpMetrics>(&mut all_metrics);

    info!("Registered {} metrics", all_metrics.len());
}

fn register_area_metrics<T: AreaMetrics>(all_metrics: &mut HashMap<&'static str, MetricDoc>) {
    T::register_metrics();
    let area = T::area_name();

    for doc in T::metrics_documentation() {
        if area_of(doc.name) != Some(area) {
            warn!("Metric '{}' is outside the '{}' area prefix", doc.name, area);
        }
        if all_metrics.contains_key(doc.name) {
            warn!("Metric '{}' of area '{}' is already registered", doc.name, area);
            continue;
        }
        debug!(
            "{} {:?} [{}]: {}",
            doc.name,
            doc.metric_type,
            doc.labels.join(","),
            doc.help
        );
        all_metrics.insert(doc.name, doc);
    }
}

/// Area prefix of a metric name (`travel_http_requests_total` -> `http`).
fn area_of(metric_name: &str) -> Option<&str> {
    let stripped = metric_name.strip_prefix("travel_")?;
    stripped.split('_').next().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{HttpMetrics, ResolverMetrics};

    #[test]
    fn test_metric_names_carry_their_area() {
        for doc in ResolverMetrics::metrics_documentation() {
            assert_eq!(area_of(doc.name), Some(ResolverMetrics::area_name()), "{}", doc.name);
        }
        for doc in HttpMetrics::metrics_documentation() {
            assert_eq!(area_of(doc.name), Some(HttpMetrics::area_name()), "{}", doc.name);
        }
        assert_eq!(area_of("travel_resolver_matches_total"), Some("resolver"));
        assert_eq!(area_of("other_metric"), None);
    }
}
