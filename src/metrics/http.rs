//! Request metrics, labelled by route family (`/api/foods/...` -> `foods`).

use super::{area_metric, AreaMetrics, MetricDoc, MetricType};

pub struct HttpMetrics;

/// First path segment after `/api`, or the top-level segment otherwise.
pub fn route_family(path: &str) -> &str {
    let mut segments = path.trim_start_matches('/').split('/');
    match segments.next() {
        Some("api") => segments.next().filter(|s| !s.is_empty()).unwrap_or("api"),
        Some("") | None => "root",
        Some(first) => first,
    }
}

impl HttpMetrics {
    pub fn record_request(path: &str, status: u16, duration_secs: f64) {
        let family = route_family(path).to_string();
        ::metrics::counter!(
            area_metric!(counter, "http", "requests"),
            "route" => family.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        ::metrics::histogram!(
            area_metric!(histogram, "http", "request_duration_seconds"),
            "route" => family
        )
        .record(duration_secs);
    }
}

impl AreaMetrics for HttpMetrics {
    fn register_metrics() {
        ::metrics::describe_counter!(
            area_metric!(counter, "http", "requests"),
            "HTTP requests served, by route family and status"
        );
        ::metrics::describe_histogram!(
            area_metric!(histogram, "http", "request_duration_seconds"),
            "HTTP request latency"
        );
    }

    fn area_name() -> &'static str {
        "http"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: area_metric!(counter, "http", "requests"),
                metric_type: MetricType::Counter,
                help: "HTTP requests served, by route family and status",
                labels: vec!["route", "status"],
            },
            MetricDoc {
                name: area_metric!(histogram, "http", "request_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "HTTP request latency",
                labels: vec!["route"],
            },
        ]
    }
}
