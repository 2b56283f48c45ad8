//! Country resolution metrics: which tier answered, and how often nothing did.

use super::{area_metric, AreaMetrics, MetricDoc, MetricType};
use crate::domain::Domain;
use crate::resolver::MatchTier;

pub struct ResolverMetrics;

impl ResolverMetrics {
    pub fn record_match(domain: Domain, tier: MatchTier) {
        ::metrics::counter!(
            area_metric!(counter, "resolver", "matches"),
            "domain" => domain.as_str(),
            "tier" => tier.as_str()
        )
        .increment(1);
    }

    pub fn record_miss(domain: Domain) {
        ::metrics::counter!(
            area_metric!(counter, "resolver", "misses"),
            "domain" => domain.as_str()
        )
        .increment(1);
    }
}

impl AreaMetrics for ResolverMetrics {
    fn register_metrics() {
        ::metrics::describe_counter!(
            area_metric!(counter, "resolver", "matches"),
            "Country lookups answered, by domain and matching tier"
        );
        ::metrics::describe_counter!(
            area_metric!(counter, "resolver", "misses"),
            "Country lookups that matched no record"
        );
    }

    fn area_name() -> &'static str {
        "resolver"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: area_metric!(counter, "resolver", "matches"),
                metric_type: MetricType::Counter,
                help: "Country lookups answered, by domain and matching tier",
                labels: vec!["domain", "tier"],
            },
            MetricDoc {
                name: area_metric!(counter, "resolver", "misses"),
                metric_type: MetricType::Counter,
                help: "Country lookups that matched no record",
                labels: vec!["domain"],
            },
        ]
    }
}
