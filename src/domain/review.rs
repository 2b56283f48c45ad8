use crate::resolver::CountryKeyed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const TITLE_MAX_CHARS: usize = 100;
pub const COMMENT_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub country: String,
    pub user: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub helpful: u32,
    #[serde(default)]
    pub not_helpful: u32,
    #[serde(default)]
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CountryKeyed for Review {
    fn country_name(&self) -> &str {
        &self.country
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: usize,
    pub average_rating: f64,
    pub rating_distribution: BTreeMap<u8, usize>,
}

impl ReviewStats {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut rating_distribution: BTreeMap<u8, usize> =
            (MIN_RATING..=MAX_RATING).map(|rating| (rating, 0)).collect();
        for review in reviews {
            *rating_distribution.entry(review.rating).or_insert(0) += 1;
        }

        let average_rating = if reviews.is_empty() {
            0.0
        } else {
            let sum: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
            (sum / reviews.len() as f64 * 10.0).round() / 10.0
        };

        Self {
            total_reviews: reviews.len(),
            average_rating,
            rating_distribution,
        }
    }
}
