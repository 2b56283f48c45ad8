use super::catalog::Catalog;
use crate::domain::review::{COMMENT_MAX_CHARS, MAX_RATING, MIN_RATING, TITLE_MAX_CHARS};
use crate::domain::{Domain, Review, ReviewStats};
use crate::error::{GuideError, Result};
use crate::resolver::{FlatSource, Locator, Resolution};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Reviews returned per country, newest first.
pub const COUNTRY_PAGE_LIMIT: usize = 50;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub country: Option<String>,
    pub user: Option<String>,
    pub rating: Option<f64>,
    pub title: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub user: Option<String>,
    pub rating: Option<f64>,
    pub title: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewOwner {
    pub user: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HelpfulVote {
    pub helpful: Option<serde_json::Value>,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_rating(rating: f64) -> Result<u8> {
    let range = f64::from(MIN_RATING)..=f64::from(MAX_RATING);
    if !range.contains(&rating) || rating.fract() != 0.0 {
        return Err(GuideError::Validation(format!(
            "Rating must be a whole number between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(rating as u8)
}

fn check_title(title: String) -> Result<String> {
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(GuideError::Validation(format!(
            "Title cannot be more than {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(title)
}

fn check_comment(comment: String) -> Result<String> {
    if comment.chars().count() > COMMENT_MAX_CHARS {
        return Err(GuideError::Validation(format!(
            "Comment cannot be more than {COMMENT_MAX_CHARS} characters"
        )));
    }
    Ok(comment)
}

fn require_owner(review: &Review, user: Option<&str>) -> Result<()> {
    match trimmed(user) {
        Some(user) if user == review.user => Ok(()),
        _ => Err(GuideError::Forbidden(
            "You can only modify your own reviews".to_string(),
        )),
    }
}

pub struct ReviewService {
    catalog: Arc<Catalog>,
}

impl ReviewService {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    async fn resolve(&self, locator: &Locator) -> Result<Resolution<Review>> {
        let reviews = self.catalog.storage().get_all_reviews().await?;
        let source = FlatSource::new(reviews);
        Ok(self.catalog.lookup(Domain::Reviews, locator, &source))
    }

    /// Newest reviews for a country. No reviews is an empty list, not a miss.
    pub async fn for_country(&self, locator: &Locator) -> Result<Vec<Review>> {
        let mut reviews = self.resolve(locator).await?.records;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews.truncate(COUNTRY_PAGE_LIMIT);
        Ok(reviews)
    }

    pub async fn stats(&self, locator: &Locator) -> Result<ReviewStats> {
        let resolution = self.resolve(locator).await?;
        Ok(ReviewStats::from_reviews(&resolution.records))
    }

    pub async fn create(&self, input: NewReview) -> Result<Review> {
        let (Some(country), Some(user), Some(rating), Some(title), Some(comment)) = (
            trimmed(input.country.as_deref()),
            trimmed(input.user.as_deref()),
            input.rating,
            trimmed(input.title.as_deref()),
            trimmed(input.comment.as_deref()),
        ) else {
            return Err(GuideError::InputMissing(
                "All fields are required".to_string(),
            ));
        };

        let now = Utc::now();
        let mut review = Review {
            id: None,
            country,
            user,
            rating: check_rating(rating)?,
            title: check_title(title)?,
            comment: check_comment(comment)?,
            helpful: 0,
            not_helpful: 0,
            verified: false,
            created_at: now,
            updated_at: now,
        };
        self.catalog.storage().create_review(&mut review).await?;
        info!("New review for {} by {}", review.country, review.user);
        Ok(review)
    }

    async fn existing(&self, review_id: Uuid) -> Result<Review> {
        self.catalog
            .storage()
            .get_review_by_id(review_id)
            .await?
            .ok_or_else(|| GuideError::not_found("Review not found"))
    }

    pub async fn update(&self, review_id: Uuid, input: ReviewUpdate) -> Result<Review> {
        let mut review = self.existing(review_id).await?;
        require_owner(&review, input.user.as_deref())?;

        if let Some(rating) = input.rating {
            review.rating = check_rating(rating)?;
        }
        if let Some(title) = trimmed(input.title.as_deref()) {
            review.title = check_title(title)?;
        }
        if let Some(comment) = trimmed(input.comment.as_deref()) {
            review.comment = check_comment(comment)?;
        }
        review.updated_at = Utc::now();

        self.catalog.storage().update_review(&review).await?;
        Ok(review)
    }

    pub async fn delete(&self, review_id: Uuid, owner: ReviewOwner) -> Result<()> {
        let review = self.existing(review_id).await?;
        require_owner(&review, owner.user.as_deref())?;
        if !self.catalog.storage().delete_review(review_id).await? {
            return Err(GuideError::not_found("Review not found"));
        }
        info!("Deleted review {}", review_id);
        Ok(())
    }

    pub async fn rate(&self, review_id: Uuid, vote: HelpfulVote) -> Result<Review> {
        let helpful = vote
            .helpful
            .as_ref()
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| {
                GuideError::Validation("Helpful parameter must be true or false".to_string())
            })?;

        let mut review = self.existing(review_id).await?;
        if helpful {
            review.helpful += 1;
        } else {
            review.not_helpful += 1;
        }
        self.catalog.storage().update_review(&review).await?;
        Ok(review)
    }
}
