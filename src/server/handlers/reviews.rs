use super::parse_id;
use crate::error::Result;
use crate::resolver::Locator;
use crate::server::AppState;
use crate::services::reviews::{HelpfulVote, NewReview, ReviewOwner, ReviewUpdate};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub async fn by_country(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Value>> {
    let locator = Locator::parse(&locator)?;
    let reviews = state.reviews.for_country(&locator).await?;
    Ok(Json(json!({ "success": true, "data": reviews, "count": reviews.len() })))
}

pub async fn stats(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Value>> {
    let locator = Locator::parse(&locator)?;
    let stats = state.reviews.stats(&locator).await?;
    Ok(Json(json!({ "success": true, "data": stats })))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewReview>,
) -> Result<(StatusCode, Json<Value>)> {
    let review = state.reviews.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Review created successfully",
            "data": review
        })),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ReviewUpdate>,
) -> Result<Json<Value>> {
    let review = state.reviews.update(parse_id(&id)?, input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Review updated successfully",
        "data": review
    })))
}

/// The owner may arrive as a JSON body; a missing body is treated as no owner.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<ReviewOwner>>,
) -> Result<Json<Value>> {
    let owner = body.map(|Json(owner)| owner).unwrap_or_default();
    state.reviews.delete(parse_id(&id)?, owner).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Review deleted successfully"
    })))
}

pub async fn rate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(vote): Json<HelpfulVote>,
) -> Result<Json<Value>> {
    let review = state.reviews.rate(parse_id(&id)?, vote).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Review rated successfully",
        "data": review
    })))
}
