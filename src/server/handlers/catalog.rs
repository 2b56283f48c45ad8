//! Read-only travel collections. Country-scoped routes resolve the
//! `:locator` path segment through the shared resolver.

use super::parse_id;
use crate::domain::{Attraction, Country, Destination, FoodView, FunFact};
use crate::error::{GuideError, Result};
use crate::resolver::Locator;
use crate::server::AppState;
use crate::services::FactCollection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn list_countries(State(state): State<AppState>) -> Result<Json<Vec<Country>>> {
    Ok(Json(state.catalog.countries().await?))
}

pub async fn country(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Country>> {
    let locator = Locator::parse(&locator)?;
    Ok(Json(state.catalog.country(&locator).await?))
}

pub async fn list_attractions(State(state): State<AppState>) -> Result<Json<Vec<Attraction>>> {
    Ok(Json(state.catalog.attractions().await?))
}

pub async fn attractions_by_country(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Vec<Attraction>>> {
    let locator = Locator::parse(&locator)?;
    Ok(Json(state.catalog.attractions_for(&locator).await?.records))
}

pub async fn attraction_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Attraction>> {
    Ok(Json(state.catalog.attraction_by_id(parse_id(&id)?).await?))
}

pub async fn list_foods(State(state): State<AppState>) -> Result<Json<Vec<FoodView>>> {
    Ok(Json(state.catalog.foods().await?))
}

pub async fn foods_by_country(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Vec<FoodView>>> {
    let locator = Locator::parse(&locator)?;
    Ok(Json(state.catalog.foods_for(&locator).await?.records))
}

pub async fn food_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FoodView>> {
    Ok(Json(state.catalog.food_by_id(parse_id(&id)?).await?))
}

/// Culture, best time and local phrases share one shape of routes.
pub async fn list_facts<T: FactCollection>(State(state): State<AppState>) -> Result<Json<Vec<T>>> {
    Ok(Json(state.catalog.facts::<T>().await?))
}

pub async fn facts_by_country<T: FactCollection>(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Vec<T>>> {
    let locator = Locator::parse(&locator)?;
    Ok(Json(state.catalog.facts_for::<T>(&locator).await?.records))
}

pub async fn fact_by_id<T: FactCollection>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>> {
    Ok(Json(state.catalog.fact_by_id::<T>(parse_id(&id)?).await?))
}

// Emergency and fun facts answer inside a `{success, data}` envelope.

pub async fn list_emergency(State(state): State<AppState>) -> Result<Json<Value>> {
    let emergency = state
        .catalog
        .facts::<crate::domain::Emergency>()
        .await?;
    Ok(Json(json!({ "success": true, "data": emergency })))
}

pub async fn emergency_by_country(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Value>> {
    let locator = Locator::parse(&locator)?;
    let resolution = state
        .catalog
        .facts_for::<crate::domain::Emergency>(&locator)
        .await?;
    let emergency = resolution
        .first()
        .ok_or_else(|| GuideError::not_found("Emergency information not found"))?;
    Ok(Json(json!({ "success": true, "data": emergency })))
}

pub async fn list_fun_facts(State(state): State<AppState>) -> Result<Json<Value>> {
    let facts = state.catalog.facts::<FunFact>().await?;
    Ok(Json(json!({ "success": true, "data": facts, "count": facts.len() })))
}

pub async fn fun_facts_by_country(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Value>> {
    let locator = Locator::parse(&locator)?;
    let facts = state.catalog.facts_for::<FunFact>(&locator).await?.records;
    Ok(Json(json!({ "success": true, "data": facts, "count": facts.len() })))
}

pub async fn random_fun_fact(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<Value>> {
    let locator = Locator::parse(&locator)?;
    let fact = state.catalog.random_fun_fact(&locator).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "country": fact.country, "funFact": fact.fun_fact }
    })))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn search_destinations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Destination>>> {
    Ok(Json(state.catalog.search_destinations(&params.q).await?))
}
