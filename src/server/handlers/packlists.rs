use super::parse_id;
use crate::error::Result;
use crate::server::AppState;
use crate::services::packlists::{PackItemInput, SavePacklist};
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

pub async fn save(
    State(state): State<AppState>,
    Json(input): Json<SavePacklist>,
) -> Result<Json<Value>> {
    let packlist = state.packlists.save(input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Packlist saved successfully",
        "data": packlist
    })))
}

pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>> {
    let packlist = state.packlists.get(&user_id).await?;
    Ok(Json(json!({ "success": true, "data": packlist })))
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(input): Json<PackItemInput>,
) -> Result<Json<Value>> {
    let packlist = state.packlists.add_item(&user_id, input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Item added successfully",
        "data": packlist
    })))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
    Json(input): Json<PackItemInput>,
) -> Result<Json<Value>> {
    let packlist = state
        .packlists
        .update_item(&user_id, parse_id(&item_id)?, input)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Item updated successfully",
        "data": packlist
    })))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let packlist = state
        .packlists
        .delete_item(&user_id, parse_id(&item_id)?)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Item deleted successfully",
        "data": packlist
    })))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>> {
    state.packlists.delete(&user_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Packlist deleted successfully"
    })))
}
