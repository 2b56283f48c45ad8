use super::parse_id;
use crate::error::Result;
use crate::server::AppState;
use crate::services::accounts::{LoginInput, SignupInput};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> Result<(StatusCode, Json<Value>)> {
    let user = state.accounts.signup(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "user": user
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<Value>> {
    let user = state.accounts.login(input).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "user": user
    })))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let users = state.accounts.list().await?;
    Ok(Json(json!({ "success": true, "count": users.len(), "data": users })))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let user = state.accounts.get(parse_id(&id)?).await?;
    Ok(Json(json!({ "success": true, "data": user })))
}
