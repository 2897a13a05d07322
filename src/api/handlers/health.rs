use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::AppState;
use crate::error::Result;

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}
