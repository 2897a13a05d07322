use axum::{
    extract::{Query, State},
    Json,
};
use std::collections::HashMap;

use super::AppState;
use crate::{error::Result, models::DashboardResponse, repositories::NetworkLocation};

/// GET /?page=N
/// Unparsable page numbers fall back to the first page.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<DashboardResponse>> {
    let page: i64 = params
        .get("page")
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(1);

    let dashboard = state.dashboard.load(page).await?;
    Ok(Json(dashboard))
}

/// GET /api/network_data
pub async fn network_data(State(state): State<AppState>) -> Result<Json<Vec<NetworkLocation>>> {
    let locations = state.sightings.latest_locations().await?;
    Ok(Json(locations))
}
