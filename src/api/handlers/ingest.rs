use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::{
    error::Result,
    models::{HeartbeatAccepted, HeartbeatPayload, SightingPayload, StatusResponse},
};

/// POST /api/wigle_data
pub async fn receive_sighting(
    State(state): State<AppState>,
    Json(payload): Json<SightingPayload>,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    state.ingest.submit_sighting(payload).await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::success())))
}

/// POST /api/heartbeat
pub async fn receive_heartbeat(
    State(state): State<AppState>,
    Json(payload): Json<HeartbeatPayload>,
) -> Result<(StatusCode, Json<HeartbeatAccepted>)> {
    let timestamp = state.ingest.submit_heartbeat(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(HeartbeatAccepted {
            status: "success".into(),
            timestamp: timestamp.to_rfc3339(),
        }),
    ))
}
