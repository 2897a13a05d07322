use axum::{extract::State, Extension, Json};
use tracing::info;

use super::AppState;
use crate::{
    api::middleware::AuthenticatedUser,
    error::Result,
    models::{ClearResponse, UploadResponse},
    repositories::SightingRepository,
    services::UploadOutcome,
};

/// POST /clear_database
/// Deletes every sighting; heartbeats stay.
pub async fn clear_database(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ClearResponse>> {
    // Dropping the transaction on an error path rolls it back.
    let mut tx = state.pool.begin().await?;
    let deleted = SightingRepository::delete_all_in_tx(&mut tx).await?;
    tx.commit().await?;

    info!(deleted, username = %user.username, "cleared all sightings");

    Ok(Json(ClearResponse {
        status: "success".into(),
        deleted_records: deleted,
    }))
}

/// POST /upload_to_wigle
pub async fn upload_to_wigle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UploadResponse>> {
    info!(username = %user.username, "WiGLE upload requested");
    let response = match state.uploads.upload_pending().await? {
        UploadOutcome::NothingPending => UploadResponse::nothing_to_do(),
        UploadOutcome::Uploaded { records } => UploadResponse::uploaded(records),
    };

    Ok(Json(response))
}
