use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::{
    error::Result,
    services::export::{render_csv, CSV_FILE_NAME, EXPORT_HEADER},
};

/// GET /wigle_data
/// Every sighting, uploaded or not, as a WiGLE CSV attachment.
pub async fn download_csv(State(state): State<AppState>) -> Result<Response> {
    let rows = state.sightings.find_all().await?;
    let document = render_csv(&rows, EXPORT_HEADER)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", CSV_FILE_NAME),
            ),
        ],
        document,
    )
        .into_response())
}
