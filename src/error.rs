use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// WiGLE answered, but not with 200. The body is kept verbatim.
    #[error("Failed to upload to WiGLE: {body}")]
    UploadRejected { status: u16, body: String },

    /// The request never produced a response (timeout, DNS, refused connection).
    #[error("WiGLE request failed: {0}")]
    UploadTransport(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Session rejected: {0}")]
    Session(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Session(_) => StatusCode::UNAUTHORIZED,
            AppError::UploadTransport(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_)
            | AppError::UploadRejected { .. }
            | AppError::Csv(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Validation(msg) => tracing::debug!("Rejected input: {}", msg),
            AppError::Session(msg) => tracing::debug!("Rejected session: {}", msg),
            AppError::UploadRejected { status, .. } => {
                tracing::error!(status = *status, "WiGLE rejected upload")
            }
            e => tracing::error!("{}", e),
        }

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
