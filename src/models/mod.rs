pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod ingest;

pub use admin::{ClearResponse, UploadResponse};
pub use auth::{LoginForm, NextQuery};
pub use dashboard::{DashboardResponse, SightingPage};
pub use ingest::{HeartbeatAccepted, HeartbeatPayload, SightingPayload, StatusResponse};
