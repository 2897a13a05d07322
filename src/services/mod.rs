pub mod dashboard;
pub mod export;
pub mod ingest;
pub mod upload;

pub use dashboard::DashboardService;
pub use ingest::IngestService;
pub use upload::{UploadOutcome, UploadService};
