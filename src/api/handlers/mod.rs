pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod ingest;

use std::sync::Arc;

use crate::{
    config::Config,
    db::DbPool,
    repositories::{HeartbeatRepository, SightingRepository},
    services::{DashboardService, IngestService, UploadService},
    wigle::WigleUploader,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
    pub sightings: SightingRepository,
    pub ingest: IngestService,
    pub dashboard: DashboardService,
    pub uploads: UploadService,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config, uploader: Arc<dyn WigleUploader>) -> Self {
        let sightings = SightingRepository::new(pool.clone());
        let heartbeats = HeartbeatRepository::new(pool.clone());

        Self {
            config: Arc::new(config),
            ingest: IngestService::new(sightings.clone(), heartbeats.clone()),
            dashboard: DashboardService::new(sightings.clone(), heartbeats),
            uploads: UploadService::new(pool.clone(), uploader),
            sightings,
            pool,
        }
    }
}
