use crate::error::Result;
use crate::models::dashboard::{DashboardResponse, SightingPage};
use crate::repositories::{HeartbeatRepository, SightingRepository};

pub const PAGE_SIZE: i64 = 20;

#[derive(Clone)]
pub struct DashboardService {
    sightings: SightingRepository,
    heartbeats: HeartbeatRepository,
}

impl DashboardService {
    pub fn new(sightings: SightingRepository, heartbeats: HeartbeatRepository) -> Self {
        Self {
            sightings,
            heartbeats,
        }
    }

    /// Pages are 1-based; anything below 1 is read as 1.
    pub async fn list_sightings(&self, page: i64, per_page: i64) -> Result<SightingPage> {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let offset = (page - 1).saturating_mul(per_page);

        let items = self.sightings.find_page(per_page, offset).await?;
        let total = self.sightings.count().await?;

        Ok(SightingPage {
            items,
            page,
            per_page,
            total,
            pages: (total + per_page - 1) / per_page,
        })
    }

    pub async fn load(&self, page: i64) -> Result<DashboardResponse> {
        let networks = self.list_sightings(page, PAGE_SIZE).await?;
        let heartbeats = self.heartbeats.latest_per_device().await?;
        let unique_entries = self.sightings.count_distinct_devices().await?;

        Ok(DashboardResponse {
            total_entries: networks.total,
            networks,
            heartbeats,
            unique_entries,
        })
    }
}
