use crate::error::{AppError, Result};
use crate::models::{HeartbeatPayload, SightingPayload};
use crate::repositories::{HeartbeatRepository, SightingRepository};
use chrono::{DateTime, Utc};
use tracing::debug;

#[derive(Clone)]
pub struct IngestService {
    sightings: SightingRepository,
    heartbeats: HeartbeatRepository,
}

impl IngestService {
    pub fn new(sightings: SightingRepository, heartbeats: HeartbeatRepository) -> Self {
        Self {
            sightings,
            heartbeats,
        }
    }

    /// Stores one sighting stamped with the receive time. Returns the new row id.
    pub async fn submit_sighting(&self, payload: SightingPayload) -> Result<i64> {
        let sighting = payload.into_new_sighting(Utc::now());
        let id = self.sightings.insert(&sighting).await?;
        debug!(id, mac = %sighting.mac, ssid = %sighting.ssid, "stored sighting");
        Ok(id)
    }

    /// Stores one heartbeat. `mac` and `battery` are mandatory.
    pub async fn submit_heartbeat(&self, payload: HeartbeatPayload) -> Result<DateTime<Utc>> {
        let mac = payload
            .mac
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| AppError::Validation("mac is required".into()))?;
        let battery = payload
            .battery
            .ok_or_else(|| AppError::Validation("battery is required".into()))?;
        if !battery.is_finite() {
            return Err(AppError::Validation("battery must be a finite number".into()));
        }

        let timestamp = Utc::now();
        self.heartbeats.insert(&mac, timestamp, battery).await?;
        debug!(mac = %mac, battery, "stored heartbeat");
        Ok(timestamp)
    }
}
