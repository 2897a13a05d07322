use crate::repositories::NewSighting;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";

/// Sighting as posted by the scanner. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SightingPayload {
    pub mac: Option<String>,
    pub ssid: Option<String>,
    pub auth_mode: Option<String>,
    pub channel: Option<i64>,
    pub rssi: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
}

impl SightingPayload {
    pub fn into_new_sighting(self, first_seen: DateTime<Utc>) -> NewSighting {
        NewSighting {
            mac: self.mac.unwrap_or_else(|| UNKNOWN.into()),
            ssid: self.ssid.unwrap_or_else(|| UNKNOWN.into()),
            auth_mode: self.auth_mode.unwrap_or_else(|| UNKNOWN.into()),
            first_seen,
            channel: self.channel.unwrap_or(0),
            rssi: self.rssi.unwrap_or(0),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            accuracy: self.accuracy,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HeartbeatPayload {
    pub mac: Option<String>,
    pub battery: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatAccepted {
    pub status: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}
