use crate::repositories::{HeartbeatPing, NetworkSighting};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SightingPage {
    pub items: Vec<NetworkSighting>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub networks: SightingPage,
    pub heartbeats: Vec<HeartbeatPing>,
    pub unique_entries: i64,
    pub total_entries: i64,
}
