use crate::db::DbPool;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HeartbeatPing {
    pub id: i64,
    pub mac: String,
    pub timestamp: DateTime<Utc>,
    pub battery: f64,
}

#[derive(Clone)]
pub struct HeartbeatRepository {
    pool: DbPool,
}

impl HeartbeatRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, mac: &str, timestamp: DateTime<Utc>, battery: f64) -> Result<i64> {
        let result = sqlx::query("INSERT INTO heartbeat (mac, timestamp, battery) VALUES (?, ?, ?)")
            .bind(mac)
            .bind(timestamp)
            .bind(battery)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// One ping per device: the newest one. Equal timestamps resolve to the highest id.
    pub async fn latest_per_device(&self) -> Result<Vec<HeartbeatPing>> {
        let pings = sqlx::query_as::<_, HeartbeatPing>(
            r#"
            SELECT h.id, h.mac, h.timestamp, h.battery
            FROM heartbeat h
            WHERE h.id = (
                SELECT h2.id
                FROM heartbeat h2
                WHERE h2.mac = h.mac
                ORDER BY h2.timestamp DESC, h2.id DESC
                LIMIT 1
            )
            ORDER BY h.mac
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pings)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM heartbeat")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
