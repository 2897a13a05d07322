use crate::db::DbPool;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, Transaction};

// SQLite caps bound parameters per statement; stay well below the oldest limit (999).
const MARK_CHUNK_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NetworkSighting {
    pub id: i64,
    pub mac: String,
    pub ssid: String,
    pub auth_mode: String,
    pub first_seen: DateTime<Utc>,
    pub channel: i64,
    pub rssi: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub uploaded_to_wigle: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSighting {
    pub mac: String,
    pub ssid: String,
    pub auth_mode: String,
    pub first_seen: DateTime<Utc>,
    pub channel: i64,
    pub rssi: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
}

/// Map point for one device: its most recent sighting that carried coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NetworkLocation {
    pub ssid: String,
    pub latitude: f64,
    pub longitude: f64,
}

const SIGHTING_COLUMNS: &str = "id, mac, ssid, auth_mode, first_seen, channel, rssi, \
     latitude, longitude, altitude, accuracy, uploaded_to_wigle";

#[derive(Clone)]
pub struct SightingRepository {
    pool: DbPool,
}

impl SightingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, sighting: &NewSighting) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO wigle_data (
                mac, ssid, auth_mode, first_seen, channel, rssi,
                latitude, longitude, altitude, accuracy, uploaded_to_wigle
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(&sighting.mac)
        .bind(&sighting.ssid)
        .bind(&sighting.auth_mode)
        .bind(sighting.first_seen)
        .bind(sighting.channel)
        .bind(sighting.rssi)
        .bind(sighting.latitude)
        .bind(sighting.longitude)
        .bind(sighting.altitude)
        .bind(sighting.accuracy)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<NetworkSighting>> {
        let query = format!("SELECT {} FROM wigle_data WHERE id = ?", SIGHTING_COLUMNS);
        let sighting = sqlx::query_as::<_, NetworkSighting>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sighting)
    }

    /// Newest first; an offset past the end yields an empty page.
    pub async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<NetworkSighting>> {
        let query = format!(
            "SELECT {} FROM wigle_data ORDER BY first_seen DESC, id DESC LIMIT ? OFFSET ?",
            SIGHTING_COLUMNS
        );
        let sightings = sqlx::query_as::<_, NetworkSighting>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(sightings)
    }

    /// Every sighting in primary-key order.
    pub async fn find_all(&self) -> Result<Vec<NetworkSighting>> {
        let query = format!("SELECT {} FROM wigle_data ORDER BY id", SIGHTING_COLUMNS);
        let sightings = sqlx::query_as::<_, NetworkSighting>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(sightings)
    }

    pub async fn find_pending(&self) -> Result<Vec<NetworkSighting>> {
        let query = format!(
            "SELECT {} FROM wigle_data WHERE uploaded_to_wigle = 0 ORDER BY id",
            SIGHTING_COLUMNS
        );
        let sightings = sqlx::query_as::<_, NetworkSighting>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(sightings)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(id) FROM wigle_data")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_distinct_devices(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT mac) FROM wigle_data")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn latest_locations(&self) -> Result<Vec<NetworkLocation>> {
        let locations = sqlx::query_as::<_, NetworkLocation>(
            r#"
            SELECT w.ssid, w.latitude, w.longitude
            FROM wigle_data w
            WHERE w.id = (
                SELECT w2.id
                FROM wigle_data w2
                WHERE w2.mac = w.mac
                    AND w2.latitude IS NOT NULL
                    AND w2.longitude IS NOT NULL
                ORDER BY w2.first_seen DESC, w2.id DESC
                LIMIT 1
            )
            ORDER BY w.mac
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    /// Flags the given rows as accepted by WiGLE. Rows already flagged are left alone.
    pub async fn mark_uploaded_in_tx(
        tx: &mut Transaction<'_, Sqlite>,
        ids: &[i64],
    ) -> Result<u64> {
        let mut updated = 0;

        for chunk in ids.chunks(MARK_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "UPDATE wigle_data SET uploaded_to_wigle = 1 WHERE uploaded_to_wigle = 0 AND id IN (",
            );
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let result = builder.build().execute(&mut **tx).await?;
            updated += result.rows_affected();
        }

        Ok(updated)
    }

    pub async fn delete_all_in_tx(tx: &mut Transaction<'_, Sqlite>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM wigle_data")
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
