use crate::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;

pub type DbPool = Pool<Sqlite>;

pub async fn connect(url: &str, max_connections: u32) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if !is_in_memory(url) {
        ensure_parent_dir(options.get_filename())?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// SQLite creates the database file but not the directory it lives in.
fn ensure_parent_dir(file: &Path) -> Result<()> {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir).map_err(|e| {
            AppError::Config(format!(
                "failed to create database directory {}: {}",
                dir.display(),
                e
            ))
        }),
        _ => Ok(()),
    }
}

/// Single-connection pool over a private in-memory database. Used by tests.
pub async fn connect_in_memory() -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    // Every new connection would see an empty database, so keep exactly one alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Creates both tables and their indexes if they are missing.
pub async fn init_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS wigle_data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            mac VARCHAR(17) NOT NULL,
            ssid VARCHAR(32) NOT NULL,
            auth_mode VARCHAR(20) NOT NULL,
            first_seen DATETIME NOT NULL,
            channel INTEGER NOT NULL,
            rssi INTEGER NOT NULL,
            latitude REAL,
            longitude REAL,
            altitude REAL,
            accuracy REAL,
            uploaded_to_wigle BOOLEAN NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_wigle_data_first_seen ON wigle_data (first_seen)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS heartbeat (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            mac VARCHAR(17) NOT NULL,
            timestamp DATETIME NOT NULL,
            battery REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_heartbeat_mac_timestamp ON heartbeat (mac, timestamp)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
