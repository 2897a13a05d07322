#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use wigle_collector::api::{create_router, AppState};
use wigle_collector::config::{ApiConfig, AuthConfig, Config, DbConfig, User, WigleConfig};
use wigle_collector::db::{self, DbPool};
use wigle_collector::error::{AppError, Result};
use wigle_collector::wigle::WigleUploader;

pub const TEST_USER: &str = "admin";
pub const TEST_PASSWORD: &str = "correct horse";
pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config(wigle_api_url: &str) -> Config {
    Config {
        database: DbConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
        },
        api: ApiConfig::default(),
        auth: AuthConfig {
            session_secret: TEST_SECRET.into(),
            session_expiry_hours: 1,
            cookie_secure: false,
            users: vec![User {
                username: TEST_USER.into(),
                password_hash: bcrypt::hash(TEST_PASSWORD, 4).unwrap(),
            }],
        },
        wigle: WigleConfig {
            api_url: wigle_api_url.into(),
            api_key: "AID123:token".into(),
            timeout_secs: 5,
        },
    }
}

/// What the stub uploader answers with.
#[derive(Clone, Copy)]
pub enum StubReply {
    Accept,
    Reject,
    Unreachable,
}

/// Records every CSV it is handed instead of talking to WiGLE.
pub struct StubUploader {
    reply: StubReply,
    pub uploads: Mutex<Vec<(String, String)>>,
}

impl StubUploader {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            uploads: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn last_csv(&self) -> Option<String> {
        self.uploads.lock().unwrap().last().map(|(_, csv)| csv.clone())
    }
}

#[async_trait]
impl WigleUploader for StubUploader {
    async fn upload(&self, file_name: &str, csv: String) -> Result<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), csv));

        match self.reply {
            StubReply::Accept => Ok(()),
            StubReply::Reject => Err(AppError::UploadRejected {
                status: 401,
                body: "bad credentials".into(),
            }),
            StubReply::Unreachable => Err(AppError::UploadTransport(
                "connection failed: refused".into(),
            )),
        }
    }
}

pub async fn setup_server(uploader: Arc<dyn WigleUploader>) -> (TestServer, DbPool) {
    setup_server_with_config(test_config("http://127.0.0.1:9/unused"), uploader).await
}

pub async fn setup_server_with_config(
    config: Config,
    uploader: Arc<dyn WigleUploader>,
) -> (TestServer, DbPool) {
    let pool = db::connect_in_memory().await.unwrap();
    let state = AppState::new(pool.clone(), config, uploader);
    let server = TestServer::new(create_router(state)).unwrap();
    (server, pool)
}

/// Logs in with the test user and returns the `Cookie` header value to send back.
pub async fn login_cookie(server: &TestServer) -> String {
    let response = server
        .post("/login")
        .form(&[("username", TEST_USER), ("password", TEST_PASSWORD)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);

    let set_cookie = response.header(header::SET_COOKIE);
    set_cookie
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub async fn post_sighting(server: &TestServer, mac: &str, ssid: &str, lat: Option<f64>, lon: Option<f64>) {
    server
        .post("/api/wigle_data")
        .json(&json!({
            "mac": mac,
            "ssid": ssid,
            "auth_mode": "WPA2_PSK",
            "channel": 6,
            "rssi": -61,
            "latitude": lat,
            "longitude": lon,
            "altitude": 410.5,
            "accuracy": 4.0
        }))
        .await
        .assert_status(StatusCode::CREATED);
}
