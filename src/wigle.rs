use crate::config::WigleConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{multipart, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Destination for rendered CSV files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WigleUploader: Send + Sync {
    /// Ok only when WiGLE answered 200. Any other answer is `UploadRejected`;
    /// failing to get an answer at all is `UploadTransport`.
    async fn upload(&self, file_name: &str, csv: String) -> Result<()>;
}

#[derive(Clone)]
pub struct WigleClient {
    http_client: reqwest::Client,
    api_url: String,
    authorization: String,
}

impl WigleClient {
    pub fn new(config: &WigleConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            authorization: basic_authorization(&config.api_key),
        })
    }
}

/// `Basic <base64(credential)>`; the credential is used as configured.
pub fn basic_authorization(credential: &str) -> String {
    format!("Basic {}", STANDARD.encode(credential.as_bytes()))
}

#[async_trait]
impl WigleUploader for WigleClient {
    async fn upload(&self, file_name: &str, csv: String) -> Result<()> {
        let size = csv.len();
        let part = multipart::Part::text(csv)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| AppError::Internal(format!("invalid multipart MIME type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        debug!(url = %self.api_url, bytes = size, "posting CSV to WiGLE");

        let response = self
            .http_client
            .post(&self.api_url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::UploadTransport(describe_transport_error(&e)))?;

        let status = response.status();
        let body = response.text().await;

        if status != StatusCode::OK {
            let body = body.unwrap_or_else(|e| format!("<unreadable response body: {}>", e));
            return Err(AppError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        // The status line is the acceptance; a broken body does not undo it.
        if let Err(e) = body {
            warn!(error = %e, "WiGLE accepted upload but its response body was unreadable");
        }

        info!(bytes = size, "WiGLE accepted upload");
        Ok(())
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization_encodes_credential() {
        assert_eq!(
            basic_authorization("AID123:secret"),
            "Basic QUlEMTIzOnNlY3JldA=="
        );
        assert_eq!(basic_authorization(""), "Basic ");
    }

    #[test]
    fn test_client_uses_configured_url() {
        let config = WigleConfig {
            api_url: "http://127.0.0.1:9/upload".into(),
            api_key: "key".into(),
            timeout_secs: 1,
        };
        let client = WigleClient::new(&config).unwrap();
        assert_eq!(client.api_url, "http://127.0.0.1:9/upload");
        assert_eq!(client.authorization, "Basic a2V5");
    }
}
