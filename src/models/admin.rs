use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub status: String,
    pub deleted_records: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_records: Option<u64>,
}

impl UploadResponse {
    pub fn nothing_to_do() -> Self {
        Self {
            status: "info".into(),
            message: "No new data to upload".into(),
            uploaded_records: None,
        }
    }

    pub fn uploaded(records: u64) -> Self {
        Self {
            status: "success".into(),
            message: "Data uploaded to WiGLE successfully".into(),
            uploaded_records: Some(records),
        }
    }
}
