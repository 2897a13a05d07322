use crate::db::DbPool;
use crate::error::Result;
use crate::repositories::SightingRepository;
use crate::services::export::{render_csv, CSV_FILE_NAME, UPLOAD_HEADER};
use crate::wigle::WigleUploader;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    NothingPending,
    Uploaded { records: u64 },
}

#[derive(Clone)]
pub struct UploadService {
    pool: DbPool,
    sightings: SightingRepository,
    uploader: Arc<dyn WigleUploader>,
}

impl UploadService {
    pub fn new(pool: DbPool, uploader: Arc<dyn WigleUploader>) -> Self {
        Self {
            sightings: SightingRepository::new(pool.clone()),
            pool,
            uploader,
        }
    }

    /// Pushes every not-yet-uploaded sighting to WiGLE. Rows are flagged only
    /// after WiGLE confirms, and only the rows that were actually sent.
    pub async fn upload_pending(&self) -> Result<UploadOutcome> {
        let pending = self.sightings.find_pending().await?;
        if pending.is_empty() {
            info!("no pending sightings; skipping WiGLE upload");
            return Ok(UploadOutcome::NothingPending);
        }

        let ids: Vec<i64> = pending.iter().map(|s| s.id).collect();
        let document = render_csv(&pending, UPLOAD_HEADER)?;

        if let Err(e) = self.uploader.upload(CSV_FILE_NAME, document).await {
            warn!(pending = ids.len(), error = %e, "WiGLE upload failed; no rows flagged");
            return Err(e);
        }

        let mut tx = self.pool.begin().await?;
        let records = SightingRepository::mark_uploaded_in_tx(&mut tx, &ids).await?;
        tx.commit().await?;

        info!(records, "flagged sightings as uploaded to WiGLE");
        Ok(UploadOutcome::Uploaded { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use crate::error::AppError;
    use crate::repositories::NewSighting;
    use crate::wigle::MockWigleUploader;
    use chrono::Utc;

    async fn seed(repo: &SightingRepository, mac: &str) -> i64 {
        repo.insert(&NewSighting {
            mac: mac.into(),
            ssid: "net".into(),
            auth_mode: "WPA2".into(),
            first_seen: Utc::now(),
            channel: 1,
            rssi: -40,
            latitude: None,
            longitude: None,
            altitude: None,
            accuracy: None,
        })
        .await
        .unwrap()
    }

    async fn flags(repo: &SightingRepository) -> Vec<(i64, bool)> {
        repo.find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| (s.id, s.uploaded_to_wigle))
            .collect()
    }

    #[tokio::test]
    async fn test_nothing_pending_makes_no_call() {
        let pool = connect_in_memory().await.unwrap();
        let mut uploader = MockWigleUploader::new();
        uploader.expect_upload().never();

        let service = UploadService::new(pool, Arc::new(uploader));
        assert_eq!(
            service.upload_pending().await.unwrap(),
            UploadOutcome::NothingPending
        );
    }

    #[tokio::test]
    async fn test_all_uploaded_makes_no_call_and_keeps_flags() {
        let pool = connect_in_memory().await.unwrap();
        let repo = SightingRepository::new(pool.clone());
        let id = seed(&repo, "AA").await;
        let mut tx = pool.begin().await.unwrap();
        SightingRepository::mark_uploaded_in_tx(&mut tx, &[id])
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let mut uploader = MockWigleUploader::new();
        uploader.expect_upload().never();

        let service = UploadService::new(pool, Arc::new(uploader));
        assert_eq!(
            service.upload_pending().await.unwrap(),
            UploadOutcome::NothingPending
        );
        assert_eq!(flags(&repo).await, vec![(id, true)]);
    }

    #[tokio::test]
    async fn test_success_flags_pending_rows_only() {
        let pool = connect_in_memory().await.unwrap();
        let repo = SightingRepository::new(pool.clone());
        let done = seed(&repo, "AA").await;
        let mut tx = pool.begin().await.unwrap();
        SightingRepository::mark_uploaded_in_tx(&mut tx, &[done])
            .await
            .unwrap();
        tx.commit().await.unwrap();
        let a = seed(&repo, "BB").await;
        let b = seed(&repo, "CC").await;

        let mut uploader = MockWigleUploader::new();
        uploader
            .expect_upload()
            .withf(|file_name, csv| {
                file_name.to_string() == CSV_FILE_NAME
                    && csv.starts_with(UPLOAD_HEADER)
                    && csv.contains("BB,")
                    && csv.contains("CC,")
                    && !csv.contains("\nAA,")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UploadService::new(pool, Arc::new(uploader));
        assert_eq!(
            service.upload_pending().await.unwrap(),
            UploadOutcome::Uploaded { records: 2 }
        );
        assert_eq!(flags(&repo).await, vec![(done, true), (a, true), (b, true)]);
    }

    #[tokio::test]
    async fn test_rejected_upload_changes_nothing() {
        let pool = connect_in_memory().await.unwrap();
        let repo = SightingRepository::new(pool.clone());
        let a = seed(&repo, "AA").await;
        let b = seed(&repo, "BB").await;

        let mut uploader = MockWigleUploader::new();
        uploader.expect_upload().times(1).returning(|_, _| {
            Err(AppError::UploadRejected {
                status: 401,
                body: "invalid credentials".into(),
            })
        });

        let service = UploadService::new(pool, Arc::new(uploader));
        let err = service.upload_pending().await.unwrap_err();
        assert!(matches!(err, AppError::UploadRejected { status: 401, .. }));
        assert_eq!(flags(&repo).await, vec![(a, false), (b, false)]);
    }

    #[tokio::test]
    async fn test_transport_failure_changes_nothing() {
        let pool = connect_in_memory().await.unwrap();
        let repo = SightingRepository::new(pool.clone());
        let a = seed(&repo, "AA").await;

        let mut uploader = MockWigleUploader::new();
        uploader
            .expect_upload()
            .times(1)
            .returning(|_, _| Err(AppError::UploadTransport("connection refused".into())));

        let service = UploadService::new(pool, Arc::new(uploader));
        let err = service.upload_pending().await.unwrap_err();
        assert!(matches!(err, AppError::UploadTransport(_)));
        assert_eq!(flags(&repo).await, vec![(a, false)]);
    }
}
