//! Publishing and resolving time-limited share links.
//!
//! A share is an immutable snapshot row keyed by a fresh UUID. Expiry is
//! recorded on the row but not enforced at read time; the presentation
//! layer decides what an expired share looks like. The view counter is a
//! read-then-write increment, which can undercount under concurrent
//! resolution of the same link. That is acceptable for an advisory
//! counter and keeps the storage surface a plain update.

use chrono::{Duration, Utc};
use shared::SharedBiodata;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::commands::share::{CreateShareCommand, CreateShareResult, ResolveShareResult};
use crate::storage::SharedBiodataStorage;

const QR_API_BASE: &str = "https://api.qrserver.com/v1/create-qr-code/?size=200x200&data=";

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Share link not found or expired")]
    NotFound,
    #[error("Expiry must be 24 hours or 168 hours, got {0}")]
    InvalidExpiry(u32),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Service for creating and resolving shared records
#[derive(Clone)]
pub struct ShareService {
    storage: Arc<dyn SharedBiodataStorage>,
    /// Origin the public viewer is served from, e.g. `https://example.com`
    base_url: String,
}

impl ShareService {
    pub fn new(storage: Arc<dyn SharedBiodataStorage>, base_url: String) -> Self {
        Self { storage, base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Publish a snapshot under a fresh id and return the public URLs
    pub async fn create_share(&self, command: CreateShareCommand) -> Result<CreateShareResult, ShareError> {
        if command.expiry_hours != 24 && command.expiry_hours != 168 {
            return Err(ShareError::InvalidExpiry(command.expiry_hours));
        }

        let id = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(command.expiry_hours as i64);

        let share = SharedBiodata {
            id: id.clone(),
            template_id: command.customization.template_id.clone(),
            data: command.data,
            customization: command.customization,
            expires_at,
            view_count: 0,
        };

        self.storage.insert_share(&share).await?;

        let share_url = format!("{}/view/{}", self.base_url, id);
        let qr_code_url = format!("{}{}", QR_API_BASE, percent_encode(&share_url));

        info!("Created share {} expiring at {}", id, expires_at.to_rfc3339());

        Ok(CreateShareResult { share_id: id, share_url, qr_code_url })
    }

    /// Look up a share and bump its view counter.
    ///
    /// Two reads of the same id race benignly: each computes its increment
    /// from the count it read, so concurrent views may collapse into one.
    pub async fn resolve_share(&self, id: &str) -> Result<ResolveShareResult, ShareError> {
        let mut share = self.storage.get_share(id).await?.ok_or(ShareError::NotFound)?;

        let new_count = share.view_count + 1;
        self.storage.set_view_count(id, new_count).await?;
        share.view_count = new_count;

        Ok(ResolveShareResult { first_view: new_count == 1, share })
    }
}

/// Percent-encode everything outside the unreserved set, for embedding a
/// URL inside the QR service's query string
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{:02X}", byte));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::{DbConnection, SharedBiodataRepository};
    use shared::{BiodataData, TemplateCustomization, TemplateId};

    async fn setup_service() -> ShareService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = Arc::new(SharedBiodataRepository::new(db));
        ShareService::new(repo, "https://biodata.example.com/".to_string())
    }

    fn sample_command(expiry_hours: u32) -> CreateShareCommand {
        CreateShareCommand {
            data: BiodataData::default(),
            customization: TemplateCustomization::default(),
            expiry_hours,
        }
    }

    #[tokio::test]
    async fn test_create_share_builds_urls() {
        let service = setup_service().await;

        let result = service.create_share(sample_command(24)).await.expect("Create failed");

        assert_eq!(result.share_url, format!("https://biodata.example.com/view/{}", result.share_id));
        assert!(result.qr_code_url.starts_with(QR_API_BASE));
        // the embedded URL is fully escaped
        assert!(result.qr_code_url.contains("https%3A%2F%2Fbiodata.example.com%2Fview%2F"));
    }

    #[tokio::test]
    async fn test_create_share_rejects_odd_expiry() {
        let service = setup_service().await;

        let err = service.create_share(sample_command(48)).await.unwrap_err();
        assert!(matches!(err, ShareError::InvalidExpiry(48)));
    }

    #[tokio::test]
    async fn test_week_expiry_lands_seven_days_out() {
        let service = setup_service().await;

        let before = Utc::now();
        let result = service.create_share(sample_command(168)).await.expect("Create failed");
        let resolved = service.resolve_share(&result.share_id).await.expect("Resolve failed");

        let lower = before + Duration::hours(168);
        let upper = Utc::now() + Duration::hours(168);
        assert!(resolved.share.expires_at >= lower && resolved.share.expires_at <= upper);
    }

    #[tokio::test]
    async fn test_resolve_counts_views() {
        let service = setup_service().await;
        let created = service.create_share(sample_command(24)).await.expect("Create failed");

        let first = service.resolve_share(&created.share_id).await.expect("Resolve failed");
        assert!(first.first_view);
        assert_eq!(first.share.view_count, 1);

        let second = service.resolve_share(&created.share_id).await.expect("Resolve failed");
        assert!(!second.first_view);
        assert_eq!(second.share.view_count, 2);
    }

    #[tokio::test]
    async fn test_resolve_missing_share() {
        let service = setup_service().await;
        let err = service.resolve_share("nope").await.unwrap_err();
        assert!(matches!(err, ShareError::NotFound));
        assert_eq!(err.to_string(), "Share link not found or expired");
    }

    #[tokio::test]
    async fn test_share_snapshot_keeps_template_id() {
        let service = setup_service().await;
        let mut command = sample_command(24);
        command.customization.template_id = TemplateId::Minimal3;

        let created = service.create_share(command).await.expect("Create failed");
        let resolved = service.resolve_share(&created.share_id).await.expect("Resolve failed");
        assert_eq!(resolved.share.template_id, TemplateId::Minimal3);
    }

    #[test]
    fn test_percent_encode_reserved_characters() {
        assert_eq!(percent_encode("abc-_.~XYZ09"), "abc-_.~XYZ09");
        assert_eq!(percent_encode("a b/c?d=e"), "a%20b%2Fc%3Fd%3De");
    }
}
