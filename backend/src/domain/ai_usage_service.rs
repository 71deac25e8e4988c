//! Daily quota for the text-improvement helper.
//!
//! The counter lives in storage alongside the timestamp it resets at: the
//! next local midnight. Reads lazily roll the window forward, so a stale
//! counter from yesterday reports as zero without any background job.

use anyhow::Result;
use chrono::{DateTime, Duration, Local, Utc};
use shared::{AiUsage, AiUsageResponse};
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::ai::ConsumeQuotaResult;
use crate::storage::AiUsageStorage;

const DAILY_LIMIT: u32 = 5;

#[derive(Clone)]
pub struct AiUsageService {
    storage: Arc<dyn AiUsageStorage>,
}

impl AiUsageService {
    pub fn new(storage: Arc<dyn AiUsageStorage>) -> Self {
        Self { storage }
    }

    /// Current quota state, rolling the window forward if it has lapsed
    pub async fn usage(&self) -> Result<AiUsageResponse> {
        let usage = self.effective_usage(Utc::now()).await?;
        Ok(Self::to_response(&usage))
    }

    /// Spend one unit of quota, or refuse if none remains today
    pub async fn consume(&self) -> Result<ConsumeQuotaResult> {
        let now = Utc::now();
        let mut usage = self.effective_usage(now).await?;

        if usage.count >= DAILY_LIMIT {
            info!("AI quota exhausted until {}", usage.reset_at.to_rfc3339());
            return Ok(ConsumeQuotaResult { allowed: false, usage: Self::to_response(&usage) });
        }

        usage.count += 1;
        self.storage.save_usage(&usage).await?;

        Ok(ConsumeQuotaResult { allowed: true, usage: Self::to_response(&usage) })
    }

    /// Load the stored counter, resetting it when `now` has passed its
    /// reset timestamp
    async fn effective_usage(&self, now: DateTime<Utc>) -> Result<AiUsage> {
        match self.storage.load_usage().await? {
            Some(usage) if now < usage.reset_at => Ok(usage),
            _ => Ok(AiUsage { count: 0, reset_at: next_local_midnight(now) }),
        }
    }

    fn to_response(usage: &AiUsage) -> AiUsageResponse {
        AiUsageResponse {
            count: usage.count,
            limit: DAILY_LIMIT,
            remaining: DAILY_LIMIT.saturating_sub(usage.count),
            reset_at: usage.reset_at,
        }
    }
}

/// Midnight at the start of the next local-time day, as a UTC instant.
/// Falls back to a flat 24 hours when the local midnight is ambiguous
/// (DST gaps).
fn next_local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_tomorrow = now.with_timezone(&Local).date_naive() + Duration::days(1);
    match local_tomorrow.and_hms_opt(0, 0, 0).and_then(|dt| dt.and_local_timezone(Local).earliest()) {
        Some(midnight) => midnight.with_timezone(&Utc),
        None => now + Duration::hours(24),
    }
}
