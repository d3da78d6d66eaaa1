// Trait abstractions for the watcher's dependencies.
//
// CveSource — the vulnerability feed (NVD in production).
// Classify — the expensive relevance check (Gemini in production).
// Sleeper — every suspension point (poll interval, pacing, backoff).
//
// These enable deterministic pipeline tests with in-process mocks:
// no network, no real sleeping.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use nvd_client::{CveRecord, NvdClient};

use crate::classifier::Classification;

#[async_trait]
pub trait CveSource: Send + Sync {
    /// Fetch all records published within `[start, end]`.
    async fn fetch_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CveRecord>>;
}

#[async_trait]
impl CveSource for NvdClient {
    async fn fetch_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CveRecord>> {
        Ok(NvdClient::fetch_window(self, start, end).await?)
    }
}

#[async_trait]
pub trait Classify: Send + Sync {
    /// Decide whether a description is OT-relevant. Infallible surface:
    /// provider trouble collapses to the safe "not relevant" default
    /// inside the implementation.
    async fn classify(&self, description: &str) -> Classification;
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
