//! Time-bounded roster snapshot cache
//!
//! Holds the last extraction result behind a single `RwLock<Option<Arc<_>>>`.
//! Records, timestamp and origin live in one immutable [`CacheSnapshot`] and
//! are replaced together, so no reader can see a timestamp without its
//! records or the other way round.
//!
//! # Example
//!
//! ```
//! use rollcall::cache::{CacheSnapshot, RosterCache, SnapshotOrigin};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cache = RosterCache::new(Duration::from_secs(3600));
//! assert!(cache.fresh().await.is_none());
//!
//! cache.store(CacheSnapshot::new(Vec::new(), SnapshotOrigin::Live, None)).await;
//! assert!(cache.fresh().await.is_some());
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::models::LegislatorRecord;
use crate::parser::ExtractionReport;

/// Where a snapshot's records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOrigin {
    /// Extracted from the source document
    Live,
    /// Substituted after a failed fetch or parse
    Fallback,
}

/// One immutable extraction result
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub records: Vec<LegislatorRecord>,
    /// Monotonic time of creation, used for TTL checks
    pub fetched_at: Instant,
    /// Wall-clock time of creation, for reporting
    pub fetched_at_utc: DateTime<Utc>,
    pub origin: SnapshotOrigin,
    /// Diagnostics of the extraction, absent for fallback snapshots
    pub report: Option<ExtractionReport>,
}

impl CacheSnapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(
        records: Vec<LegislatorRecord>,
        origin: SnapshotOrigin,
        report: Option<ExtractionReport>,
    ) -> Self {
        Self {
            records,
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
            origin,
            report,
        }
    }

    /// Time elapsed since creation
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    /// Whether the snapshot is younger than `ttl`
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

/// Cache state as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub has_snapshot: bool,
    pub is_valid: bool,
    pub age_seconds: Option<u64>,
    pub ttl_seconds: u64,
    pub record_count: usize,
    pub origin: Option<SnapshotOrigin>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Snapshot holder with a fixed time-to-live
pub struct RosterCache {
    ttl: Duration,
    slot: RwLock<Option<Arc<CacheSnapshot>>>,
}

impl RosterCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// The current snapshot if it is still within its TTL
    pub async fn fresh(&self) -> Option<Arc<CacheSnapshot>> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|snapshot| snapshot.is_fresh(self.ttl))
            .cloned()
    }

    /// The current snapshot regardless of age
    pub async fn current(&self) -> Option<Arc<CacheSnapshot>> {
        self.slot.read().await.clone()
    }

    /// Replace the snapshot in one step
    pub async fn store(&self, snapshot: CacheSnapshot) -> Arc<CacheSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.slot.write().await = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Drop the snapshot; returns whether one was held
    pub async fn invalidate(&self) -> bool {
        self.slot.write().await.take().is_some()
    }

    pub async fn status(&self) -> CacheStatus {
        let snapshot = self.current().await;

        match snapshot {
            Some(snapshot) => CacheStatus {
                has_snapshot: true,
                is_valid: snapshot.is_fresh(self.ttl),
                age_seconds: Some(snapshot.age().as_secs()),
                ttl_seconds: self.ttl.as_secs(),
                record_count: snapshot.records.len(),
                origin: Some(snapshot.origin),
                fetched_at: Some(snapshot.fetched_at_utc),
            },
            None => CacheStatus {
                has_snapshot: false,
                is_valid: false,
                age_seconds: None,
                ttl_seconds: self.ttl.as_secs(),
                record_count: 0,
                origin: None,
                fetched_at: None,
            },
        }
    }
}
