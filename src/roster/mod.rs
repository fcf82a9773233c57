//! Roster service
//!
//! Owns the document source, the parser and the snapshot cache, and exposes
//! the roster operations used by the API and the CLI. Reading the roster
//! never fails: any fetch or parse error is logged and answered with the
//! fixed fallback set, which is cached like a live result.

pub mod fallback;

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::cache::{CacheSnapshot, CacheStatus, RosterCache, SnapshotOrigin};
use crate::config::Config;
use crate::crawler::{DocumentSource, RosterFetcher};
use crate::error::{Result, RollcallErrorTrait};
use crate::models::{LegislatorRecord, PartyBreakdown};
use crate::parser::{Extraction, RosterParser};
use crate::utils::error::RosterError;

pub use fallback::fallback_records;

/// Roster operations over a cached extraction
pub struct RosterService {
    source_url: String,
    source: Arc<dyn DocumentSource>,
    parser: RosterParser,
    cache: RosterCache,
    /// Serializes extractions so concurrent misses share one fetch
    refresh_lock: Mutex<()>,
}

impl RosterService {
    /// Create a service over an arbitrary document source
    ///
    /// # Errors
    ///
    /// Returns an error if the extraction settings cannot build a parser.
    pub fn new(config: &Config, source: Arc<dyn DocumentSource>) -> Result<Self> {
        Ok(Self {
            source_url: config.source.url.clone(),
            source,
            parser: RosterParser::new(&config.extraction)?,
            cache: RosterCache::new(config.cache_ttl()),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Create a service that fetches over HTTP
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the parser cannot be built.
    pub fn with_http(config: &Config) -> Result<Self> {
        let fetcher = RosterFetcher::new(&config.source)?;
        Self::new(config, Arc::new(fetcher))
    }

    /// The full roster, in table order followed by link-recovered names
    pub async fn get_roster(&self) -> Vec<LegislatorRecord> {
        self.snapshot().await.records.clone()
    }

    /// Records whose office start date is strictly before `date`
    ///
    /// `date` must be a `YYYY-MM-DD` calendar date. Relative order of the
    /// roster is preserved.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::InvalidDate` for anything else; the roster is
    /// not touched in that case.
    pub async fn filter_by_tenure_before(
        &self,
        date: &str,
    ) -> std::result::Result<Vec<LegislatorRecord>, RosterError> {
        let cutoff = parse_iso_date(date)?;

        let snapshot = self.snapshot().await;
        Ok(snapshot
            .records
            .iter()
            .filter(|record| record.took_office_before(cutoff))
            .cloned()
            .collect())
    }

    /// Member count per party over the current roster
    pub async fn party_breakdown(&self) -> PartyBreakdown {
        PartyBreakdown::from_records(&self.snapshot().await.records)
    }

    /// Drop the cached snapshot; the next read extracts again
    ///
    /// Waits for an in-flight extraction so its result cannot outlive the
    /// invalidation.
    pub async fn invalidate_cache(&self) -> bool {
        let _guard = self.refresh_lock.lock().await;
        let dropped = self.cache.invalidate().await;
        tracing::info!(dropped, "Roster cache invalidated");
        dropped
    }

    /// Extract now and replace the cached snapshot, whatever its age
    pub async fn refresh(&self) -> Arc<CacheSnapshot> {
        let _guard = self.refresh_lock.lock().await;
        self.cache.store(self.extract().await).await
    }

    /// The cached snapshot, extracting first if it is missing or stale
    pub async fn snapshot(&self) -> Arc<CacheSnapshot> {
        if let Some(snapshot) = self.cache.fresh().await {
            return snapshot;
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(snapshot) = self.cache.fresh().await {
            return snapshot;
        }

        self.cache.store(self.extract().await).await
    }

    pub async fn cache_status(&self) -> CacheStatus {
        self.cache.status().await
    }

    /// The held snapshot, if any, without triggering an extraction
    pub async fn cached_snapshot(&self) -> Option<Arc<CacheSnapshot>> {
        self.cache.current().await
    }

    async fn extract(&self) -> CacheSnapshot {
        match self.try_extract().await {
            Ok(Extraction { records, report }) => {
                if records.is_empty() {
                    tracing::warn!(url = %self.source_url, "Extraction produced no records");
                }
                tracing::info!(
                    records = records.len(),
                    link_recovered = report.link_recovered,
                    "Roster refreshed from source"
                );
                CacheSnapshot::new(records, SnapshotOrigin::Live, Some(report))
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.source_url,
                    error = %e.describe(),
                    recoverable = e.is_recoverable(),
                    "Roster extraction failed, serving fallback roster"
                );
                CacheSnapshot::new(fallback_records(), SnapshotOrigin::Fallback, None)
            }
        }
    }

    async fn try_extract(&self) -> Result<Extraction> {
        let html = self.source.fetch(&self.source_url).await?;
        let extraction = self.parser.parse(&html)?;
        Ok(extraction)
    }
}

/// Parse a strict `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `RosterError::InvalidDate` for other shapes and for impossible
/// calendar dates.
pub fn parse_iso_date(raw: &str) -> std::result::Result<NaiveDate, RosterError> {
    let well_shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_shaped {
        return Err(RosterError::InvalidDate(raw.to_string()));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| RosterError::InvalidDate(raw.to_string()))
}
