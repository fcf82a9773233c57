//! Extraction diagnostics
//!
//! Every parse produces an [`ExtractionReport`] alongside its records so that
//! heuristic misfires (guessed columns, mass row skips, link recovery) are
//! visible to operators instead of silently shaping the roster.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::parser::columns::{ColumnMap, Field};
use crate::parser::locator::LocateStrategy;
use crate::parser::rows::{RowOutcome, SkipReason};

/// Skipped rows kept verbatim in a report
pub const MAX_SKIP_SAMPLES: usize = 5;

/// Summary of one extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    /// Strategy that located the roster table
    pub strategy: LocateStrategy,
    /// Header texts as seen by the column resolver
    pub headers: Vec<String>,
    pub columns: ColumnMap,
    pub rows_seen: usize,
    pub accepted: usize,
    /// Skip counts keyed by reason
    pub skipped: BTreeMap<String, usize>,
    /// First few skip reasons, in row order
    pub skip_samples: Vec<SkipReason>,
    pub defaulted_party: usize,
    pub defaulted_office_start: usize,
    /// Records added by the link scan
    pub link_recovered: usize,
}

impl ExtractionReport {
    /// Start a report for a located table
    pub fn new(strategy: LocateStrategy, headers: Vec<String>, columns: ColumnMap) -> Self {
        Self {
            strategy,
            headers,
            columns,
            rows_seen: 0,
            accepted: 0,
            skipped: BTreeMap::new(),
            skip_samples: Vec::new(),
            defaulted_party: 0,
            defaulted_office_start: 0,
            link_recovered: 0,
        }
    }

    /// Fold one row outcome into the counters
    pub fn record(&mut self, outcome: &RowOutcome) {
        self.rows_seen += 1;

        match outcome {
            RowOutcome::Accepted { defaulted, .. } => {
                self.accepted += 1;
                if defaulted.contains(&Field::Party) {
                    self.defaulted_party += 1;
                }
                if defaulted.contains(&Field::OfficeStart) {
                    self.defaulted_office_start += 1;
                }
            }
            RowOutcome::Skipped(reason) => {
                *self.skipped.entry(reason.key().to_string()).or_insert(0) += 1;
                if self.skip_samples.len() < MAX_SKIP_SAMPLES {
                    self.skip_samples.push(reason.clone());
                }
            }
        }
    }

    /// Total skipped rows
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Whether any column position was guessed
    pub fn has_guessed_columns(&self) -> bool {
        !self.columns.defaulted.is_empty()
    }
}
