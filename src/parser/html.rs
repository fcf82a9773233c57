//! Roster parser
//!
//! Ties the parser stages together: locate the roster table, resolve its
//! columns, extract its rows and, when the table pass yields implausibly few
//! records, recover extra names from legislator links.
//!
//! Parsing is fully synchronous. `scraper::Html` is not `Send`, so callers in
//! async code must finish with the document before the next `.await`.

use std::collections::HashSet;

use chrono::NaiveDate;
use scraper::Html;

use crate::config::ExtractionConfig;
use crate::models::LegislatorRecord;
use crate::parser::columns::ColumnMap;
use crate::parser::locator::{header_texts, TableLocator};
use crate::parser::report::ExtractionReport;
use crate::parser::rows::{recover_from_links, RowExtractor, RowOutcome};
use crate::parser::selectors::marker_selector;
use crate::utils::error::ParseError;

/// Records plus diagnostics from one parse
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<LegislatorRecord>,
    pub report: ExtractionReport,
}

/// Roster HTML parser
pub struct RosterParser {
    locator: TableLocator,
    min_records: usize,
    link_scan: bool,
    link_keyword: String,
    default_date: NaiveDate,
}

impl RosterParser {
    /// Build a parser from extraction settings
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidSelector` if the table marker is not a
    /// usable class name.
    pub fn new(config: &ExtractionConfig) -> Result<Self, ParseError> {
        let marker = marker_selector(&config.table_marker)?;

        Ok(Self {
            locator: TableLocator::new(marker),
            min_records: config.min_records,
            link_scan: config.link_scan,
            link_keyword: config.link_keyword.clone(),
            default_date: config.default_date,
        })
    }

    /// Parse a roster page
    ///
    /// # Errors
    ///
    /// Returns `ParseError::EmptyDocument` for blank input and
    /// `ParseError::TableNotFound` when no table qualifies as the roster.
    pub fn parse(&self, html: &str) -> Result<Extraction, ParseError> {
        if html.trim().is_empty() {
            return Err(ParseError::EmptyDocument);
        }

        let document = Html::parse_document(html);
        let located = self.locator.locate(&document)?;

        let headers = header_texts(located.table);
        let columns = ColumnMap::resolve(&headers);
        if !columns.defaulted.is_empty() {
            tracing::warn!(
                fields = ?columns.defaulted,
                headers = ?headers,
                "Column positions guessed from layout; values may be misattributed"
            );
        }

        let mut report = ExtractionReport::new(located.strategy, headers, columns.clone());
        let extractor = RowExtractor::new(&columns, self.default_date);

        let mut records = Vec::new();
        for outcome in extractor.extract_table(located.table) {
            report.record(&outcome);
            match outcome {
                RowOutcome::Accepted { record, .. } => records.push(record),
                RowOutcome::Skipped(reason) => tracing::debug!(?reason, "Row skipped"),
            }
        }

        if self.link_scan && records.len() < self.min_records {
            let known: HashSet<String> = records.iter().map(|r| r.name.clone()).collect();
            let recovered =
                recover_from_links(&document, &self.link_keyword, &known, self.default_date);

            tracing::info!(
                table_records = records.len(),
                recovered = recovered.len(),
                threshold = self.min_records,
                "Table pass below threshold, recovered names from links"
            );

            report.link_recovered = recovered.len();
            records.extend(recovered);
        }

        tracing::debug!(
            strategy = ?report.strategy,
            rows = report.rows_seen,
            accepted = report.accepted,
            skipped = report.skipped_total(),
            "Roster extracted"
        );

        Ok(Extraction { records, report })
    }
}
