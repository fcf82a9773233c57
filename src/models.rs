// Core data structures for the roster engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One legislator as served by the roster API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegislatorRecord {
    pub name: String,
    pub state: String, // Two-letter code when resolvable
    pub party: Party,
    pub office_start_date: NaiveDate, // Serialized as YYYY-MM-DD
}

impl LegislatorRecord {
    pub fn new(
        name: impl Into<String>,
        state: impl Into<String>,
        party: Party,
        office_start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            party,
            office_start_date,
        }
    }

    /// Whether the record took office strictly before `date`
    pub fn took_office_before(&self, date: NaiveDate) -> bool {
        self.office_start_date < date
    }
}

/// Party affiliation, a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Party {
    Democrat,
    Republican,
    Independent,
    Unknown,
}

impl Party {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Democrat => "Democrat",
            Self::Republican => "Republican",
            Self::Independent => "Independent",
            Self::Unknown => "Unknown",
        }
    }

    /// Get all parties in reporting order
    pub fn all() -> [Self; 4] {
        [
            Self::Democrat,
            Self::Republican,
            Self::Independent,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member count per party over a roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartyBreakdown {
    pub democrat: usize,
    pub republican: usize,
    pub independent: usize,
    pub unknown: usize,
}

impl PartyBreakdown {
    /// Count parties across a roster
    pub fn from_records(records: &[LegislatorRecord]) -> Self {
        let mut breakdown = Self::default();
        for record in records {
            breakdown.increment(record.party);
        }
        breakdown
    }

    fn increment(&mut self, party: Party) {
        match party {
            Party::Democrat => self.democrat += 1,
            Party::Republican => self.republican += 1,
            Party::Independent => self.independent += 1,
            Party::Unknown => self.unknown += 1,
        }
    }

    /// Count for one party
    pub fn get(&self, party: Party) -> usize {
        match party {
            Party::Democrat => self.democrat,
            Party::Republican => self.republican,
            Party::Independent => self.independent,
            Party::Unknown => self.unknown,
        }
    }

    /// Sum over all parties
    pub fn total(&self) -> usize {
        self.democrat + self.republican + self.independent + self.unknown
    }
}
