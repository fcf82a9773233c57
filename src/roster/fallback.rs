//! Fixed roster served when extraction fails

use chrono::NaiveDate;

use crate::models::{LegislatorRecord, Party};

const FALLBACK_ROSTER: &[(&str, &str, Party, i32)] = &[
    ("Chuck Grassley", "IA", Party::Republican, 1981),
    ("Patty Murray", "WA", Party::Democrat, 1993),
    ("Bernie Sanders", "VT", Party::Independent, 2007),
    ("Mitch McConnell", "KY", Party::Republican, 1985),
    ("Dick Durbin", "IL", Party::Democrat, 1997),
    ("Angus King", "ME", Party::Independent, 2013),
    ("Elizabeth Warren", "MA", Party::Democrat, 2013),
    ("John Thune", "SD", Party::Republican, 2005),
    ("Susan Collins", "ME", Party::Republican, 1997),
    ("Chuck Schumer", "NY", Party::Democrat, 1999),
];

/// The fallback roster, in fixed order
///
/// Every entry took office on January 3 of its year.
pub fn fallback_records() -> Vec<LegislatorRecord> {
    FALLBACK_ROSTER
        .iter()
        .filter_map(|&(name, state, party, year)| {
            NaiveDate::from_ymd_opt(year, 1, 3)
                .map(|date| LegislatorRecord::new(name, state, party, date))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PartyBreakdown;

    #[test]
    fn test_fallback_is_deterministic() {
        assert_eq!(fallback_records(), fallback_records());
        assert_eq!(fallback_records().len(), 10);
    }

    #[test]
    fn test_fallback_records_are_well_formed() {
        for record in fallback_records() {
            assert!(!record.name.is_empty());
            assert_eq!(record.state.len(), 2);
            assert!(record.state.chars().all(|c| c.is_ascii_uppercase()));
            assert_ne!(record.party, Party::Unknown);
        }
    }

    #[test]
    fn test_fallback_breakdown() {
        let breakdown = PartyBreakdown::from_records(&fallback_records());
        assert_eq!(breakdown.democrat, 4);
        assert_eq!(breakdown.republican, 4);
        assert_eq!(breakdown.independent, 2);
        assert_eq!(breakdown.unknown, 0);
    }
}
