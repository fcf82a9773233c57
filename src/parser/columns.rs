//! Column resolution from header text
//!
//! Each semantic field is matched against the header texts by first-match
//! substring search. When nothing matches, a fixed positional guess is used
//! instead: name 0, state 1, party 2, office start `header_count - 2`. The
//! guess is only correct for the historical layout of the page, so a
//! reworded or missing header row can misattribute columns; the resolved map
//! records which fields were guessed so the report can surface it.

use serde::Serialize;

use crate::parser::selectors::{NAME_HEADERS, OFFICE_START_HEADERS, PARTY_HEADERS, STATE_HEADERS};

/// Semantic fields of a roster row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    State,
    Party,
    OfficeStart,
}

/// Column positions for each field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    pub name: usize,
    pub state: usize,
    pub party: usize,
    /// `None` when there are too few headers for a positional guess
    pub office_start: Option<usize>,
    /// Fields whose position came from the positional guess
    pub defaulted: Vec<Field>,
}

impl ColumnMap {
    /// Resolve positions from lower-cased, trimmed header texts
    pub fn resolve(headers: &[String]) -> Self {
        let mut defaulted = Vec::new();
        let mut pick = |field: Field, keywords: &[&str], fallback: Option<usize>| {
            find_column(headers, keywords).or_else(|| {
                defaulted.push(field);
                fallback
            })
        };

        let name = pick(Field::Name, NAME_HEADERS, Some(0)).unwrap_or(0);
        let state = pick(Field::State, STATE_HEADERS, Some(1)).unwrap_or(1);
        let party = pick(Field::Party, PARTY_HEADERS, Some(2)).unwrap_or(2);
        let office_start = pick(
            Field::OfficeStart,
            OFFICE_START_HEADERS,
            headers.len().checked_sub(2),
        );

        Self {
            name,
            state,
            party,
            office_start,
            defaulted,
        }
    }

    /// Whether a field's position is a guess
    pub fn is_defaulted(&self, field: Field) -> bool {
        self.defaulted.contains(&field)
    }
}

/// Index of the first header containing any of the keywords
pub fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| keywords.iter().any(|k| header.contains(k)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_reordered_headers() {
        let map = ColumnMap::resolve(&headers(&[
            "portrait",
            "state",
            "senator",
            "party",
            "born",
            "assumed office",
            "term up",
        ]));

        assert_eq!(map.name, 2);
        assert_eq!(map.state, 1);
        assert_eq!(map.party, 3);
        assert_eq!(map.office_start, Some(5));
        assert!(map.defaulted.is_empty());
    }

    #[test]
    fn test_resolve_alternative_keywords() {
        let map = ColumnMap::resolve(&headers(&["name", "state", "party", "took office"]));
        assert_eq!(map.name, 0);
        assert_eq!(map.office_start, Some(3));

        let map = ColumnMap::resolve(&headers(&["name", "state", "party", "term began", "notes"]));
        assert_eq!(map.office_start, Some(3));
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let map = ColumnMap::resolve(&headers(&["senator", "name", "state", "party", "since"]));
        assert_eq!(map.name, 0);
    }

    #[test]
    fn test_positional_defaults() {
        let map = ColumnMap::resolve(&headers(&["a", "b", "c", "d", "e"]));

        assert_eq!(map.name, 0);
        assert_eq!(map.state, 1);
        assert_eq!(map.party, 2);
        assert_eq!(map.office_start, Some(3));
        assert_eq!(
            map.defaulted,
            vec![Field::Name, Field::State, Field::Party, Field::OfficeStart]
        );
    }

    #[test]
    fn test_office_start_default_needs_two_headers() {
        let map = ColumnMap::resolve(&headers(&["senator"]));
        assert_eq!(map.office_start, None);
        assert!(map.is_defaulted(Field::OfficeStart));

        let map = ColumnMap::resolve(&[]);
        assert_eq!(map.office_start, None);
    }

    #[test]
    fn test_partial_match_marks_only_missing_fields() {
        let map = ColumnMap::resolve(&headers(&["senator", "state", "affiliation", "since"]));
        assert_eq!(map.defaulted, vec![Field::Party]);
        assert!(!map.is_defaulted(Field::Name));
    }
}
