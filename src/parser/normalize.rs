//! Field normalizers
//!
//! Pure functions turning raw cell text into the canonical values carried by
//! [`LegislatorRecord`](crate::models::LegislatorRecord). None of them fail
//! loudly: an unusable date is `None`, an unknown state passes through, an
//! unrecognized party label is [`Party::Unknown`].

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::models::Party;
use crate::parser::sanitize::{sanitize_cell, strip_annotations, strip_footnotes};

/// Full state name to postal abbreviation
pub const STATE_ABBREVIATIONS: [(&str, &str); 50] = [
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
];

// Tried in order against the whole cleaned string
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",  // January 3, 2021
    "%b %d, %Y",  // Jan 3, 2021
    "%b. %d, %Y", // Jan. 3, 2021
    "%B %d %Y",   // January 3 2021
    "%Y-%m-%d",   // 2021-01-03
    "%d %B %Y",   // 3 January 2021
    "%m/%d/%Y",   // 01/03/2021
];

static EMBEDDED_ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap());

static EMBEDDED_LONG_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]{2,8}\.?\s+\d{1,2},?\s+\d{4})\b").unwrap()
});

/// Normalize a free-text date to a calendar date
///
/// Footnote markers and parenthetical asides are stripped first. When the
/// whole string does not parse, an embedded ISO date or "Month D, YYYY" run is
/// looked for, which covers hidden sort keys glued onto the visible text.
///
/// # Examples
///
/// ```
/// use rollcall::parser::normalize::normalize_date;
///
/// let date = normalize_date("January 3, 2021[1]").unwrap();
/// assert_eq!(date.to_string(), "2021-01-03");
/// assert!(normalize_date("not a date").is_none());
/// ```
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = strip_annotations(raw);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(date) = parse_with_formats(&cleaned) {
        return Some(date);
    }

    if let Some(caps) = EMBEDDED_ISO_DATE.captures(&cleaned) {
        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
        let day = caps.get(3)?.as_str().parse::<u32>().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    EMBEDDED_LONG_DATE
        .captures_iter(&cleaned)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| parse_with_formats(m.as_str()))
}

fn parse_with_formats(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Normalize a state cell to its postal abbreviation where possible
///
/// Text of more than two characters is looked up case-insensitively in
/// [`STATE_ABBREVIATIONS`]; anything else is returned cleaned but untranslated.
/// Upper-casing is left to the caller.
///
/// # Examples
///
/// ```
/// use rollcall::parser::normalize::normalize_state;
///
/// assert_eq!(normalize_state("California"), "CA");
/// assert_eq!(normalize_state("TX"), "TX");
/// ```
pub fn normalize_state(raw: &str) -> String {
    let cleaned = sanitize_cell(&strip_footnotes(raw));

    if cleaned.chars().count() > 2 {
        if let Some(abbreviation) = lookup_state(&cleaned) {
            return abbreviation.to_string();
        }
    }

    cleaned
}

/// Look up a full state name, case-insensitively
pub fn lookup_state(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    STATE_ABBREVIATIONS
        .iter()
        .find(|(full, _)| *full == key)
        .map(|(_, abbreviation)| *abbreviation)
}

/// Classify a party label, optionally helped by a row-level hint
///
/// Full party names found anywhere in either input take precedence over the
/// exact abbreviations `d`/`dem`, `r`/`rep`/`gop` and `i`/`ind`.
///
/// # Examples
///
/// ```
/// use rollcall::models::Party;
/// use rollcall::parser::normalize::classify_party;
///
/// assert_eq!(classify_party("Democratic Party", ""), Party::Democrat);
/// assert_eq!(classify_party("R", ""), Party::Republican);
/// assert_eq!(classify_party("xyz", ""), Party::Unknown);
/// ```
pub fn classify_party(party_text: &str, row_hint: &str) -> Party {
    let text = party_text.to_lowercase();
    let hint = row_hint.to_lowercase();

    let mentions = |needle: &str| text.contains(needle) || hint.contains(needle);

    if mentions("democrat") {
        return Party::Democrat;
    }
    if mentions("republican") {
        return Party::Republican;
    }
    if mentions("independent") {
        return Party::Independent;
    }

    let party = [text.trim(), hint.trim()]
        .into_iter()
        .find_map(party_from_abbreviation)
        .unwrap_or(Party::Unknown);
    party
}

fn party_from_abbreviation(label: &str) -> Option<Party> {
    match label {
        "d" | "dem" => Some(Party::Democrat),
        "r" | "rep" | "gop" => Some(Party::Republican),
        "i" | "ind" => Some(Party::Independent),
        _ => None,
    }
}

/// Clean a name cell: footnotes, asides and stray whitespace removed
pub fn clean_name(raw: &str) -> String {
    strip_annotations(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_date_long_form_with_footnote() {
        assert_eq!(normalize_date("January 3, 2021[1]"), Some(ymd(2021, 1, 3)));
    }

    #[test]
    fn test_normalize_date_iso() {
        assert_eq!(normalize_date("2013-01-03"), Some(ymd(2013, 1, 3)));
    }

    #[test]
    fn test_normalize_date_abbreviated_months() {
        assert_eq!(normalize_date("Jan 3, 1997"), Some(ymd(1997, 1, 3)));
        assert_eq!(normalize_date("Jan. 3, 1997"), Some(ymd(1997, 1, 3)));
        assert_eq!(normalize_date("Sep 12, 2018"), Some(ymd(2018, 9, 12)));
    }

    #[test]
    fn test_normalize_date_with_parenthetical() {
        assert_eq!(
            normalize_date("January 3, 2023 (appointed)"),
            Some(ymd(2023, 1, 3))
        );
    }

    #[test]
    fn test_normalize_date_day_first() {
        assert_eq!(normalize_date("3 January 2019"), Some(ymd(2019, 1, 3)));
    }

    #[test]
    fn test_normalize_date_embedded_sort_key() {
        assert_eq!(
            normalize_date("000000002021-01-20-0000January 20, 2021"),
            Some(ymd(2021, 1, 20))
        );
        assert_eq!(
            normalize_date("Assumed office January 3, 2015 – present"),
            Some(ymd(2015, 1, 3))
        );
    }

    #[test]
    fn test_normalize_date_rejects_garbage() {
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("[1]"), None);
        assert_eq!(normalize_date("February 30, 2021"), None);
    }

    #[test]
    fn test_normalize_state_full_names() {
        assert_eq!(normalize_state("California"), "CA");
        assert_eq!(normalize_state("new hampshire"), "NH");
        assert_eq!(normalize_state("West Virginia[a]"), "WV");
    }

    #[test]
    fn test_normalize_state_passthrough() {
        assert_eq!(normalize_state("TX"), "TX");
        assert_eq!(normalize_state("tx"), "tx");
        assert_eq!(normalize_state("Puerto Rico"), "Puerto Rico");
    }

    #[test]
    fn test_state_table_is_complete_and_unique() {
        let mut codes: Vec<&str> = STATE_ABBREVIATIONS.iter().map(|(_, c)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 50);
        assert!(codes.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_classify_party_full_names() {
        assert_eq!(classify_party("Democratic Party", ""), Party::Democrat);
        assert_eq!(classify_party("Republican", ""), Party::Republican);
        assert_eq!(classify_party("Independent", ""), Party::Independent);
    }

    #[test]
    fn test_classify_party_abbreviations() {
        assert_eq!(classify_party("R", ""), Party::Republican);
        assert_eq!(classify_party(" dem ", ""), Party::Democrat);
        assert_eq!(classify_party("GOP", ""), Party::Republican);
        assert_eq!(classify_party("ind", ""), Party::Independent);
    }

    #[test]
    fn test_classify_party_uses_row_hint() {
        assert_eq!(classify_party("", "vcard republican-row"), Party::Republican);
        assert_eq!(classify_party("", "d"), Party::Democrat);
    }

    #[test]
    fn test_classify_party_substring_beats_abbreviation() {
        assert_eq!(classify_party("R", "independent"), Party::Independent);
    }

    #[test]
    fn test_classify_party_unknown() {
        assert_eq!(classify_party("xyz", ""), Party::Unknown);
        assert_eq!(classify_party("", ""), Party::Unknown);
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("Chuck Grassley[e]"), "Chuck Grassley");
        assert_eq!(clean_name("Jr.  (senior)"), "Jr.");
    }
}
