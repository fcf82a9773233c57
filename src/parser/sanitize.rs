//! Text sanitization for table cell content
//!
//! Cell text pulled out of the parse tree carries footnote markers,
//! parenthetical asides, invisible formatting characters and irregular
//! whitespace. These helpers strip all of that before any field is
//! interpreted.

use regex::Regex;
use std::sync::LazyLock;

static FOOTNOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

static PARENTHETICAL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sanitize raw cell text
///
/// 1. Remove zero-width characters
/// 2. Remove control characters
/// 3. Collapse all whitespace (including non-breaking spaces) to single spaces
/// 4. Trim
///
/// # Examples
///
/// ```
/// use rollcall::parser::sanitize::sanitize_cell;
///
/// assert_eq!(sanitize_cell("  Jon\u{a0}\u{200B}Tester \n"), "Jon Tester");
/// ```
pub fn sanitize_cell(text: &str) -> String {
    let result = remove_zero_width(text);
    let result = remove_control_chars(&result);
    collapse_whitespace(&result)
}

/// Remove zero-width spaces, directional marks and the byte order mark
///
/// # Examples
///
/// ```
/// use rollcall::parser::sanitize::remove_zero_width;
///
/// assert_eq!(remove_zero_width("Ala\u{200B}ska\u{FEFF}"), "Alaska");
/// ```
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Remove control characters, keeping newlines and tabs for whitespace collapsing
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Collapse runs of whitespace to one space and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Remove bracketed footnote markers such as `[1]` or `[a]`
///
/// # Examples
///
/// ```
/// use rollcall::parser::sanitize::strip_footnotes;
///
/// assert_eq!(strip_footnotes("Texas[3]"), "Texas");
/// ```
pub fn strip_footnotes(text: &str) -> String {
    collapse_whitespace(&FOOTNOTE_REGEX.replace_all(text, ""))
}

/// Remove parenthetical asides such as `(appointed)`
pub fn strip_parentheticals(text: &str) -> String {
    collapse_whitespace(&PARENTHETICAL_REGEX.replace_all(text, ""))
}

/// Remove both footnote markers and parenthetical asides, then sanitize
///
/// # Examples
///
/// ```
/// use rollcall::parser::sanitize::strip_annotations;
///
/// assert_eq!(strip_annotations("Tommy Tuberville[b] (R)"), "Tommy Tuberville");
/// ```
pub fn strip_annotations(text: &str) -> String {
    let without_footnotes = FOOTNOTE_REGEX.replace_all(text, "");
    sanitize_cell(&strip_parentheticals(&without_footnotes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_cell_collapses_whitespace() {
        assert_eq!(sanitize_cell("Lisa\n\t  Murkowski"), "Lisa Murkowski");
        assert_eq!(sanitize_cell("   "), "");
    }

    #[test]
    fn test_remove_control_chars() {
        let clean = remove_control_chars("Ohio\x00\x07");
        assert_eq!(clean, "Ohio");
    }

    #[test]
    fn test_strip_footnotes_multiple_markers() {
        assert_eq!(strip_footnotes("January 3, 2021[1][note 2]"), "January 3, 2021");
        assert_eq!(strip_footnotes("[a]Maine"), "Maine");
    }

    #[test]
    fn test_strip_parentheticals() {
        assert_eq!(strip_parentheticals("Bernie Sanders (I)"), "Bernie Sanders");
        assert_eq!(strip_parentheticals("no asides"), "no asides");
    }

    #[test]
    fn test_strip_annotations_combined() {
        assert_eq!(
            strip_annotations("  Angus\u{a0}King[c] (independent)\n"),
            "Angus King"
        );
    }

    #[test]
    fn test_unbalanced_markers_are_left_alone() {
        assert_eq!(strip_annotations("Name [unclosed"), "Name [unclosed");
        assert_eq!(strip_annotations("Name (unclosed"), "Name (unclosed");
    }
}
