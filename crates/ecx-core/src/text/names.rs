//! Cleanup of executant/claimant names.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBERING_PREFIX: Regex = Regex::new(r"^[0-9]+\.\s*").unwrap();
    static ref PARENTHETICAL: Regex = Regex::new(r"\(.*?\)").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a party name.
///
/// Strips a leading `N. ` numbering prefix, removes parenthetical groups,
/// collapses whitespace runs and trims. Empty input is returned unchanged.
pub fn normalize_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let without_number = NUMBERING_PREFIX.replace(raw, "");
    let without_notes = PARENTHETICAL.replace_all(&without_number, "");
    let collapsed = WHITESPACE_RUN.replace_all(&without_notes, " ");

    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numbering_and_notes_removed() {
        assert_eq!(normalize_name("1. Name (note) Name"), "Name Name");
    }

    #[test]
    fn test_multiple_parentheticals() {
        assert_eq!(
            normalize_name("2. ரவி (முதல்வர்)   (Power Agent) சித்ரா"),
            "ரவி சித்ரா"
        );
    }

    #[test]
    fn test_empty_passthrough() {
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_numbering_only_at_start() {
        assert_eq!(normalize_name("Plot 12. Owner"), "Plot 12. Owner");
    }

    #[test]
    fn test_tabs_and_newlines_collapsed() {
        assert_eq!(normalize_name("  Anand\t\tKumar \n "), "Anand Kumar");
    }
}
