//! Regex patterns for encumbrance certificate extraction.
//!
//! Digit classes are spelled `[0-9]` rather than `\d` so that Tamil digits
//! (U+0BE6..U+0BEF) never count as serial or document numbers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Start of a transaction entry: serial number, whitespace, registration date
    pub static ref TRANSACTION_BOUNDARY: Regex = Regex::new(
        r"(?m)^[0-9]+\s+[0-9]{2}-[A-Za-z]{3}-[0-9]{4}"
    ).unwrap();

    pub static ref SERIAL_NO: Regex = Regex::new(r"^([0-9]+)").unwrap();

    // 06-Feb-2013
    pub static ref REGISTRATION_DATE: Regex = Regex::new(
        r"([0-9]{2}-[A-Za-z]{3}-[0-9]{4})"
    ).unwrap();

    pub static ref REGISTRATION_DATE_PARTS: Regex = Regex::new(
        r"([0-9]{2})-([A-Za-z]{3})-([0-9]{4})"
    ).unwrap();

    // 1234/2013
    pub static ref DOCUMENT_NO: Regex = Regex::new(r"([0-9]+/[0-9]{4})").unwrap();

    // ரூ. 12,345/-
    pub static ref RUPEE_AMOUNT: Regex = Regex::new(r"ரூ\.\s*([0-9,]+)/-").unwrap();

    pub static ref MARKET_VALUE: Regex = Regex::new(
        r"Market Value[^:]*:\s*ரூ\.\s*([0-9,]+)/-"
    ).unwrap();

    // Labeled free-text fields, value runs to end of line
    pub static ref PROPERTY_EXTENT: Regex = Regex::new(
        r"Property Extent[^:]*:\s*([^\n]+)"
    ).unwrap();

    pub static ref SURVEY_NO: Regex = Regex::new(r"Survey No[^:]*:\s*([^\n]+)").unwrap();

    pub static ref PLOT_NO: Regex = Regex::new(r"Plot No[^:]*:\s*([^\n]+)").unwrap();

    // Village name stops at the first comma (taluk/district follow)
    pub static ref VILLAGE: Regex = Regex::new(r"Village[^:]*:\s*([^,\n]+)").unwrap();

    pub static ref EXECUTANT: Regex = Regex::new(
        r"Name of Executant\(s\)[^:]*:\s*([^\n]+)"
    ).unwrap();

    pub static ref CLAIMANT: Regex = Regex::new(
        r"Name of Claimant\(s\)[^:]*:\s*([^\n]+)"
    ).unwrap();

    pub static ref NATURE: Regex = Regex::new(r"Nature[^:]*:\s*([^\n]+)").unwrap();

    pub static ref PROPERTY_TYPE: Regex = Regex::new(r"Property Type[^:]*:\s*([^\n]+)").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_requires_line_start() {
        assert!(TRANSACTION_BOUNDARY.is_match("12 06-Feb-2013 Sale"));
        assert!(TRANSACTION_BOUNDARY.is_match("header\n3   14-Mar-2014"));
        assert!(!TRANSACTION_BOUNDARY.is_match("Doc 12 06-Feb-2013"));
    }

    #[test]
    fn test_tamil_digits_are_not_serials() {
        assert!(!TRANSACTION_BOUNDARY.is_match("௧௨ 06-Feb-2013"));
    }

    #[test]
    fn test_village_stops_at_comma() {
        let caps = VILLAGE
            .captures("Village & Street: Thiruvennainallur, Villupuram")
            .unwrap();
        assert_eq!(&caps[1], "Thiruvennainallur");
    }
}
