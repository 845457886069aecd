//! Registration date parsing.

use chrono::NaiveDate;

use super::patterns::REGISTRATION_DATE_PARTS;

/// Parse a registration date such as "06-Feb-2013".
///
/// Falls back to ISO `YYYY-MM-DD` when the text is not in certificate form.
pub fn parse_registration_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Some(caps) = REGISTRATION_DATE_PARTS.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(month) = month_from_abbreviation(&caps[2]) {
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Map an English three-letter month abbreviation to its number.
pub fn month_from_abbreviation(month: &str) -> Option<u32> {
    match month.to_ascii_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}
