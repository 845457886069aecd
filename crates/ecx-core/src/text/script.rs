//! Tamil script detection.

use std::ops::RangeInclusive;

/// The Tamil Unicode block.
pub const TAMIL_BLOCK: RangeInclusive<char> = '\u{0B80}'..='\u{0BFF}';

/// Check whether a character belongs to the Tamil block.
#[inline]
pub fn is_tamil_char(c: char) -> bool {
    TAMIL_BLOCK.contains(&c)
}

/// Check whether the text contains at least one Tamil code point.
///
/// Stops at the first match; empty text is never Tamil.
pub fn contains_tamil(text: &str) -> bool {
    text.chars().any(is_tamil_char)
}
