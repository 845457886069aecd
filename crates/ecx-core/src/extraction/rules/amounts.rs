//! Rupee amount parsing.

/// Parse a rupee amount as printed in certificates (e.g. "12,345").
///
/// Thousands separators are dropped; the remainder must be a non-empty
/// run of ASCII digits that fits in a `u64`.
pub fn parse_rupee_amount(s: &str) -> Result<u64, String> {
    let digits: String = s.trim().chars().filter(|c| *c != ',').collect();

    if digits.is_empty() {
        return Err(format!("no digits in amount {:?}", s));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("invalid amount {:?}", s));
    }

    digits
        .parse::<u64>()
        .map_err(|e| format!("amount {:?} out of range: {}", s, e))
}

/// Format an amount with Indian digit grouping (12,34,567).
pub fn format_rupee_amount(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}
