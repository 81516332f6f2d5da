use crate::models::parse_timestamp;

/// Format an amount in euros, e.g. `€12.50`
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("-€{:.2}", -amount)
    } else {
        format!("€{:.2}", amount)
    }
}

/// Format a backend timestamp for an order card.
/// Unparseable input is shown as-is; a missing one as `-`.
pub fn format_order_time(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => match parse_timestamp(raw) {
            Some(dt) => dt.format("%b %d, %Y %H:%M").to_string(),
            None => raw.to_string(),
        },
        None => "-".to_string(),
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
