// Small parsing, arithmetic and formatting helpers.
//
// Kept free of any knowledge about reviews so the engine and the
// presentation code can share them.
use num_format::{Locale, ToFormattedString};

/// Parse an integer column value, tolerating surrounding whitespace only.
pub fn parse_i64_safe(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Arithmetic mean of integer ratings. `None` for an empty slice, so callers
/// never divide by zero and can tell "no data" apart from an average of 0.
pub fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().sum();
    Some(sum as f64 / values.len() as f64)
}

pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// A year typed by the user must be exactly four ASCII digits.
pub fn is_valid_year(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_digit())
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

/// Shortest text that round-trips the float, always with a fractional part
/// (`4.0`, `4.33`).
pub fn format_float(n: f64) -> String {
    format!("{:?}", n)
}
