//! PHP shorthand byte values (`128M`, `1G`, `512K`).

/// One megabyte, as PHP counts it.
pub const MEGABYTE: i64 = 1024 * 1024;

/// Parse a PHP shorthand size into bytes.
///
/// Leading whitespace is ignored, then an optional sign and digits are read
/// the way `intval` would, and a trailing `K`, `M` or `G` (any case) scales
/// the number. Anything without leading digits parses as `0`.
pub fn parse_size(value: &str) -> i64 {
    let trimmed = value.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    let number: i64 = digits.parse().unwrap_or(0);

    let multiplier = match rest[digits.len()..].trim_start().chars().next() {
        Some('k') | Some('K') => 1024,
        Some('m') | Some('M') => MEGABYTE,
        Some('g') | Some('G') => 1024 * MEGABYTE,
        _ => 1,
    };

    let bytes = number.saturating_mul(multiplier);
    if negative {
        -bytes
    } else {
        bytes
    }
}

/// Render a byte count as whole megabytes for messages.
pub fn format_megabytes(bytes: i64) -> String {
    format!("{}MB", bytes / MEGABYTE)
}
