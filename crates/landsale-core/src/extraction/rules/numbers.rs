//! Numeric literal parsing for European-formatted notices.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Smallest area accepted from unlabelled context.
pub const MIN_AREA_M2: u32 = 1;
/// Largest area accepted from unlabelled context.
pub const MAX_AREA_M2: u32 = 999_999;
/// Four-digit numbers in this range are read as calendar years.
pub const YEAR_RANGE: std::ops::RangeInclusive<u32> = 1900..=2100;

/// Parse a European-formatted decimal (e.g., "21.000,00").
///
/// Every `.` is a thousands separator and `,` is the decimal point.
pub fn parse_european_decimal(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Parse a price literal that is either European-formatted ("1.500,00")
/// or a plain decimal ("1500.00").
pub fn parse_price_literal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.contains(',') || has_thousands_groups(s) {
        parse_european_decimal(s)
    } else {
        Decimal::from_str(s).ok()
    }
}

/// Every dot is followed by exactly three digits.
fn has_thousands_groups(s: &str) -> bool {
    let mut groups = s.split('.');
    groups.next();
    let mut any = false;
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        any = true;
    }
    any
}

/// Parse an area literal: a plain digit sequence.
pub fn parse_area(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Whether `area` is believable for a number found near a parcel id.
pub fn is_plausible_area(area: u32) -> bool {
    (MIN_AREA_M2..=MAX_AREA_M2).contains(&area) && !YEAR_RANGE.contains(&area)
}

/// Format a decimal European style (21.000,00).
pub fn format_european_decimal(amount: Decimal) -> String {
    let s = format!("{:.2}", amount);
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return format!("{sign}{s}");
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{sign}{formatted},{decimal_part}")
}
