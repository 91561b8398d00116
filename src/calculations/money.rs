use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_NUMBER_REGEX: Regex =
        Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap();
}

/// Reads the leading decimal number of `text`, ignoring anything after it.
///
/// "12.5/mo" reads as 12.5, "abc" and "" read as nothing. Non-finite results are discarded.
pub fn parse_number(text: &str) -> Option<f64> {
    LEADING_NUMBER_REGEX
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Largest amount a single money field can hold. Sums over every field stay finite.
pub const MAX_AMOUNT: f64 = 1e15;

/// Coerces a money field to a non-negative amount. Unparseable or negative text is 0,
/// anything above `MAX_AMOUNT` is clamped to it.
pub fn parse_money(text: &str) -> f64 {
    match parse_number(text) {
        Some(value) if value > 0.0 => value.min(MAX_AMOUNT),
        _ => 0.0,
    }
}

/// A strictly positive area, or `None` when there is no usable value.
pub fn parse_area(text: &str) -> Option<f64> {
    parse_number(text).filter(|value| *value > 0.0)
}

/// Rounds halves towards positive infinity, so 2.5 -> 3 and -2.5 -> -2.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
