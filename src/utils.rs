use crate::config::PRECISION_DECIMALS;
use once_cell::sync::Lazy;
use regex::Regex;

// Leading decimal literal, optionally signed and with an exponent
static FLOAT_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap());
static INFINITY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?)Infinity").unwrap());

/// Parse the leading numeric prefix of `input`, the way form attributes are
/// coerced to numbers in the browser.
///
/// # Examples
/// ```
/// use multi_slider::utils::parse_float;
/// assert_eq!(parse_float("42"), Some(42.0));
/// assert_eq!(parse_float("  12.5px"), Some(12.5));
/// assert_eq!(parse_float("abc"), None);
/// ```
pub fn parse_float(input: &str) -> Option<f64> {
    if let Some(captures) = FLOAT_PREFIX_REGEX.captures(input) {
        return captures[1].parse::<f64>().ok();
    }
    INFINITY_REGEX.captures(input).map(|captures| {
        if &captures[1] == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    })
}

/// Coerce text into a number, yielding NaN when there is no numeric prefix.
pub fn coerce_number(input: &str) -> f64 {
    parse_float(input).unwrap_or(f64::NAN)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to the precision used for pixel offsets and stored values.
pub fn round2(value: f64) -> f64 {
    round_to(value, PRECISION_DECIMALS)
}

/// Human-readable value, without trailing zeros and without negative zero.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    round2(value).to_string()
}

/// CSS pixel length for a style property.
pub fn format_px(px: f64) -> String {
    format!("{}px", format_value(px))
}
