//! Number formatting for the displays.
//!
//! Stored state always keeps the raw numeric string; everything here is
//! presentation only.

/// Upper bound on fractional digits shown in the displays.
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Format a stored value for display.
///
/// Strings that do not parse as a finite number (notably the `Error`
/// sentinel) are returned unchanged. Numbers are rounded to at most
/// [`MAX_FRACTION_DIGITS`] fractional digits, trailing zeros are dropped and
/// the integer part is grouped in thousands with `,`.
///
/// ```rust
/// use tallyho::engine::format_number;
///
/// assert_eq!(format_number("1234567.8912345678"), "1,234,567.8912345679");
/// assert_eq!(format_number("0.50"), "0.5");
/// assert_eq!(format_number("Error"), "Error");
/// ```
pub fn format_number(input: &str) -> String {
    match parse_operand(input) {
        Some(value) => format_value(value),
        None => input.to_string(),
    }
}

/// Format an already-parsed finite value.
pub fn format_value(value: f64) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Canonical decimal string stored after a computation.
///
/// Shortest representation that round-trips, never in exponent notation.
/// Negative zero is stored as `"0"`.
pub fn canonical_decimal(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Parse a stored operand; `None` for the sentinel or non-finite input.
pub fn parse_operand(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
