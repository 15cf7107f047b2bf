//! Number formatting and parsing for the LCD

/// Fractional digits shown for results and table values
pub const OUTPUT_PRECISION: usize = 4;

/// Fixed-point number formatting capability
///
/// Implementations right-align `value` in at least `width` cells with
/// exactly `precision` fractional digits. Output wider than `width` is
/// returned unchanged; the display drops whatever falls off the panel.
pub trait NumberFormat {
    fn format(&self, value: f32, width: usize, precision: usize) -> String;
}

/// Formatting through `core::fmt`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedPoint;

impl NumberFormat for FixedPoint {
    fn format(&self, value: f32, width: usize, precision: usize) -> String {
        format!("{value:>width$.precision$}")
    }
}

/// Parses the longest numeric prefix of `text`
///
/// Accepts an optional sign, digits, and an optional fraction. Anything
/// after the prefix is ignored; no digits at all yields 0.0.
pub fn parse_leading_float(text: &[u8]) -> f32 {
    let mut end = 0;
    if matches!(text.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let mut digits = 0;
    let mut seen_point = false;
    while let Some(&byte) = text.get(end) {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return 0.0;
    }

    core::str::from_utf8(&text[..end])
        .ok()
        .and_then(|prefix| prefix.parse().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point_width_and_precision() {
        let f = FixedPoint;
        assert_eq!(f.format(14.0, 16, OUTPUT_PRECISION), "         14.0000");
        assert_eq!(f.format(-2.5, 14, OUTPUT_PRECISION), "       -2.5000");
        assert_eq!(f.format(1.0 / 3.0, 0, 2), "0.33");
    }

    #[test]
    fn test_fixed_point_overflows_width() {
        let text = FixedPoint.format(123456789.0, 4, OUTPUT_PRECISION);
        assert!(text.len() > 4);
        assert!(text.ends_with(".0000"));
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_leading_float(b"12"), 12.0);
        assert_eq!(parse_leading_float(b"-1.5"), -1.5);
        assert_eq!(parse_leading_float(b".25"), 0.25);
        assert_eq!(parse_leading_float(b"3."), 3.0);
    }

    #[test]
    fn test_parse_stops_at_garbage() {
        assert_eq!(parse_leading_float(b"1-2"), 1.0);
        assert_eq!(parse_leading_float(b"2.5.1"), 2.5);
        assert_eq!(parse_leading_float(b"4-"), 4.0);
    }

    #[test]
    fn test_parse_without_digits_is_zero() {
        assert_eq!(parse_leading_float(b""), 0.0);
        assert_eq!(parse_leading_float(b"-"), 0.0);
        assert_eq!(parse_leading_float(b"."), 0.0);
        assert_eq!(parse_leading_float(b"--3"), 0.0);
    }
}
