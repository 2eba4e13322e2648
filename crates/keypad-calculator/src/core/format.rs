//! Result rounding and canonical display formatting

/// Number of fractional digits results are rounded to
pub const PRECISION: i32 = 12;

/// [`PRECISION`] as a digit count for string slicing
pub const PRECISION_DIGITS: usize = 12;

/// Rendered value of a positive infinite result
pub const INFINITY_SENTINEL: &str = "Infinity";

/// Rendered value of a negative infinite result
pub const NEG_INFINITY_SENTINEL: &str = "-Infinity";

/// Rendered value of a not-a-number result
pub const NAN_SENTINEL: &str = "NaN";

/// Scaled magnitude above which an f64 has no fractional bits left
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Rounds half up (towards positive infinity) to [`PRECISION`] decimals
///
/// Values whose scaled magnitude has no fractional bits left are already
/// rounded at this precision and are returned unchanged.
#[must_use]
pub fn round_to_precision(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let scale = 10f64.powi(PRECISION);
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }

    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    let result = rounded / scale;

    // -0 renders as "0"
    if result == 0.0 {
        0.0
    } else {
        result
    }
}

/// Formats an evaluation result for the display
///
/// Finite values are rounded and always rendered in fixed-point notation
/// with trailing fractional zeros removed. Non-finite values render as
/// their sentinel.
#[must_use]
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return NAN_SENTINEL.to_string();
    }
    if value.is_infinite() {
        let sentinel = if value > 0.0 {
            INFINITY_SENTINEL
        } else {
            NEG_INFINITY_SENTINEL
        };
        return sentinel.to_string();
    }

    // `Display` for f64 never switches to exponent notation and prints the
    // shortest representation that round-trips.
    let mut fixed = format!("{}", round_to_precision(value));
    if let Some(point) = fixed.find('.') {
        fixed.truncate(point + 1 + PRECISION_DIGITS);
    }

    trim_fraction(&fixed).to_string()
}

/// Strips trailing zero fractional digits and a trailing bare decimal point
#[must_use]
pub fn trim_fraction(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}

/// Returns true if `text` is one of the non-finite sentinels
#[must_use]
pub fn is_sentinel(text: &str) -> bool {
    matches!(
        text,
        INFINITY_SENTINEL | NEG_INFINITY_SENTINEL | NAN_SENTINEL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Rounding tests =====

    #[test]
    fn test_round_thirds() {
        assert_eq!(round_to_precision(1.0 / 3.0), 0.333333333333);
        assert_eq!(round_to_precision(2.0 / 3.0), 0.666666666667);
    }

    #[test]
    fn test_round_removes_float_noise() {
        assert_eq!(round_to_precision(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_round_negative_values() {
        assert_eq!(round_to_precision(-1.0 / 3.0), -0.333333333333);
        assert_eq!(round_to_precision(-10.0), -10.0);
    }

    #[test]
    fn test_round_negative_zero() {
        assert!(round_to_precision(-0.0).is_sign_positive());
        assert!(round_to_precision(-1e-15).is_sign_positive());
    }

    #[test]
    fn test_round_huge_values_unchanged() {
        assert_eq!(round_to_precision(1e300), 1e300);
        assert_eq!(round_to_precision(f64::INFINITY), f64::INFINITY);
        assert!(round_to_precision(f64::NAN).is_nan());
    }

    // ===== Formatting tests =====

    #[test]
    fn test_format_integers() {
        assert_eq!(format_result(14.0), "14");
        assert_eq!(format_result(-10.0), "-10");
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(-0.0), "0");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_result(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_result(0.25), "0.25");
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(-2.5), "-2.5");
    }

    #[test]
    fn test_format_never_uses_exponent() {
        assert_eq!(format_result(1e21), "1000000000000000000000");
        assert_eq!(format_result(1e-7), "0.0000001");
        assert_eq!(format_result(1e-13), "0");
        assert!(!format_result(1e300).contains('e'));
    }

    #[test]
    fn test_precision_digits_match_precision() {
        assert_eq!(usize::try_from(PRECISION).unwrap(), PRECISION_DIGITS);
        let formatted = format_result(2.0 / 3.0);
        let (_, fraction) = formatted.split_once('.').unwrap();
        assert_eq!(fraction.len(), PRECISION_DIGITS);
    }

    #[test]
    fn test_format_sentinels() {
        assert_eq!(format_result(f64::INFINITY), "Infinity");
        assert_eq!(format_result(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_result(f64::NAN), "NaN");
    }

    #[test]
    fn test_trim_fraction() {
        assert_eq!(trim_fraction("1.500"), "1.5");
        assert_eq!(trim_fraction("2.000"), "2");
        assert_eq!(trim_fraction("3."), "3");
        assert_eq!(trim_fraction("100"), "100");
    }

    #[test]
    fn test_is_sentinel() {
        assert!(is_sentinel("Infinity"));
        assert!(is_sentinel("-Infinity"));
        assert!(is_sentinel("NaN"));
        assert!(!is_sentinel("0"));
    }
}
