//! Classification of pending runs as decimal numeric literals

use std::str::FromStr;

#[derive(Debug, PartialEq, Clone, Copy)]
pub(super) enum NumericParse {
    /// The whole run is a decimal literal with a finite value that is
    /// either zero or normal
    Number(f64),
    /// The whole run is a decimal literal, but its magnitude exceeds `f64::MAX`
    Overflow,
    /// The whole run is a decimal literal whose magnitude is below
    /// `f64::MIN_POSITIVE`: a subnormal result, or a non-zero mantissa
    /// that rounds to zero
    Underflow,
    /// Anything else, the run is an atom
    NotANumber,
}

/// Returns `true` if every byte may appear in a decimal literal and there
/// is at least one digit.
///
/// This keeps textual specials (`inf`, `NaN`, `infinity`) that `f64::from_str`
/// would accept out of the numbers. Shape errors like `1.2.3` or `1e` pass
/// here and are rejected by the actual parse.
fn has_decimal_shape(text: &[u8]) -> bool {
    text.iter()
        .all(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'))
        && text.iter().any(u8::is_ascii_digit)
}

/// Whether any digit before the exponent is non-zero.
fn has_nonzero_mantissa(text: &[u8]) -> bool {
    text.iter()
        .take_while(|b| !matches!(b, b'e' | b'E'))
        .any(|b| matches!(b, b'1'..=b'9'))
}

/// Tries to parse the whole run as a decimal `f64`.
///
/// No prefix matching: a single trailing byte that doesn't belong to the
/// literal makes the run `NotANumber`.
pub(super) fn parse_numeric(text: &[u8]) -> NumericParse {
    if !has_decimal_shape(text) {
        return NumericParse::NotANumber;
    }

    // Shape check above guarantees ASCII
    let Ok(text_str) = std::str::from_utf8(text) else {
        return NumericParse::NotANumber;
    };

    let Ok(value) = f64::from_str(text_str) else {
        return NumericParse::NotANumber;
    };

    if value.is_infinite() {
        NumericParse::Overflow
    } else if value.is_subnormal() || (value == 0.0 && has_nonzero_mantissa(text)) {
        NumericParse::Underflow
    } else {
        NumericParse::Number(value)
    }
}
