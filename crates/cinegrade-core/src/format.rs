//! Number formatting shared by the XMP and `.cube` writers.
//!
//! Editors that consume these files were built against a writer that rounds
//! decimal ties away from zero (`0.125` → `"0.13"`) and integers half toward
//! +∞ (`-2.5` → `"-2"`). Rust's `{:.N}` rounds ties to even, so fixed-point
//! output is rounded here on the exact decimal expansion instead.

use std::fmt::{self, Write};

/// Digits requested from the exact expansion. Any double at or above the
/// zero threshold is resolved well before this position.
const EXACT_DIGITS: usize = 80;

/// Below this magnitude every supported precision rounds to zero.
const ZERO_THRESHOLD: f64 = 1e-20;

const BUF_LEN: usize = 128;

/// Fixed-capacity byte buffer used to stage digits without allocating.
struct DigitBuf {
    bytes: [u8; BUF_LEN],
    len: usize,
}

impl DigitBuf {
    fn new() -> Self {
        Self {
            bytes: [0; BUF_LEN],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Write for DigitBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > BUF_LEN {
            return Err(fmt::Error);
        }
        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Append `value` with exactly `digits` fractional digits.
///
/// Negative values keep their sign even when they round to zero, and `-0.0`
/// prints unsigned. Digits are capped at 20.
pub fn push_fixed(out: &mut String, value: f64, digits: usize) {
    let digits = digits.min(20);

    if !value.is_finite() {
        out.push_str(if value.is_nan() {
            "NaN"
        } else if value > 0.0 {
            "inf"
        } else {
            "-inf"
        });
        return;
    }

    if value < 0.0 {
        out.push('-');
    }
    let magnitude = value.abs();

    if magnitude < ZERO_THRESHOLD {
        out.push('0');
        if digits > 0 {
            out.push('.');
            out.extend(std::iter::repeat_n('0', digits));
        }
        return;
    }

    let mut exact = DigitBuf::new();
    if write!(exact, "{:.*}", EXACT_DIGITS, magnitude).is_err() {
        // Magnitudes this large carry no fractional information anyway.
        out.push_str(&format!("{:.*}", digits, magnitude));
        return;
    }

    round_half_up(out, exact.as_bytes(), digits);
}

/// Round an exact `int.frac` digit string to `digits` places, ties up.
fn round_half_up(out: &mut String, exact: &[u8], digits: usize) {
    let point = exact.iter().position(|&b| b == b'.').unwrap_or(exact.len());
    let keep_end = if digits == 0 { point } else { point + 1 + digits };
    let next = if digits == 0 { point + 1 } else { keep_end };
    let round_up = exact.get(next).is_some_and(|&d| d >= b'5');

    let mut storage = [0u8; BUF_LEN];
    let kept = &mut storage[..keep_end];
    kept.copy_from_slice(&exact[..keep_end]);

    let mut carry = round_up;
    for byte in kept.iter_mut().rev() {
        if !carry {
            break;
        }
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                carry = false;
            }
        }
    }

    if carry {
        out.push('1');
    }
    out.extend(kept.iter().map(|&b| b as char));
}

/// `value` with exactly `digits` fractional digits.
pub fn format_fixed(value: f64, digits: usize) -> String {
    let mut out = String::new();
    push_fixed(&mut out, value, digits);
    out
}

/// Nearest integer, halves rounded toward +∞.
pub fn round_half_up_int(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Integer text for a parameter value. Never prints `-0`.
pub fn format_rounded(value: f64) -> String {
    if !value.is_finite() {
        return format_fixed(value, 0);
    }
    let rounded = round_half_up_int(value);
    // Adding zero normalizes -0.0.
    format!("{}", rounded + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_decimals() {
        assert_eq!(format_fixed(0.5, 2), "0.50");
        assert_eq!(format_fixed(-1.0, 2), "-1.00");
        assert_eq!(format_fixed(0.3, 2), "0.30");
        assert_eq!(format_fixed(5.0, 2), "5.00");
        assert_eq!(format_fixed(0.0, 2), "0.00");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(-0.375, 2), "-0.38");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(1.0 / 128.0, 6), "0.007813");
    }

    #[test]
    fn test_binary_representation_is_respected() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(format_fixed(1.005, 2), "1.00");
        // 0.1 + 0.2 = 0.30000000000000004
        assert_eq!(format_fixed(0.1 + 0.2, 6), "0.300000");
    }

    #[test]
    fn test_carry_propagates_through_integer_part() {
        assert_eq!(format_fixed(9.9999999, 6), "10.000000");
        assert_eq!(format_fixed(0.9999996, 6), "1.000000");
        assert_eq!(format_fixed(-99.996, 2), "-100.00");
    }

    #[test]
    fn test_six_decimals_for_lut_values() {
        assert_eq!(format_fixed(1.0, 6), "1.000000");
        assert_eq!(format_fixed(0.075858, 6), "0.075858");
        assert_eq!(format_fixed(1.0 / 3.0, 6), "0.333333");
        assert_eq!(format_fixed(2.0 / 3.0, 6), "0.666667");
    }

    #[test]
    fn test_tiny_negative_keeps_sign() {
        assert_eq!(format_fixed(-0.001, 2), "-0.00");
        assert_eq!(format_fixed(1e-30, 3), "0.000");
    }

    #[test]
    fn test_rounded_integers() {
        assert_eq!(format_rounded(12.4), "12");
        assert_eq!(format_rounded(12.5), "13");
        assert_eq!(format_rounded(-2.5), "-2");
        assert_eq!(format_rounded(-2.6), "-3");
        assert_eq!(format_rounded(-0.4), "0");
        assert_eq!(format_rounded(6800.0), "6800");
        assert_eq!(format_rounded(0.49999999999999994), "0");
    }
}
