//! Digit run of the comparable encoding.
//!
//! Digits are packed two per byte as the pair value `v = 10a + b` (a missing
//! final `b` counts as 0). A pair that is followed by another is written as
//! `2v + 1`, the last pair as `2v`, so the low bit says whether the run goes
//! on. For negative decimals every byte is complemented.

use crate::error::{Error, Result};

/// Byte that terminates an empty run. Only zero produces it.
pub const EMPTY_RUN: u8 = 0x00;

/// Append the digit run for `digits` to `out`.
///
/// `digits` must be canonical: non-empty, first and last digit non-zero.
pub fn encode_digits(out: &mut Vec<u8>, digits: &[u8], negative: bool) {
    debug_assert!(!digits.is_empty());

    let mask = if negative { 0xFF } else { 0x00 };
    out.reserve(digits.len().div_ceil(2));

    let mut pairs = digits.chunks(2).peekable();
    while let Some(pair) = pairs.next() {
        let value = pair[0] * 10 + pair.get(1).copied().unwrap_or(0);
        let more = u8::from(pairs.peek().is_some());
        out.push((value * 2 + more) ^ mask);
    }
}

/// Decode a digit run from the front of `bytes`.
///
/// Returns the canonical digits and the number of bytes consumed.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEndOfInput`] if the run is not terminated,
/// [`Error::InvalidDigitPair`] for a pair above 99, and
/// [`Error::NonCanonicalDigits`] for a leading or trailing zero digit.
pub fn decode_digits(bytes: &[u8], negative: bool) -> Result<(Vec<u8>, usize)> {
    let mask = if negative { 0xFF } else { 0x00 };
    let mut digits = Vec::with_capacity(bytes.len() * 2);

    for (i, &raw) in bytes.iter().enumerate() {
        let byte = raw ^ mask;
        let value = byte >> 1;
        if value > 99 {
            return Err(Error::InvalidDigitPair(raw));
        }
        digits.push(value / 10);
        digits.push(value % 10);

        if byte & 1 == 0 {
            if digits.last() == Some(&0) {
                digits.pop();
            }
            if digits.first() == Some(&0) {
                return Err(Error::NonCanonicalDigits("leading zero digit"));
            }
            if digits.last() == Some(&0) {
                return Err(Error::NonCanonicalDigits("trailing zero digit"));
            }
            return Ok((digits, i + 1));
        }
    }

    Err(Error::UnexpectedEndOfInput)
}
