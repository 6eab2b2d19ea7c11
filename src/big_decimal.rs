//! `BigDecimal` wire form: a big-endian `i32` scale followed by the unscaled
//! value as minimal big-endian two's-complement bytes.
//!
//! The value is `unscaled * 10^scale`. A [`Decimal`] with `n` digits and
//! exponent `E` therefore has `unscaled = d1d2...dn` and `scale = E - n`.

use crate::decimal::Decimal;
use crate::error::{Error, Result};
use crate::varint::VarInt;

/// Bytes taken by the scale prefix
pub const BIG_DECIMAL_SCALE_LEN: usize = 4;

/// Encode, or `None` when the scale does not fit in an `i32`.
pub fn encode(decimal: &Decimal) -> Option<Vec<u8>> {
    let digits = decimal.digits();
    #[allow(clippy::cast_possible_wrap)]
    let scale = decimal.exponent().add_i64(-(digits.len() as i64));

    let Some(scale) = scale.to_i64().ok().and_then(|s| i32::try_from(s).ok()) else {
        tracing::debug!(exponent = %decimal.exponent(), "BigDecimal scale out of range");
        return None;
    };

    let unscaled = VarInt::from_decimal_digits(decimal.is_negative(), digits)?;
    let unscaled = unscaled.to_signed_bytes_be();

    let mut out = Vec::with_capacity(BIG_DECIMAL_SCALE_LEN + unscaled.len());
    out.extend_from_slice(&scale.to_be_bytes());
    out.extend_from_slice(&unscaled);
    Some(out)
}

/// Decode the whole of `bytes`.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEndOfInput`] if there is no room for the scale
/// and at least one byte of unscaled value.
pub fn decode(bytes: &[u8]) -> Result<Decimal> {
    if bytes.len() <= BIG_DECIMAL_SCALE_LEN {
        return Err(Error::UnexpectedEndOfInput);
    }
    let (scale, unscaled) = bytes.split_at(BIG_DECIMAL_SCALE_LEN);
    let scale = i32::from_be_bytes([scale[0], scale[1], scale[2], scale[3]]);

    let unscaled = VarInt::from_signed_bytes_be(unscaled);
    let digits = unscaled.decimal_digits();
    let exponent = VarInt::from(digits.len()).add_i64(i64::from(scale));

    Ok(Decimal::from_magnitude_digits(
        !unscaled.is_negative(),
        digits,
        exponent,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_layout() {
        // 1.2 = 12 * 10^-1
        assert_eq!(encode(&dec("1.2")).unwrap(), vec![0xFF, 0xFF, 0xFF, 0xFF, 12]);
        // 120 = 12 * 10^1
        assert_eq!(encode(&dec("120")).unwrap(), vec![0, 0, 0, 1, 12]);
        // -1.28 = -128 * 10^-2: one byte of two's complement
        assert_eq!(encode(&dec("-1.28")).unwrap(), vec![0xFF, 0xFF, 0xFF, 0xFE, 0x80]);
        // -1.29 needs a second byte
        assert_eq!(
            encode(&dec("-1.29")).unwrap(),
            vec![0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0x7F]
        );
        assert_eq!(encode(&Decimal::zero()).unwrap(), vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_scale_limits() {
        // scale = E - n
        let lowest = encode(&dec("-1.36e-2147483646")).unwrap();
        assert_eq!(&lowest[..BIG_DECIMAL_SCALE_LEN], &i32::MIN.to_be_bytes());
        assert!(encode(&dec("-1.36e-2147483647")).is_none());

        let highest = encode(&dec("-9847.236776e+2147483653")).unwrap();
        assert_eq!(&highest[..BIG_DECIMAL_SCALE_LEN], &i32::MAX.to_be_bytes());
        assert!(encode(&dec("-9847.236780e+2147483653")).is_none());

        assert!(encode(&dec("1e-36546632732954564789")).is_none());
    }

    #[test]
    fn test_decode_strips_trailing_zeros() {
        // 1200 * 10^-2 == 12
        let decoded = decode(&[0xFF, 0xFF, 0xFF, 0xFE, 0x04, 0xB0]).unwrap();
        assert_eq!(decoded, dec("12"));
        assert_eq!(decoded.digits(), &[1, 2]);

        let decoded = decode(&[0x80, 0, 0, 0, 0]).unwrap();
        assert!(decoded.is_zero());
    }

    #[test]
    fn test_decode_extreme_scales() {
        for input in ["-1.36e-2147483646", "-9847.236776e+2147483653", "7e2147483647"] {
            let d = dec(input);
            assert_eq!(decode(&encode(&d).unwrap()).unwrap(), d, "{input}");
        }
    }

    #[test]
    fn test_roundtrip() {
        for input in ["-9847.236776e+2147483653", "-1.34", "0", "120e0", "2638.2e+3624"] {
            let d = dec(input);
            assert_eq!(decode(&encode(&d).unwrap()).unwrap(), d, "{input}");
        }
    }

    #[test]
    fn test_decode_short_input() {
        for len in 0..=BIG_DECIMAL_SCALE_LEN {
            let err = decode(&[0; 5][..len]).unwrap_err();
            assert!(err.is_corruption());
        }
    }
}
