//! Decoding of the order-preserving encoding

use crate::bits::{BitReader, BitWriter};
use crate::decimal::Decimal;
use crate::digits::{decode_digits, EMPTY_RUN};
use crate::encoder::{field_width, NEGATIVE_RESERVED_BITS, POSITIVE_RESERVED_BITS, ZERO_CLASS};
use crate::error::{Error, Result};
use crate::varint::VarInt;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// Decode one decimal from the front of `bytes`.
///
/// Returns the decimal and the number of bytes it occupied; anything after
/// that belongs to the next key field.
///
/// # Errors
///
/// Returns a corruption [`Error`] for truncated or structurally invalid input.
pub fn decode_from_bytes(bytes: &[u8]) -> Result<(Decimal, usize)> {
    let Some(&first) = bytes.first() else {
        return Err(Error::UnexpectedEndOfInput);
    };

    let (positive, reserved_bits) = match first >> 6 {
        0b10 | 0b11 => (true, POSITIVE_RESERVED_BITS),
        0b00 => (false, NEGATIVE_RESERVED_BITS),
        _ => return decode_zero(bytes),
    };

    let mut reader = BitReader::new(bytes);
    for _ in 0..reserved_bits {
        reader.read_bit()?;
    }
    reader.set_invert(!positive);
    let exponent = read_exponent_field(&mut reader, reserved_bits)?;
    debug_assert_eq!(reader.position() % 8, 0);

    let header_len = reader.bytes_consumed();
    let (digits, digits_len) = decode_digits(&bytes[header_len..], !positive)?;

    Ok((
        Decimal::from_parts(digits, exponent, positive),
        header_len + digits_len,
    ))
}

fn decode_zero(bytes: &[u8]) -> Result<(Decimal, usize)> {
    if bytes[0] != ZERO_CLASS {
        return Err(Error::InvalidClass(bytes[0]));
    }
    match bytes.get(1) {
        Some(&EMPTY_RUN) => Ok((Decimal::zero(), 2)),
        Some(&other) => Err(Error::InvalidDigitPair(other)),
        None => Err(Error::UnexpectedEndOfInput),
    }
}

fn read_exponent_field(reader: &mut BitReader, reserved_bits: usize) -> Result<VarInt> {
    let non_negative = reader.read_bit()?;
    let flip = !non_negative;

    let width = reader.read_unary(!flip)? + 1;
    let magnitude_bits = 7 * width - reserved_bits - 1;

    // Left-pad to whole bytes so the magnitude can be read big-endian
    let mut buf = Vec::with_capacity(magnitude_bits.div_ceil(8));
    let mut writer = BitWriter::new(&mut buf);
    writer.write_bits(0, magnitude_bits.div_ceil(8) * 8 - magnitude_bits);
    for _ in 0..magnitude_bits {
        let bit = reader.read_bit()? != flip;
        writer.write_bit(bit);
    }
    let magnitude = BigUint::from_bytes_be(&buf);

    if field_width(magnitude.bits(), reserved_bits) != width {
        return Err(Error::InvalidExponentField("length is not minimal"));
    }
    if flip && magnitude.is_zero() {
        return Err(Error::InvalidExponentField("negative zero exponent"));
    }

    let sign = if flip { Sign::Minus } else { Sign::Plus };
    Ok(VarInt::from(BigInt::from_biguint(sign, magnitude)))
}
