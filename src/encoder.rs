//! Order-preserving encoding of decimals
//!
//! Layout of an encoded decimal:
//!
//! ```text
//! zero      01000000 00000000
//! positive  1  [exponent field, 1 reserved bit]  [digit run]
//! negative  00 [exponent field, 2 reserved bits] [digit run]   (both complemented)
//! ```
//!
//! The exponent field of `n` bytes holds the exponent sign (1 for `E >= 0`),
//! `n - 1` one-bits and a zero-bit giving the length, and `7n - r - 1`
//! magnitude bits where `r` is the number of class bits in front of it. For a
//! negative exponent the length and magnitude bits are complemented, so a
//! larger magnitude sorts lower. The field has no upper bound.

use crate::bits::BitWriter;
use crate::digits::{encode_digits, EMPTY_RUN};
use crate::varint::VarInt;

/// Leading byte of the zero encoding
pub const ZERO_CLASS: u8 = 0b0100_0000;

/// Class bits in front of the exponent field of a positive decimal
pub const POSITIVE_RESERVED_BITS: usize = 1;

/// Class bits in front of the exponent field of a negative decimal
pub const NEGATIVE_RESERVED_BITS: usize = 2;

/// Append the comparable encoding of `(positive, exponent, digits)` to `out`.
///
/// `digits` must be canonical; an empty slice encodes zero whatever the sign.
pub fn encode_from_parts(out: &mut Vec<u8>, positive: bool, exponent: &VarInt, digits: &[u8]) {
    if digits.is_empty() {
        out.push(ZERO_CLASS);
        out.push(EMPTY_RUN);
        return;
    }

    let mut writer = BitWriter::new(out);
    let reserved_bits = if positive {
        writer.write_bit(true);
        POSITIVE_RESERVED_BITS
    } else {
        writer.write_bit(false);
        writer.write_bit(false);
        NEGATIVE_RESERVED_BITS
    };

    // Negative decimals sort in reverse: complement everything after the class
    writer.set_invert(!positive);
    write_exponent_field(&mut writer, exponent, reserved_bits);
    debug_assert!(writer.is_byte_aligned());

    encode_digits(out, digits, !positive);
}

/// Number of bytes the exponent field needs for a magnitude of `magnitude_bits` bits.
#[allow(clippy::cast_possible_truncation)]
pub fn field_width(magnitude_bits: u64, reserved_bits: usize) -> usize {
    (magnitude_bits as usize + reserved_bits + 1).div_ceil(7).max(1)
}

fn write_exponent_field(writer: &mut BitWriter, exponent: &VarInt, reserved_bits: usize) {
    let non_negative = !exponent.is_negative();
    let magnitude = exponent.as_bigint().magnitude();
    let width = field_width(magnitude.bits(), reserved_bits);
    let magnitude_bits = 7 * width - reserved_bits - 1;

    writer.write_bit(non_negative);

    // A negative exponent complements its length and magnitude
    let flip = !non_negative;
    for _ in 1..width {
        writer.write_bit(!flip);
    }
    writer.write_bit(flip);

    for i in (0..magnitude_bits as u64).rev() {
        writer.write_bit(magnitude.bit(i) != flip);
    }
}
