//! Bit-level cursors used for the exponent field of the comparable encoding.

use crate::error::{Error, Result};

/// Appends bits, most significant first, to a caller-owned byte buffer.
///
/// Every bit can be written through an inversion mask so that negative
/// decimals get their complemented exponent field without a second pass.
pub struct BitWriter<'a> {
    bytes: &'a mut Vec<u8>,
    bit_pos: usize, // Position within current byte (0-7)
    invert: bool,
}

impl<'a> BitWriter<'a> {
    pub fn new(bytes: &'a mut Vec<u8>) -> Self {
        Self {
            bytes,
            bit_pos: 0,
            invert: false,
        }
    }

    /// Complement every bit written from now on
    pub fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    /// Write a single bit
    pub fn write_bit(&mut self, bit: bool) {
        if self.bit_pos == 0 {
            self.bytes.push(0);
        }

        if bit != self.invert {
            let byte_idx = self.bytes.len() - 1;
            self.bytes[byte_idx] |= 1 << (7 - self.bit_pos);
        }

        self.bit_pos = (self.bit_pos + 1) % 8;
    }

    /// Write the low `num_bits` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, num_bits: usize) {
        for i in (0..num_bits).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
    }

    #[must_use]
    pub const fn is_byte_aligned(&self) -> bool {
        self.bit_pos == 0
    }
}

/// Reads bits, most significant first, with the same optional inversion.
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_pos: usize, // Global bit position
    invert: bool,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        BitReader {
            bytes,
            bit_pos: 0,
            invert: false,
        }
    }

    pub fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    /// Read a single bit
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEndOfInput`] if no bits remain.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte_idx = self.bit_pos / 8;
        let bit_offset = self.bit_pos % 8;

        let Some(&byte) = self.bytes.get(byte_idx) else {
            return Err(Error::UnexpectedEndOfInput);
        };

        let bit = (byte >> (7 - bit_offset)) & 1 == 1;
        self.bit_pos += 1;

        Ok(bit != self.invert)
    }

    /// Count consecutive bits equal to `bit`, consuming them and the
    /// terminating opposite bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEndOfInput`] if the run is not terminated.
    pub fn read_unary(&mut self, bit: bool) -> Result<usize> {
        let mut count = 0;
        while self.read_bit()? == bit {
            count += 1;
        }
        Ok(count)
    }

    /// Get current bit position
    #[must_use]
    pub const fn position(&self) -> usize {
        self.bit_pos
    }

    /// Number of whole bytes consumed so far
    #[must_use]
    pub const fn bytes_consumed(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }
}
