//! Arbitrary-precision signed integers.
//!
//! [`VarInt`] carries the exponent of every [`Decimal`](crate::Decimal), so it
//! must never be narrowed to a machine word behind the caller's back.

use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive, Zero};
use std::fmt;
use std::str::FromStr;

/// Arbitrary-precision signed integer
///
/// Ordering is numeric: sign first, then magnitude. Zero renders as `"0"`
/// without a sign.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarInt(BigInt);

impl VarInt {
    #[must_use]
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Checked narrowing to `i64`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExponentOutOfRange`] if the value needs more than 64 bits.
    pub fn to_i64(&self) -> Result<i64> {
        self.0
            .to_i64()
            .ok_or_else(|| Error::ExponentOutOfRange(self.to_string()))
    }

    /// Base-10 digits of the magnitude, most significant first. Empty for zero.
    #[must_use]
    pub fn decimal_digits(&self) -> Vec<u8> {
        if self.0.is_zero() {
            return Vec::new();
        }
        self.0.magnitude().to_radix_be(10)
    }

    /// Build from a sign and base-10 magnitude digits (each in `0..=9`).
    pub(crate) fn from_decimal_digits(negative: bool, digits: &[u8]) -> Option<Self> {
        if digits.is_empty() {
            return Some(Self::zero());
        }
        let magnitude = BigUint::from_radix_be(digits, 10)?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Some(Self(BigInt::from_biguint(sign, magnitude)))
    }

    /// Minimal big-endian two's-complement bytes (at least one byte).
    #[must_use]
    pub fn to_signed_bytes_be(&self) -> Vec<u8> {
        self.0.to_signed_bytes_be()
    }

    #[must_use]
    pub fn from_signed_bytes_be(bytes: &[u8]) -> Self {
        Self(BigInt::from_signed_bytes_be(bytes))
    }

    pub(crate) const fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// `self + rhs`, used for exponent bookkeeping.
    pub(crate) fn add_i64(&self, rhs: i64) -> Self {
        Self(&self.0 + rhs)
    }

    /// Render with an explicit leading sign: `+0`, `+12`, `-7`.
    pub(crate) fn to_signed_string(&self) -> String {
        if self.0.is_negative() {
            self.0.to_string()
        } else {
            format!("+{}", self.0)
        }
    }
}

impl FromStr for VarInt {
    type Err = Error;

    /// Parse `[+|-]digits`. Whitespace, separators and empty digit runs are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        if digits.is_empty() {
            return Err(Error::InvalidVarInt(format!("no digits in {s:?}")));
        }
        if let Some(bad) = digits.bytes().find(|b| !b.is_ascii_digit()) {
            return Err(Error::InvalidVarInt(format!(
                "invalid character {:?} in {s:?}",
                bad as char
            )));
        }

        let digits: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
        Self::from_decimal_digits(negative, &digits)
            .ok_or_else(|| Error::InvalidVarInt(s.to_string()))
    }
}

impl fmt::Display for VarInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<BigInt> for VarInt {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

impl From<VarInt> for BigInt {
    fn from(value: VarInt) -> Self {
        value.0
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for VarInt {
                fn from(value: $t) -> Self {
                    Self(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_primitive!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize);
