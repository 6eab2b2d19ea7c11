use crate::big_decimal;
use crate::decoder::decode_from_bytes;
use crate::encoder::encode_from_parts;
use crate::error::{Error, Result};
use crate::varint::VarInt;
use num_bigint::BigUint;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Default bound for materializing a decimal as plain digits, used by
/// [`Decimal::to_point_string`] (characters) and [`Decimal::to_varint`] (digits).
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Arbitrary-precision decimal number
///
/// The value is `sign * 0.d1d2...dn * 10^exponent` where the exponent is a
/// [`VarInt`] and therefore unbounded. The digit sequence is kept minimal: no
/// leading or trailing zero digits, and zero has no digits at all.
///
/// Zero carries no sign. A zero built with the negative sign compares equal
/// to, hashes like, and prints like positive zero.
///
/// Ordering is numeric, and it is exactly the byte order of
/// [`encode_comparable`](Self::encode_comparable).
#[derive(Clone)]
pub struct Decimal {
    digits: Vec<u8>,
    exponent: VarInt,
    positive: bool,
}

impl Decimal {
    /// Create from already-canonical parts without normalizing them.
    ///
    /// `digits` must hold values in `0..=9` with no leading or trailing zero,
    /// and be empty for zero. This is only checked in debug builds; parsers and
    /// decoders are expected to hand over minimal input.
    #[must_use]
    pub fn from_parts(digits: Vec<u8>, exponent: VarInt, positive: bool) -> Self {
        debug_assert!(digits.iter().all(|&d| d <= 9), "digit out of range");
        debug_assert!(digits.first() != Some(&0), "leading zero digit");
        debug_assert!(digits.last() != Some(&0), "trailing zero digit");
        Self {
            digits,
            exponent,
            positive,
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self {
            digits: Vec::new(),
            exponent: VarInt::zero(),
            positive: true,
        }
    }

    /// Build from magnitude digits that may carry trailing zeros (but no
    /// leading ones), as produced by integer conversions.
    pub(crate) fn from_magnitude_digits(
        positive: bool,
        mut digits: Vec<u8>,
        exponent: VarInt,
    ) -> Self {
        let significant = digits.iter().rposition(|&d| d != 0).map_or(0, |p| p + 1);
        if significant == 0 {
            return Self::zero();
        }
        digits.truncate(significant);
        Self::from_parts(digits, exponent, positive)
    }

    /// Significant digits, most significant first. Empty for zero.
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Position of the decimal point relative to the first digit
    #[must_use]
    pub const fn exponent(&self) -> &VarInt {
        &self.exponent
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Sign as rendered: zero counts as positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.positive || self.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        !self.is_positive()
    }

    /// True if no significant digit lies after the decimal point.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.is_zero() || self.exponent >= VarInt::from(self.digits.len())
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    /// Parse `[sign] digits ['.' digits] [('e'|'E') [sign] digits]`.
    fn parse(s: &str) -> Result<Self> {
        let (positive, rest) = match s.as_bytes().first() {
            Some(b'-') => (false, &s[1..]),
            Some(b'+') => (true, &s[1..]),
            _ => (true, s),
        };

        let (mantissa, exponent_text) = match rest.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };

        let (integer_part, fractional_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        if integer_part.is_empty() && fractional_part.is_empty() {
            return Err(Error::InvalidFormat(format!("no digits in {s:?}")));
        }

        // A second '.' lands in the fractional part and is rejected here
        if let Some(bad) = integer_part
            .bytes()
            .chain(fractional_part.bytes())
            .find(|b| !b.is_ascii_digit())
        {
            return Err(Error::InvalidFormat(format!(
                "invalid character {:?} in {s:?}",
                bad as char
            )));
        }

        let explicit_exponent = match exponent_text {
            Some(text) => text
                .parse::<VarInt>()
                .map_err(|_| Error::InvalidFormat(format!("malformed exponent in {s:?}")))?,
            None => VarInt::zero(),
        };

        let total_len = integer_part.len() + fractional_part.len();
        let leading_zeros = integer_part
            .bytes()
            .chain(fractional_part.bytes())
            .take_while(|&b| b == b'0')
            .count();
        if leading_zeros == total_len {
            return Ok(Self::zero());
        }

        let trailing_zeros = fractional_part
            .bytes()
            .rev()
            .chain(integer_part.bytes().rev())
            .take_while(|&b| b == b'0')
            .count();

        let digits: Vec<u8> = integer_part
            .bytes()
            .chain(fractional_part.bytes())
            .skip(leading_zeros)
            .take(total_len - leading_zeros - trailing_zeros)
            .map(|b| b - b'0')
            .collect();

        // Point position relative to the first significant digit; the explicit
        // exponent may be far outside i64, so the sum stays arbitrary-precision.
        #[allow(clippy::cast_possible_wrap)]
        let point_shift = integer_part.len() as i64 - leading_zeros as i64;
        let exponent = explicit_exponent.add_i64(point_shift);

        Ok(Self::from_parts(digits, exponent, positive))
    }

    // ========================================================================
    // Formatting
    // ========================================================================

    fn digit_string(&self) -> String {
        self.digits.iter().map(|&d| char::from(b'0' + d)).collect()
    }

    /// Diagnostic form: `[ - 10^-2 * 0.9012 ]`
    #[must_use]
    pub fn to_debug_string(&self) -> String {
        if self.is_zero() {
            return "[ + 10^+0 * 0. ]".to_string();
        }
        let sign = if self.positive { '+' } else { '-' };
        format!(
            "[ {sign} 10^{} * 0.{} ]",
            self.exponent.to_signed_string(),
            self.digit_string()
        )
    }

    /// Scientific form with one leading digit: `-9.012e-3`. Zero is `"0"`.
    #[must_use]
    pub fn to_scientific_string(&self) -> String {
        let Some((first, rest)) = self.digits.split_first() else {
            return "0".to_string();
        };

        let mut out = String::with_capacity(self.digits.len() + 8);
        if !self.positive {
            out.push('-');
        }
        out.push(char::from(b'0' + first));
        if !rest.is_empty() {
            out.push('.');
            out.extend(rest.iter().map(|&d| char::from(b'0' + d)));
        }
        out.push('e');
        out.push_str(&self.exponent.add_i64(-1).to_signed_string());
        out
    }

    /// Fixed-point form bounded by [`DEFAULT_MAX_LENGTH`] characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointStringTooLong`] if the exponent or the rendered
    /// text exceeds the bound.
    pub fn to_point_string(&self) -> Result<String> {
        self.to_point_string_with_max_length(DEFAULT_MAX_LENGTH)
    }

    /// Fixed-point form, refusing to materialize more than `max_length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointStringTooLong`] if `|exponent|` or the rendered
    /// text exceeds `max_length`.
    pub fn to_point_string_with_max_length(&self, max_length: usize) -> Result<String> {
        if self.is_zero() {
            return Ok("0".to_string());
        }

        let too_long = || Error::PointStringTooLong {
            exponent: self.exponent.to_string(),
            max_length,
        };
        let exponent = self
            .exponent
            .to_i64()
            .ok()
            .filter(|e| usize::try_from(e.unsigned_abs()).is_ok_and(|abs| abs <= max_length))
            .ok_or_else(too_long)?;

        // Rendered length, checked against the bound before anything is allocated
        #[allow(clippy::cast_possible_truncation)]
        let shift = exponent.unsigned_abs() as usize;
        let unsigned_len = if exponent <= 0 {
            shift.checked_add(self.digits.len() + 2)
        } else if self.digits.len() > shift {
            Some(self.digits.len() + 1)
        } else {
            Some(shift)
        };
        let len = unsigned_len
            .and_then(|len| len.checked_add(usize::from(!self.positive)))
            .filter(|&len| len <= max_length)
            .ok_or_else(too_long)?;

        let mut out = String::with_capacity(len);
        if !self.positive {
            out.push('-');
        }
        if exponent <= 0 {
            out.push_str("0.");
            out.extend(std::iter::repeat('0').take(shift));
            out.push_str(&self.digit_string());
        } else {
            for (i, &d) in self.digits.iter().enumerate() {
                if i == shift {
                    out.push('.');
                }
                out.push(char::from(b'0' + d));
            }
            for _ in self.digits.len()..shift {
                out.push('0');
            }
        }

        debug_assert_eq!(out.len(), len);
        Ok(out)
    }

    // ========================================================================
    // Double conversion
    // ========================================================================

    /// Exact decimal value of a finite double, subnormals included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteDouble`] (corruption) for infinities and NaNs.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::NonFiniteDouble(value.to_string()));
        }

        let bits = value.to_bits();
        let positive = bits >> 63 == 0;
        let biased_exponent = ((bits >> 52) & 0x7FF) as i64;
        let fraction = bits & ((1 << 52) - 1);

        // value = mantissa * 2^binary_exponent
        let (mantissa, binary_exponent) = if biased_exponent == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1 << 52), biased_exponent - 1075)
        };
        if mantissa == 0 {
            return Ok(Self::zero());
        }

        let (integer, decimal_shift) = if binary_exponent >= 0 {
            (BigUint::from(mantissa) << binary_exponent as usize, 0)
        } else {
            // m * 2^-k == m * 5^k * 10^-k
            let k = binary_exponent.unsigned_abs() as u32;
            (
                BigUint::from(mantissa) * BigUint::from(5u32).pow(k),
                -i64::from(k),
            )
        };

        let digits = integer.to_radix_be(10);
        let exponent = VarInt::from(digits.len()).add_i64(decimal_shift);
        Ok(Self::from_magnitude_digits(positive, digits, exponent))
    }

    /// Nearest double, correctly rounded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleOutOfRange`] (invalid argument) when the nearest
    /// double is infinite, subnormal, or zero for a nonzero decimal.
    pub fn to_f64(&self) -> Result<f64> {
        if self.is_zero() {
            return Ok(0.0);
        }

        let out_of_range = || Error::DoubleOutOfRange(self.to_scientific_string());

        // |value| lies in [10^(exponent-1), 10^exponent); far outside the
        // double range there is nothing to round.
        let exponent = self.exponent.to_i64().map_err(|_| out_of_range())?;
        if !(-400..=310).contains(&exponent) {
            return Err(out_of_range());
        }

        let sign = if self.positive { "" } else { "-" };
        let text = format!("{sign}0.{}e{exponent}", self.digit_string());
        let value: f64 = text.parse().map_err(|_| out_of_range())?;

        if value.is_normal() {
            Ok(value)
        } else {
            Err(out_of_range())
        }
    }

    // ========================================================================
    // Integer conversion
    // ========================================================================

    /// Exact decimal value of an integer.
    #[must_use]
    pub fn from_varint(value: &VarInt) -> Self {
        let digits = value.decimal_digits();
        let exponent = VarInt::from(digits.len());
        Self::from_magnitude_digits(!value.is_negative(), digits, exponent)
    }

    /// Integer value, limited to [`DEFAULT_MAX_LENGTH`] digits.
    ///
    /// # Errors
    ///
    /// See [`to_varint_with_max_length`](Self::to_varint_with_max_length).
    pub fn to_varint(&self) -> Result<VarInt> {
        self.to_varint_with_max_length(DEFAULT_MAX_LENGTH)
    }

    /// Integer value with at most `max_length` digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAnInteger`] if there is a fractional part and
    /// [`Error::TooManyDigits`] if the integer is longer than `max_length`.
    pub fn to_varint_with_max_length(&self, max_length: usize) -> Result<VarInt> {
        if !self.is_integer() {
            return Err(Error::NotAnInteger(self.to_string()));
        }
        if self.is_zero() {
            return Ok(VarInt::zero());
        }

        let length = self
            .exponent
            .to_i64()
            .ok()
            .and_then(|e| usize::try_from(e).ok())
            .filter(|&len| len <= max_length)
            .ok_or_else(|| Error::TooManyDigits {
                digits: self.exponent.to_string(),
                max_length,
            })?;

        let mut digits = self.digits.clone();
        digits.resize(length, 0);
        VarInt::from_decimal_digits(!self.positive, &digits)
            .ok_or_else(|| Error::NotAnInteger(self.to_string()))
    }

    // ========================================================================
    // Encodings
    // ========================================================================

    /// Order-preserving encoding: byte-wise comparison of the result matches
    /// the numeric order of the decimals.
    #[must_use]
    pub fn encode_comparable(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.digits.len().div_ceil(2));
        self.encode_comparable_into(&mut out);
        out
    }

    /// Append the order-preserving encoding to an existing key buffer.
    pub fn encode_comparable_into(&self, out: &mut Vec<u8>) {
        encode_from_parts(out, self.positive, &self.exponent, &self.digits);
    }

    /// Decode one comparable-encoded decimal from the front of `bytes`.
    ///
    /// Returns the decimal and the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns a corruption [`Error`] on truncated or malformed input.
    pub fn decode_comparable(bytes: &[u8]) -> Result<(Self, usize)> {
        decode_from_bytes(bytes).map_err(|err| {
            tracing::trace!(%err, input_len = bytes.len(), "rejected comparable decimal");
            err
        })
    }

    /// Serialize as `[i32 scale][two's-complement unscaled value]`.
    ///
    /// Returns `None` when the scale does not fit in 32 bits; callers fall
    /// back to another representation in that case.
    #[must_use]
    pub fn encode_big_decimal(&self) -> Option<Vec<u8>> {
        big_decimal::encode(self)
    }

    /// Deserialize the `[i32 scale][unscaled value]` wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedEndOfInput`] (corruption) if fewer than five
    /// bytes are given.
    pub fn decode_big_decimal(bytes: &[u8]) -> Result<Self> {
        big_decimal::decode(bytes)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Decimal {
    /// Fixed-point text when it fits [`DEFAULT_MAX_LENGTH`], scientific otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_point_string() {
            Ok(point) => f.write_str(&point),
            Err(_) => f.write_str(&self.to_scientific_string()),
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_debug_string())
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_zero() {
            state.write_u8(0);
            return;
        }
        self.positive.hash(state);
        self.exponent.hash(state);
        self.digits.hash(state);
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return if other.positive { Ordering::Less } else { Ordering::Greater },
            (false, true) => return if self.positive { Ordering::Greater } else { Ordering::Less },
            (false, false) => {}
        }

        if self.positive != other.positive {
            return self.positive.cmp(&other.positive);
        }

        let magnitude = self
            .exponent
            .cmp(&other.exponent)
            .then_with(|| cmp_padded_digits(&self.digits, &other.digits));
        if self.positive {
            magnitude
        } else {
            magnitude.reverse()
        }
    }
}

/// Lexicographic comparison with the shorter sequence zero-padded on the right
fn cmp_padded_digits(a: &[u8], b: &[u8]) -> Ordering {
    (0..a.len().max(b.len()))
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl TryFrom<f64> for Decimal {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_f64(value)
    }
}

impl TryFrom<f32> for Decimal {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        Self::from_f64(f64::from(value))
    }
}

impl From<&VarInt> for Decimal {
    fn from(value: &VarInt) -> Self {
        Self::from_varint(value)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(value: $t) -> Self {
                    Self::from_varint(&VarInt::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);
