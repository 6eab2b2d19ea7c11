//! # vardecimal
//!
//! Arbitrary-precision decimal numbers with two canonical binary encodings:
//!
//! - **Comparable encoding**: an order-preserving byte string. Comparing two
//!   encodings byte by byte gives the same result as comparing the decimals,
//!   so the encoding can be dropped straight into a sort key. It is also
//!   self-delimiting, so further key fields can follow it.
//! - **BigDecimal encoding**: a 32-bit scale followed by the two's-complement
//!   unscaled value, worth `unscaled * 10^scale`.
//!
//! A [`Decimal`] is `sign * 0.d1d2...dn * 10^exponent`, held in a normalized
//! form: no leading or trailing zero digits, and zero has no digits and no
//! sign. The exponent is a [`VarInt`], so `1e-36546632732954564791` is as
//! representable as `1.5`.
//!
//! ## Examples
//!
//! ```rust
//! use vardecimal::Decimal;
//!
//! let value: Decimal = "-9.012e-4".parse().unwrap();
//! assert_eq!(value.to_debug_string(), "[ - 10^-3 * 0.9012 ]");
//! assert_eq!(value.to_scientific_string(), "-9.012e-4");
//! assert_eq!(value.to_string(), "-0.0009012");
//!
//! // Byte order of the comparable encoding is numeric order
//! let a: Decimal = "-1.34".parse().unwrap();
//! let b: Decimal = "-1.337".parse().unwrap();
//! assert!(a < b);
//! assert!(a.encode_comparable() < b.encode_comparable());
//!
//! // Decoding reports how many bytes it used
//! let mut key = a.encode_comparable();
//! key.extend_from_slice(b"suffix");
//! let (decoded, used) = Decimal::decode_comparable(&key).unwrap();
//! assert_eq!(decoded, a);
//! assert_eq!(&key[used..], b"suffix");
//! ```
//!
//! ## Conversions
//!
//! - Text: [`FromStr`](std::str::FromStr), [`Decimal::to_scientific_string`],
//!   [`Decimal::to_point_string`] and [`Display`](std::fmt::Display).
//! - Doubles: [`Decimal::from_f64`] is exact, [`Decimal::to_f64`] rounds to
//!   the nearest normal double.
//! - Integers: [`Decimal::from_varint`], [`Decimal::to_varint`] and `From`
//!   for the primitive integer types.
//!
//! ## Errors
//!
//! Every fallible operation returns [`Error`], classified by [`ErrorKind`]
//! into bad caller input and corrupt data.

pub(crate) mod big_decimal;
pub(crate) mod bits;
pub(crate) mod decimal;
pub(crate) mod decoder;
pub(crate) mod digits;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod varint;

// Re-export main types and constants
pub use big_decimal::BIG_DECIMAL_SCALE_LEN;
pub use decimal::{Decimal, DEFAULT_MAX_LENGTH};
pub use error::{Error, ErrorKind, Result};
pub use varint::VarInt;
