use thiserror::Error;

/// Broad failure category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller handed in something that cannot be represented or parsed.
    InvalidArgument,
    /// Bytes or a floating-point value that cannot describe a finite decimal.
    Corruption,
}

/// Errors produced while parsing, converting or decoding decimals
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid decimal format: {0}")]
    InvalidFormat(String),

    #[error("Invalid integer format: {0}")]
    InvalidVarInt(String),

    #[error("Not an integer: {0}")]
    NotAnInteger(String),

    #[error("Integer has {digits} digits, more than the allowed {max_length}")]
    TooManyDigits { digits: String, max_length: usize },

    #[error("Point string for exponent {exponent} does not fit in {max_length} characters")]
    PointStringTooLong { exponent: String, max_length: usize },

    #[error("Value {0} does not fit in a 64-bit integer")]
    ExponentOutOfRange(String),

    #[error("Decimal {0} has no finite normal double representation")]
    DoubleOutOfRange(String),

    #[error("Cannot convert {0} to a decimal")]
    NonFiniteDouble(String),

    #[error("Unexpected end of input while decoding")]
    UnexpectedEndOfInput,

    #[error("Invalid sign class in leading byte {0:#04x}")]
    InvalidClass(u8),

    #[error("Invalid exponent field: {0}")]
    InvalidExponentField(&'static str),

    #[error("Invalid digit pair byte {0:#04x}")]
    InvalidDigitPair(u8),

    #[error("Non-canonical digit sequence: {0}")]
    NonCanonicalDigits(&'static str),
}

impl Error {
    /// The category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat(_)
            | Self::InvalidVarInt(_)
            | Self::NotAnInteger(_)
            | Self::TooManyDigits { .. }
            | Self::PointStringTooLong { .. }
            | Self::ExponentOutOfRange(_)
            | Self::DoubleOutOfRange(_) => ErrorKind::InvalidArgument,
            Self::NonFiniteDouble(_)
            | Self::UnexpectedEndOfInput
            | Self::InvalidClass(_)
            | Self::InvalidExponentField(_)
            | Self::InvalidDigitPair(_)
            | Self::NonCanonicalDigits(_) => ErrorKind::Corruption,
        }
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument)
    }

    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self.kind(), ErrorKind::Corruption)
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
