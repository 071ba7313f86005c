//! Errors returned by curve and field operations.
use thiserror::Error;

/// Failure of a curve operation.
///
/// These indicate bad input (bytes or coordinates that do not describe a
/// curve point) or the identity being normalized, never an internal fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A field element with no inverse (zero) was inverted.
    #[error("attempted to invert zero")]
    InverseOfZero,
    /// The coordinates do not satisfy the curve equation.
    #[error("coordinates do not satisfy the curve equation")]
    NotOnCurve,
    /// Extended coordinates where `X·Y != Z·T` or `Z == 0`.
    #[error("extended coordinates are inconsistent (X·Y != Z·T or Z = 0)")]
    InconsistentExtendedCoordinates,
    /// The bytes were not the canonical encoding of any point.
    #[error("non-canonical point encoding")]
    NonCanonicalEncoding,
}

/// Failure to parse a decimal field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldParseError {
    /// The string was empty or had a character other than `0-9`.
    #[error("not a decimal integer")]
    InvalidDigit,
    /// The integer was not less than the modulus.
    #[error("integer is not less than the field modulus")]
    OutOfRange,
}
