//! Failure kinds surfaced to callers.

use thiserror::Error;

/// The only conditions that abort an operation; kernels are total on
/// well-formed inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed numeric string, or a non-finite floating-point value
    /// where a finite one is required.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// `/` or `%` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// Decimal-to-integer conversion with an exponent too large to apply.
    #[error("overflow: {0}")]
    Overflow(&'static str),
}
