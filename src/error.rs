//! Error types for fixed-point operations.

use core::fmt;

/// Errors reported by fallible fixed-point operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Input value is outside the valid domain for the function.
    ///
    /// For example, `ln(-1.0)` produces this error since the logarithm is
    /// only defined for positive inputs.
    Domain {
        /// Name of the function that encountered the error.
        function: &'static str,
        /// Human-readable description of the valid domain.
        expected: &'static str,
    },

    /// The result stored integer falls outside the destination format.
    Overflow {
        /// Name of the operation that encountered the error.
        function: &'static str,
    },

    /// A non-zero value was coerced to zero by normalisation.
    Underflow {
        /// Name of the operation that encountered the error.
        function: &'static str,
    },

    /// The denominator stored integer is zero.
    DivisionByZero {
        /// Name of the operation that encountered the error.
        function: &'static str,
    },
}

impl Error {
    /// Create a domain error for the given function.
    #[must_use]
    pub const fn domain(function: &'static str, expected: &'static str) -> Self {
        Self::Domain { function, expected }
    }

    /// Create an overflow error for the given operation.
    #[must_use]
    pub const fn overflow(function: &'static str) -> Self {
        Self::Overflow { function }
    }

    /// Create an underflow error for the given operation.
    #[must_use]
    pub const fn underflow(function: &'static str) -> Self {
        Self::Underflow { function }
    }

    /// Create a division-by-zero error for the given operation.
    #[must_use]
    pub const fn division_by_zero(function: &'static str) -> Self {
        Self::DivisionByZero { function }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain { function, expected } => {
                write!(
                    f,
                    "{function}: input outside valid domain, expected {expected}"
                )
            }
            Self::Overflow { function } => {
                write!(f, "{function}: result would overflow")
            }
            Self::Underflow { function } => {
                write!(f, "{function}: non-zero value coerced to zero")
            }
            Self::DivisionByZero { function } => {
                write!(f, "{function}: division by zero")
            }
        }
    }
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A specialized `Result` type for fixed-point operations.
pub type Result<T> = core::result::Result<T, Error>;
