//! Elementary functions built on the CORDIC kernels.
//!
//! Each public function converts its argument into a working fractional
//! width, drives the kernels on wide stored integers, and renormalises the
//! result into the promoted Q-format from
//! [`crate::promote::PromoteElementary`] (or the argument's own format for
//! the trigonometric functions).
//!
//! # Modules
//!
//! - [`circular`]: sin, cos, sin_cos, tan, asin, acos, atan, atan2
//! - [`hyperbolic`]: sinh, cosh, sinh_cosh, tanh, coth, asinh, acosh,
//!   atanh, acoth
//! - [`exponential`]: exp, ln, log2, log10, pow2
//! - [`algebraic`]: sqrt

pub mod algebraic;
pub mod circular;
pub mod exponential;
pub mod hyperbolic;

pub use algebraic::sqrt;
pub use circular::{acos, asin, atan, atan2, cos, sin, sin_cos, tan};
pub use exponential::{exp, ln, log2, log10, pow2};
pub use hyperbolic::{acosh, acoth, asinh, atanh, cosh, coth, sinh, sinh_cosh, tanh};

/// Working fractional width for a format with `f` fractional bits. The
/// guard bits keep the final truncating renormalisation below one ULP; the
/// floor of 24 gives low-precision formats enough iterations that results
/// stay monotone on the stored-integer grid. Capped so intermediates stay
/// far inside the wide integer.
pub(crate) fn working_frac(f: u32) -> u32 {
    (f + 6).clamp(24, 60)
}

/// Index of the most significant set bit; `v` must be positive.
pub(crate) fn msb(v: i128) -> u32 {
    127 - v.leading_zeros()
}
