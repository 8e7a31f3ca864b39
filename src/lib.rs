//! # `qfix`
//!
//! Generic Q-format fixed-point arithmetic with CORDIC elementary
//! functions.
//!
//! Numerical code written against this crate runs unchanged in any
//! statically chosen Q-format: the type-promotion algebra computes the
//! format of every `+ - * /` result and of every elementary function at
//! compile time, and the CORDIC kernels evaluate the transcendentals with
//! shifts, adds and table lookups only.
//!
//! ## Quick start
//!
//! ```rust
//! use qfix::typenum::{U8, U10, U20, U24};
//! use qfix::{sin, sqrt, ln, Q, QFormat};
//!
//! // A signed format with 10 integer and 20 fractional bits.
//! type Fix = Q<U10, U20>;
//!
//! let x = Fix::from_num(1.5);
//! let y = Fix::from_num(0.25);
//!
//! // The sum gains an integer bit: Q(11, 20).
//! let sum = x + y;
//! assert_eq!(sum.to_f64(), 1.75);
//!
//! // The product format is Q(20, 40); the quotient format Q(30, 30).
//! let p = x * y;
//! let q = x / y;
//!
//! // Elementary functions follow the argument's fractional width.
//! let angle = Q::<U8, U24>::frac_pi_4();
//! let s = sin(angle);                       // same format
//! let r = sqrt(Fix::from_num(2.0)).unwrap(); // Q(6, 20)
//! let l = ln(Fix::e()).unwrap();             // Q(15, 20)
//! # let _ = (p, q, s, r, l);
//! ```
//!
//! ## Q-format descriptors
//!
//! A [`Fixed<W, N, F, E, Op, Up>`] value stores one host integer `W`; the
//! represented real is `stored * 2^(-F) * 2^(-E)`. The [`Q`] and [`UQ`]
//! aliases pick the smallest signed/unsigned storage word for `N + F`
//! significant bits. The external scaling exponent `E` supports formats
//! like a 10-bit word holding 32 fractional bits of scale.
//!
//! ## Promotion
//!
//! | Operation | Result format |
//! |---|---|
//! | `a + b`, `a - b` | `n = max + 1`, `f = max`, `e = min` |
//! | `a * b` | `n, f, e` summed |
//! | `a / b` | `n = nA + fB`, `f = fA + nB`, `e = eA - eB` |
//! | `ln`, `exp`, hyperbolics | `n += ceil(log2(n + f))` |
//! | `sqrt` | `n = ceil(n/2) + 1` |
//!
//! A promoted format that fits no host word (more than 63 signed or 64
//! unsigned significant bits) is **closed**: the result degenerates to the
//! left operand's format and the evaluation truncates like the underlying
//! C idiom would.
//!
//! ## Policies
//!
//! Overflow and underflow behavior is part of the descriptor:
//! [`Ignore`](policy::Ignore) wraps, [`Saturate`](policy::Saturate) clamps,
//! [`Raise`](policy::Raise) panics naming the operation. Domain errors of
//! the elementary functions are always returned as [`Error`] values.
//!
//! ## Feature flags
//!
//! - `std` (default): `std::error::Error` for [`Error`] and the decibel
//!   helper; without it the crate is `#![no_std]`.
//! - `serde`: serialize values as their stored integers, validating format
//!   bounds on deserialization.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod arith;
pub mod error;
pub mod format;
pub mod kernel;
pub mod ops;
pub mod policy;
pub mod promote;
pub mod tables;
pub mod word;

// Re-export the type-level integers used in format parameters.
pub use typenum;

pub use error::{Error, Result};
pub use format::{Fixed, QFormat, RoundStyle};
pub use policy::{Ignore, OverflowPolicy, Raise, Saturate, UnderflowPolicy};
pub use promote::{Promote, PromoteElementary};
pub use word::{SignedWord, Word};

pub use ops::algebraic::sqrt;
pub use ops::circular::{acos, asin, atan, atan2, cos, sin, sin_cos, tan};
pub use ops::exponential::{exp, ln, log2, log10, pow2};
pub use ops::hyperbolic::{acosh, acoth, asinh, atanh, cosh, coth, sinh, sinh_cosh, tanh};

use promote::StoredBits;
use typenum::{Sum, B0, B1, Z0};

/// A signed Q-format with `N` integer and `F` fractional bits, prescaled by
/// `2^-E`, in the smallest signed host word with at least `N + F + 1` bits.
pub type Q<N, F, E = Z0, Op = Raise, Up = Ignore> =
    Fixed<<Sum<N, F> as StoredBits<B1>>::Word, N, F, E, Op, Up>;

/// The unsigned counterpart of [`Q`]: smallest unsigned host word with at
/// least `N + F` bits.
pub type UQ<N, F, E = Z0, Op = Raise, Up = Ignore> =
    Fixed<<Sum<N, F> as StoredBits<B0>>::Word, N, F, E, Op, Up>;
