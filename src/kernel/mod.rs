//! CORDIC (Coordinate Rotation Digital Computer) kernels.
//!
//! Iteratively rotates vectors using only shifts and adds:
//!
//! ```text
//! x' = x - m·σ·(y >> i)
//! y' = y + σ·(x >> i)
//! z' = z - σ·α_i
//! ```
//!
//! with `m = +1`, `α_i = atan(2^-i)` in the circular system and `m = -1`,
//! `α_i = atanh(2^-i)` in the hyperbolic system.
//!
//! **Rotation mode** (z → 0) produces sin/cos (circular) or sinh/cosh
//! (hyperbolic) of the initial angle; **vectoring mode** (y → 0) produces
//! atan or atanh of the initial coordinates.
//!
//! The kernels run on `(x, y, z)` triples of wide stored integers at a
//! caller-chosen fractional width, so one monomorphisation serves every
//! Q-format. Users should call the functions in [`crate::ops`] rather than
//! the kernels directly.

mod cordic;

pub use crate::kernel::cordic::{circular_rotation, circular_vectoring};
pub use crate::kernel::cordic::{hyperbolic_rotation, hyperbolic_vectoring};
