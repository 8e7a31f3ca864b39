//! Circular (trigonometric) functions.
//!
//! `sin`, `cos` and `tan` accept any angle and keep their argument's
//! format; the inverse functions return angles in the argument's format.
//! All of them require signed storage.
//!
//! Angles far beyond `2*pi` are reduced with the format's own resolution,
//! so their results carry the phase error inherent in storing such an
//! angle in fixed point.

use crate::arith::{rescale, shift_to, Shifted};
use crate::error::{Error, Result};
use crate::format::QFormat;
use crate::kernel::{circular_rotation, circular_vectoring};
use crate::ops::algebraic::sqrt_raw;
use crate::ops::working_frac;
use crate::tables::{self, math};
use crate::word::SignedWord;

/// Reduces an angle to the working width: a coarse `2*pi` remainder at the
/// native scale keeps the shift in range, a second remainder at the
/// working scale centres on zero.
fn angle_to_working<T: QFormat>(angle: T, w: u32) -> i128 {
    let tau_native = tables::scaled(math::TAU, 60, T::SCALE_SHIFT).max(1);
    let r = angle.stored_wide().rem_euclid(tau_native);
    match shift_to(r, w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(_) | Shifted::Vanished(_) => 0,
    }
}

/// Folds a working-width angle into `[-pi/2, pi/2]`, returning the reduced
/// argument and the sign applied to both outputs of the rotation.
fn reduce<T: QFormat>(angle: T, w: u32) -> (i128, i128) {
    let two_pi = tables::scaled(math::TAU, 60, w as i32);
    let pi = tables::scaled(math::PI, 60, w as i32);
    let half_pi = tables::scaled(math::FRAC_PI_2, 60, w as i32);

    let mut r = angle_to_working(angle, w).rem_euclid(two_pi);
    if r > pi {
        r -= two_pi;
    }

    if r > half_pi {
        (r - pi, -1)
    } else if r < -half_pi {
        (r + pi, -1)
    } else {
        (r, 1)
    }
}

/// Computes the sine and cosine of an angle simultaneously.
///
/// More efficient than calling [`sin`] and [`cos`] separately since both
/// values come out of a single run of the kernel.
#[must_use]
pub fn sin_cos<T>(angle: T) -> (T, T)
where
    T: QFormat,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let (arg, sign) = reduce(angle, w);
    let inv_gain = tables::scaled(tables::CIRCULAR_GAIN_INV, 63, w as i32);
    let (c, s, _) = circular_rotation(inv_gain, 0, arg, w);
    (
        rescale(sign * s, w as i32, "sin"),
        rescale(sign * c, w as i32, "cos"),
    )
}

/// The sine of an angle in radians, in `[-1, 1]`.
#[inline]
#[must_use]
pub fn sin<T>(angle: T) -> T
where
    T: QFormat,
    T::Word: SignedWord,
{
    sin_cos(angle).0
}

/// The cosine of an angle in radians, in `[-1, 1]`.
#[inline]
#[must_use]
pub fn cos<T>(angle: T) -> T
where
    T: QFormat,
    T::Word: SignedWord,
{
    sin_cos(angle).1
}

/// The tangent of an angle in radians.
///
/// Evaluated as the quotient of the working sine and cosine, then
/// renormalised into the argument's format; near the poles the overflow
/// policy decides, and an exactly-zero working cosine consults the
/// division-by-zero hook.
#[must_use]
pub fn tan<T>(angle: T) -> T
where
    T: QFormat,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let (arg, _) = reduce(angle, w);
    let inv_gain = tables::scaled(tables::CIRCULAR_GAIN_INV, 63, w as i32);
    let (c, s, _) = circular_rotation(inv_gain, 0, arg, w);
    if c == 0 {
        return T::from_stored(T::division_by_zero(s.signum(), "tan"));
    }
    rescale((s << w) / c, w as i32, "tan")
}

/// Arctangent at the working width; `result` and `half_pi` share scale `w`.
pub(crate) fn atan_raw(v: i128, w: u32) -> i128 {
    let one = 1i128 << w;
    if v == 0 {
        return 0;
    }
    if v.abs() <= one {
        return circular_vectoring(one, v, 0, w).2;
    }

    // |v| > 1: atan(v) = ±pi/2 - atan(1/v) keeps the kernel argument in
    // its convergent range.
    let half_pi = tables::scaled(math::FRAC_PI_2, 60, w as i32);
    let recip = (one << w) / v;
    let t = circular_vectoring(one, recip, 0, w).2;
    if v > 0 { half_pi - t } else { -half_pi - t }
}

/// The arctangent, in `(-pi/2, pi/2)`, in the argument's format.
#[must_use]
pub fn atan<T>(x: T) -> T
where
    T: QFormat,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => rescale(atan_raw(v, w), w as i32, "atan"),
        Shifted::Lost(sign) => {
            let half_pi = tables::scaled(math::FRAC_PI_2, 60, w as i32);
            rescale(sign * half_pi, w as i32, "atan")
        }
        // atan(x) = x to within the format's resolution.
        Shifted::Vanished(_) => x,
    }
}

/// Four-quadrant arctangent on working integers. Scale-free in `(y, x)`:
/// only the ratio matters, so callers pass stored integers at any common
/// scale.
pub(crate) fn atan2_raw(y: i128, x: i128, w: u32) -> i128 {
    let pi = tables::scaled(math::PI, 60, w as i32);
    let half_pi = tables::scaled(math::FRAC_PI_2, 60, w as i32);

    if x == 0 {
        return if y < 0 {
            -half_pi
        } else if y == 0 {
            0
        } else {
            half_pi
        };
    }
    if y == 0 {
        return if x < 0 { pi } else { 0 };
    }

    let base = circular_vectoring(x.abs(), y.abs(), 0, w).2;

    match (x < 0, y < 0) {
        (false, false) => base,
        (false, true) => -base,
        (true, false) => pi - base,
        (true, true) => base - pi,
    }
}

/// The four-quadrant arctangent of `y/x`, in `[-pi, pi]`, in the
/// arguments' format.
///
/// `atan2(0, 0)` returns zero.
#[must_use]
pub fn atan2<T>(y: T, x: T) -> T
where
    T: QFormat,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    rescale(
        atan2_raw(y.stored_wide(), x.stored_wide(), w),
        w as i32,
        "atan2",
    )
}

/// The arcsine of a value in `[-1, 1]`, as an angle in `[-pi/2, pi/2]`.
///
/// # Errors
/// Returns a domain error when `|x| > 1`.
pub fn asin<T>(x: T) -> Result<T>
where
    T: QFormat,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let one = 1i128 << w;
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(_) => {
            return Err(Error::domain("asin", "value in range [-1, 1]"));
        }
        // asin(x) = x to within the format's resolution.
        Shifted::Vanished(_) => return Ok(x),
    };
    if v.abs() > one {
        return Err(Error::domain("asin", "value in range [-1, 1]"));
    }

    // asin(x) = atan2(x, sqrt(1 - x^2)).
    let root = sqrt_raw(one - ((v * v) >> w), w as i32, w);
    Ok(rescale(atan2_raw(v, root, w), w as i32, "asin"))
}

/// The arccosine of a value in `[-1, 1]`, as an angle in `[0, pi]`.
///
/// # Errors
/// Returns a domain error when `|x| > 1`.
pub fn acos<T>(x: T) -> Result<T>
where
    T: QFormat,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let one = 1i128 << w;
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(_) => {
            return Err(Error::domain("acos", "value in range [-1, 1]"));
        }
        // acos rounds to pi/2 for arguments below the resolution.
        Shifted::Vanished(_) => 0,
    };
    if v.abs() > one {
        return Err(Error::domain("acos", "value in range [-1, 1]"));
    }

    // acos(x) = atan2(sqrt(1 - x^2), x).
    let root = sqrt_raw(one - ((v * v) >> w), w as i32, w);
    Ok(rescale(atan2_raw(root, v, w), w as i32, "acos"))
}
