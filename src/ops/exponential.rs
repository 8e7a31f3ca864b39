//! Exponential and logarithmic functions.
//!
//! `exp` decomposes its argument as `x = k*ln2 + r` with `|r| <= ln2/2`,
//! evaluates `exp(r) = cosh r + sinh r` by one hyperbolic rotation, and
//! applies `2^k` as a stored-integer shift. `ln` splits `x = 2^k * m` with
//! `m` in `[1, 2)` and evaluates `ln m = 2*atanh((m-1)/(m+1))` by one
//! hyperbolic vectoring run.

use crate::arith::{rescale, shift_to, Shifted};
use crate::error::{Error, Result};
use crate::format::QFormat;
use crate::kernel::{hyperbolic_rotation, hyperbolic_vectoring};
use crate::ops::{msb, working_frac};
use crate::promote::PromoteElementary;
use crate::tables::{self, math};
use crate::word::SignedWord;

/// Exponential at the working width. Saturates the intermediate to the
/// wide maximum when `2^k` leaves it, and to zero on the way down; the
/// caller's rescale turns either into the destination's policy outcome.
pub(crate) fn exp_raw(x: i128, w: u32) -> i128 {
    // Arguments beyond +-2^7 exceed every representable result.
    let cap = 1i128 << (w + 7);
    if x >= cap {
        return i128::MAX;
    }
    if x <= -cap {
        return 0;
    }

    let ln2 = tables::scaled(math::LN_2, 60, w as i32);
    // Round-to-nearest quotient keeps |r| <= ln2/2.
    let k = (2 * x + ln2).div_euclid(2 * ln2);
    let r = x - k * ln2;

    let inv_gain = tables::scaled(tables::HYPERBOLIC_GAIN_INV, 62, w as i32);
    let (c, s, _) = hyperbolic_rotation(inv_gain, 0, r, w);
    let e = c + s;

    if k >= 0 {
        if k >= 127 {
            return i128::MAX;
        }
        let shifted = e << k;
        if shifted >> k == e { shifted } else { i128::MAX }
    } else {
        let back = -k;
        if back >= 127 { 0 } else { e >> back }
    }
}

/// Natural logarithm at the working width of a positive stored integer at
/// scale `sigma`. Normalisation goes through the most significant bit, so
/// any scale is accepted without an intermediate shift of `x`.
pub(crate) fn ln_raw(x: i128, sigma: i32, w: u32) -> i128 {
    let p = msb(x) as i32;
    let k = p - sigma;

    // m in [1, 2) rendered at the working width.
    let m = if w as i32 >= p {
        x << (w as i32 - p)
    } else {
        x >> (p - w as i32)
    };

    let one = 1i128 << w;
    let (_, _, z) = hyperbolic_vectoring(m + one, m - one, 0, w);

    let ln2 = tables::scaled(math::LN_2, 60, w as i32);
    2 * z + i128::from(k) * ln2
}

/// Exponential function e^x.
///
/// The result format is the unsigned sum-promoted format of the argument;
/// out-of-range results consult its overflow policy, and results squeezed
/// to zero consult its underflow policy.
#[must_use]
pub fn exp<T>(x: T) -> T::Exp
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(sign) => {
            let stored = if sign > 0 {
                <T::Exp as QFormat>::overflowed(1, "exp")
            } else {
                <T::Exp as QFormat>::underflowed(1, "exp")
            };
            return <T::Exp as QFormat>::from_stored(stored);
        }
        // exp(x) = 1 to within the format's resolution.
        Shifted::Vanished(_) => 0,
    };

    let e = exp_raw(v, w);
    if e == 0 {
        return <T::Exp as QFormat>::from_stored(<T::Exp as QFormat>::underflowed(1, "exp"));
    }
    rescale(e, w as i32, "exp")
}

/// Power of two, `2^x`, computed as `exp(x * ln 2)`.
#[must_use]
pub fn pow2<T>(x: T) -> T::Exp
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => tables::mul_bits(v, math::LN_2, 60),
        Shifted::Lost(sign) => {
            let stored = if sign > 0 {
                <T::Exp as QFormat>::overflowed(1, "pow2")
            } else {
                <T::Exp as QFormat>::underflowed(1, "pow2")
            };
            return <T::Exp as QFormat>::from_stored(stored);
        }
        Shifted::Vanished(_) => 0,
    };

    let e = exp_raw(v, w);
    if e == 0 {
        return <T::Exp as QFormat>::from_stored(<T::Exp as QFormat>::underflowed(1, "pow2"));
    }
    rescale(e, w as i32, "pow2")
}

/// Natural logarithm. Domain: `x > 0`.
///
/// The result format grows by `ceil(log2(n + f))` integer bits, which
/// covers `|k * ln 2|` for every representable input.
///
/// # Errors
/// Returns a domain error when `x <= 0`.
pub fn ln<T>(x: T) -> Result<T::Log>
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let v = x.stored_wide();
    if v <= 0 {
        return Err(Error::domain("ln", "positive value"));
    }
    let w = working_frac(T::FRAC_BITS);
    Ok(rescale(ln_raw(v, T::SCALE_SHIFT, w), w as i32, "ln"))
}

/// Base-2 logarithm. Domain: `x > 0`.
///
/// # Errors
/// Returns a domain error when `x <= 0`.
pub fn log2<T>(x: T) -> Result<T::Log>
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let v = x.stored_wide();
    if v <= 0 {
        return Err(Error::domain("log2", "positive value"));
    }
    let w = working_frac(T::FRAC_BITS);
    let natural = ln_raw(v, T::SCALE_SHIFT, w);
    Ok(rescale(
        tables::mul_bits(natural, math::LOG2_E, 60),
        w as i32,
        "log2",
    ))
}

/// Base-10 logarithm. Domain: `x > 0`.
///
/// # Errors
/// Returns a domain error when `x <= 0`.
pub fn log10<T>(x: T) -> Result<T::Log>
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let v = x.stored_wide();
    if v <= 0 {
        return Err(Error::domain("log10", "positive value"));
    }
    let w = working_frac(T::FRAC_BITS);
    let natural = ln_raw(v, T::SCALE_SHIFT, w);
    Ok(rescale(
        tables::mul_bits(natural, math::LOG10_E, 60),
        w as i32,
        "log10",
    ))
}
