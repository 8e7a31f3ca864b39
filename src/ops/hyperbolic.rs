//! Hyperbolic functions and their inverses.
//!
//! The forward functions are assembled from the exponential:
//! `sinh x = (e^x - e^-x)/2`, `cosh x = (e^x + e^-x)/2`, with `tanh` and
//! `coth` rearranged so the intermediates stay inside the wide integer.
//! The inverses go through the logarithmic identities, factored as
//! `ln x + ln(1 + sqrt(1 ± x^-2))` so the square never outgrows the
//! working scale.
//!
//! All results use the sum-promoted format of the argument (the same
//! growth rule as the logarithm family).

use crate::arith::{rescale, shift_to, Shifted};
use crate::error::{Error, Result};
use crate::format::QFormat;
use crate::ops::algebraic::sqrt_raw;
use crate::ops::exponential::{exp_raw, ln_raw};
use crate::ops::working_frac;
use crate::promote::PromoteElementary;
use crate::word::SignedWord;

/// `tanh` is within one working ULP of `±1` beyond this argument.
const TANH_SATURATION: i128 = 22;

/// The hyperbolic sine and cosine together.
///
/// One exponential pair serves both, which is cheaper than separate calls.
#[must_use]
pub fn sinh_cosh<T>(x: T) -> (T::Log, T::Log)
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(sign) => {
            let s = <T::Log as QFormat>::overflowed(sign, "sinh");
            let c = <T::Log as QFormat>::overflowed(1, "cosh");
            return (
                <T::Log as QFormat>::from_stored(s),
                <T::Log as QFormat>::from_stored(c),
            );
        }
        Shifted::Vanished(_) => 0,
    };

    let ep = exp_raw(v, w);
    let en = exp_raw(-v, w);
    (
        rescale((ep - en) / 2, w as i32, "sinh"),
        rescale((ep + en) / 2, w as i32, "cosh"),
    )
}

/// The hyperbolic sine.
#[inline]
#[must_use]
pub fn sinh<T>(x: T) -> T::Log
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    sinh_cosh(x).0
}

/// The hyperbolic cosine. Always at least one.
#[inline]
#[must_use]
pub fn cosh<T>(x: T) -> T::Log
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    sinh_cosh(x).1
}

/// The hyperbolic tangent, in `(-1, 1)`.
///
/// Evaluated as `1 - 2/(e^(2|x|) + 1)` so the quotient stays bounded.
#[must_use]
pub fn tanh<T>(x: T) -> T::Log
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let one = 1i128 << w;
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(sign) => sign * (TANH_SATURATION + 1) * one,
        Shifted::Vanished(_) => 0,
    };
    if v == 0 {
        return <T::Log as QFormat>::from_stored(0);
    }

    let a = v.abs();
    let sign = v.signum();
    let t = if a >= TANH_SATURATION * one {
        one
    } else {
        let e2 = exp_raw(2 * a, w);
        one - (one << (w + 1)) / (e2 + one)
    };
    rescale(sign * t, w as i32, "tanh")
}

/// The hyperbolic cotangent. Domain: `x != 0`.
///
/// # Errors
/// Returns a domain error when `x = 0`.
pub fn coth<T>(x: T) -> Result<T::Log>
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let one = 1i128 << w;
    if x.stored_wide() == 0 {
        return Err(Error::domain("coth", "non-zero value"));
    }
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(sign) => sign * (TANH_SATURATION + 1) * one,
        // The reciprocal of a value below the resolution overflows the
        // promoted format.
        Shifted::Vanished(sign) => {
            return Ok(<T::Log as QFormat>::from_stored(
                <T::Log as QFormat>::overflowed(sign, "coth"),
            ));
        }
    };

    let a = v.abs();
    let sign = v.signum();
    let t = if a >= TANH_SATURATION * one {
        one
    } else {
        let e2 = exp_raw(2 * a, w);
        if e2 - one == 0 {
            // coth(x) ~ 1/x for tiny arguments.
            (one << w) / a
        } else {
            one + (one << (w + 1)) / (e2 - one)
        }
    };
    Ok(rescale(sign * t, w as i32, "coth"))
}

/// The inverse hyperbolic sine, for any argument.
///
/// Evaluated as `sign(x) * (ln|x| + ln(1 + sqrt(1 + x^-2)))` for `|x| >= 1`
/// and directly as `ln(x + sqrt(x^2 + 1))` below one.
#[must_use]
pub fn asinh<T>(x: T) -> T::Log
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let one = 1i128 << w;
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(sign) => {
            // asinh(x) ~ sign * ln(2|x|) far outside the working range.
            let r = ln_raw(x.stored_wide().abs(), T::SCALE_SHIFT - 1, w);
            return rescale(sign * r, w as i32, "asinh");
        }
        // asinh(x) = x to within the format's resolution.
        Shifted::Vanished(_) => {
            return rescale(x.stored_wide(), T::SCALE_SHIFT, "asinh");
        }
    };
    if v == 0 {
        return <T::Log as QFormat>::from_stored(0);
    }

    let a = v.abs();
    let sign = v.signum();
    let r = if a >= one {
        let u = (one << w) / a;
        let inner = one + sqrt_raw(one + ((u * u) >> w), w as i32, w);
        ln_raw(a, w as i32, w) + ln_raw(inner, w as i32, w)
    } else {
        let root = sqrt_raw(one + ((a * a) >> w), w as i32, w);
        ln_raw(a + root, w as i32, w)
    };
    rescale(sign * r, w as i32, "asinh")
}

/// The inverse hyperbolic cosine. Domain: `x >= 1`.
///
/// Evaluated as `ln x + ln(1 + sqrt(1 - x^-2))`.
///
/// # Errors
/// Returns a domain error when `x < 1`.
pub fn acosh<T>(x: T) -> Result<T::Log>
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let one = 1i128 << w;
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(sign) => {
            if sign < 0 {
                return Err(Error::domain("acosh", "value >= 1"));
            }
            let r = ln_raw(x.stored_wide(), T::SCALE_SHIFT - 1, w);
            return Ok(rescale(r, w as i32, "acosh"));
        }
        Shifted::Vanished(_) => {
            return Err(Error::domain("acosh", "value >= 1"));
        }
    };
    if v < one {
        return Err(Error::domain("acosh", "value >= 1"));
    }

    let u = (one << w) / v;
    let inner = one + sqrt_raw(one - ((u * u) >> w), w as i32, w);
    let r = ln_raw(v, w as i32, w) + ln_raw(inner, w as i32, w);
    Ok(rescale(r, w as i32, "acosh"))
}

/// The inverse hyperbolic tangent. Domain: `|x| < 1`.
///
/// Evaluated as `(ln(1 + x) - ln(1 - x)) / 2`.
///
/// # Errors
/// Returns a domain error when `|x| >= 1`.
pub fn atanh<T>(x: T) -> Result<T::Log>
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let one = 1i128 << w;
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        Shifted::Lost(_) => {
            return Err(Error::domain("atanh", "value in range (-1, 1)"));
        }
        // atanh(x) = x to within the format's resolution.
        Shifted::Vanished(_) => {
            return Ok(rescale(x.stored_wide(), T::SCALE_SHIFT, "atanh"));
        }
    };
    if v.abs() >= one {
        return Err(Error::domain("atanh", "value in range (-1, 1)"));
    }

    let r = (ln_raw(one + v, w as i32, w) - ln_raw(one - v, w as i32, w)) / 2;
    Ok(rescale(r, w as i32, "atanh"))
}

/// The inverse hyperbolic cotangent, `atanh(1/x)`. Domain: `|x| > 1`.
///
/// # Errors
/// Returns a domain error when `|x| <= 1`.
pub fn acoth<T>(x: T) -> Result<T::Log>
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let w = working_frac(T::FRAC_BITS);
    let one = 1i128 << w;
    let v = match shift_to(x.stored_wide(), w as i32 - T::SCALE_SHIFT) {
        Shifted::Exact(v) => v,
        // 1/x vanishes at the working width; so does acoth.
        Shifted::Lost(sign) => {
            return Ok(<T::Log as QFormat>::from_stored(
                <T::Log as QFormat>::underflowed(sign, "acoth"),
            ));
        }
        Shifted::Vanished(_) => {
            return Err(Error::domain("acoth", "|value| > 1"));
        }
    };
    if v.abs() <= one {
        return Err(Error::domain("acoth", "|value| > 1"));
    }

    let recip = (one << w) / v;
    let r = (ln_raw(one + recip, w as i32, w) - ln_raw(one - recip, w as i32, w)) / 2;
    Ok(rescale(r, w as i32, "acoth"))
}
