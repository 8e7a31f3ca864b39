//! Algebraic functions.
//!
//! The square root runs on the hyperbolic kernel: vectoring `(a + 1/4,
//! a - 1/4)` drives the x output to `K_h * sqrt(a)`, so one pass plus the
//! gain correction yields the root of the normalised argument.

use crate::arith::rescale;
use crate::error::{Error, Result};
use crate::format::QFormat;
use crate::kernel::hyperbolic_vectoring;
use crate::ops::{msb, working_frac};
use crate::promote::PromoteElementary;
use crate::tables;
use crate::word::SignedWord;

/// Square root at the working width of a non-negative stored integer at
/// scale `sigma`.
///
/// The argument is split as `m * 4^k` with `m` in `[0.5, 2)` — normalising
/// through the most significant bit, so any scale is accepted — then the
/// kernel output is corrected by `1/K_h` and shifted back by `k`.
pub(crate) fn sqrt_raw(v: i128, sigma: i32, w: u32) -> i128 {
    if v <= 0 {
        return 0;
    }
    let p = msb(v) as i32;
    let t = p - sigma;
    // Exponent of the even split; m * 2^(t - 2k) lands in [0.5, 2).
    let k = (t + 1).div_euclid(2);

    let shift = w as i32 - sigma - 2 * k;
    let m = if shift >= 0 { v << shift } else { v >> -shift };

    let quarter = 1i128 << (w - 2);
    let (root, _, _) = hyperbolic_vectoring(m + quarter, m - quarter, 0, w);
    let corrected = tables::mul_bits(root, tables::HYPERBOLIC_GAIN_INV, 62);

    if k >= 0 {
        if k >= 127 {
            return i128::MAX;
        }
        let shifted = corrected << k;
        if shifted >> k == corrected {
            shifted
        } else {
            // Saturate the intermediate; the boundary rescale resolves it.
            i128::MAX
        }
    } else {
        corrected >> -k
    }
}

/// Square root. Domain: `x >= 0`.
///
/// The result format halves the integer bits (`ceil(n/2) + 1`) and keeps
/// the fractional width.
///
/// # Errors
/// Returns a domain error when `x < 0`.
pub fn sqrt<T>(x: T) -> Result<T::Sqrt>
where
    T: QFormat + PromoteElementary,
    T::Word: SignedWord,
{
    let v = x.stored_wide();
    if v < 0 {
        return Err(Error::domain("sqrt", "non-negative value"));
    }
    if v == 0 {
        return Ok(<T::Sqrt as QFormat>::from_stored(0));
    }

    let w = working_frac(T::FRAC_BITS);
    let r = sqrt_raw(v, T::SCALE_SHIFT, w);
    if r == 0 {
        return Ok(<T::Sqrt as QFormat>::from_stored(
            <T::Sqrt as QFormat>::underflowed(1, "sqrt"),
        ));
    }
    Ok(rescale(r, w as i32, "sqrt"))
}
