//! The arithmetic core: operators, normalisation and boundary checks.
//!
//! Every operation runs on `i128` intermediates, which are lossless for
//! 64-bit storage words (a pre-shifted division numerator peaks at 127
//! significant bits). Policies are consulted only when a result crosses the
//! destination boundary; intermediates never recover errors.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use typenum::{Integer, Unsigned};

use crate::error::{Error, Result};
use crate::format::{Fixed, QFormat};
use crate::policy::{OverflowPolicy, UnderflowPolicy};
use crate::promote::Promote;
use crate::word::Word;

/// Outcome of a binary-point shift before the destination boundary check.
pub(crate) enum Shifted {
    /// The shifted stored integer.
    Exact(i128),
    /// Magnitude exceeded the wide intermediate; payload is the sign.
    Lost(i128),
    /// A non-zero value reached zero; payload is the sign.
    Vanished(i128),
}

/// Moves a stored integer from one binary scale to another.
///
/// `delta` is `destination scale - source scale`: non-negative deltas shift
/// left (exactness verified), negative deltas divide, truncating toward
/// zero.
pub(crate) fn shift_to(v: i128, delta: i32) -> Shifted {
    if v == 0 {
        return Shifted::Exact(0);
    }
    if delta >= 0 {
        if delta >= 127 {
            return Shifted::Lost(v.signum());
        }
        let s = v << delta;
        if s >> delta == v {
            Shifted::Exact(s)
        } else {
            Shifted::Lost(v.signum())
        }
    } else {
        let s = (-delta) as u32;
        if s >= 127 {
            return Shifted::Vanished(v.signum());
        }
        let q = v / (1i128 << s);
        if q == 0 {
            Shifted::Vanished(v.signum())
        } else {
            Shifted::Exact(q)
        }
    }
}

/// Resolves a shift outcome against the destination format's policies.
pub(crate) fn land<R: QFormat>(s: Shifted, op: &'static str) -> i128 {
    match s {
        Shifted::Exact(v) => R::checked(v, op),
        Shifted::Lost(sign) => R::overflowed(sign, op),
        Shifted::Vanished(sign) => R::underflowed(sign, op),
    }
}

/// Rescales a stored integer at `src_scale` into format `R`, consulting
/// `R`'s policies at the boundary.
pub(crate) fn rescale<R: QFormat>(v: i128, src_scale: i32, op: &'static str) -> R {
    R::from_stored(land::<R>(shift_to(v, R::SCALE_SHIFT - src_scale), op))
}

/// Fallible counterpart of [`rescale`], bypassing the policies.
pub(crate) fn try_rescale<R: QFormat>(
    v: i128,
    src_scale: i32,
    function: &'static str,
) -> Result<R> {
    match shift_to(v, R::SCALE_SHIFT - src_scale) {
        Shifted::Exact(s) => {
            if s > R::MAX_STORED || s < R::MIN_STORED {
                Err(Error::overflow(function))
            } else {
                Ok(R::from_stored(s))
            }
        }
        Shifted::Lost(_) => Err(Error::overflow(function)),
        Shifted::Vanished(_) => Err(Error::underflow(function)),
    }
}

/// Addition and subtraction. The RHS is normalised into the LHS format
/// (not the promoted one, preserving the left operand's reference frame),
/// the sum is range-checked against the LHS format bounds (the sign-bit
/// rule of the LHS word), and only then renormalised into the promoted
/// descriptor.
pub(crate) fn add_values<A, B, R>(a: A, b: B, negate_rhs: bool, op: &'static str) -> R
where
    A: QFormat,
    B: QFormat,
    R: QFormat,
{
    let b_in_a = land::<A>(
        shift_to(b.stored_wide(), A::SCALE_SHIFT - B::SCALE_SHIFT),
        op,
    );
    let rhs = if negate_rhs { -b_in_a } else { b_in_a };
    let sum = A::checked(a.stored_wide() + rhs, op);
    rescale(sum, A::SCALE_SHIFT, op)
}

/// Multiplication: the exact wide product, rescaled from the natural scale
/// `sA + sB` to the destination. Expandable destinations make the rescale a
/// no-op; closed destinations right-shift by the RHS scale, truncating.
pub(crate) fn mul_values<A, B, R>(a: A, b: B, op: &'static str) -> R
where
    A: QFormat,
    B: QFormat,
    R: QFormat,
{
    let product = a.stored_wide() * b.stored_wide();
    rescale(product, A::SCALE_SHIFT + B::SCALE_SHIFT, op)
}

/// Division: the numerator is pre-shifted left by `nB + fB` before the
/// truncating integer division, landing the quotient on the promoted scale.
pub(crate) fn div_values<A, B, R>(a: A, b: B, op: &'static str) -> R
where
    A: QFormat,
    B: QFormat,
    R: QFormat,
{
    let num = a.stored_wide();
    let den = b.stored_wide();
    if den == 0 {
        return R::from_stored(R::division_by_zero(num.signum(), op));
    }
    // Apply as much of the pre-shift as the intermediate can hold; the
    // remainder is a verified left shift inside the rescale. The cap keeps
    // the shifted numerator under 127 bits, so the division itself cannot
    // overflow.
    let bits = 128 - num.unsigned_abs().leading_zeros();
    let head = B::DIGITS.min(126u32.saturating_sub(bits));
    let q = (num << head) / den;
    rescale(q, A::SCALE_SHIFT + head as i32 - B::SCALE_SHIFT, op)
}

impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB> Add<Fixed<WB, NB, FB, EB, OpB, UpB>>
    for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    Self: QFormat + Promote<Fixed<WB, NB, FB, EB, OpB, UpB>>,
    Fixed<WB, NB, FB, EB, OpB, UpB>: QFormat,
{
    type Output = <Self as Promote<Fixed<WB, NB, FB, EB, OpB, UpB>>>::Sum;

    #[inline]
    fn add(self, rhs: Fixed<WB, NB, FB, EB, OpB, UpB>) -> Self::Output {
        add_values(self, rhs, false, "add")
    }
}

impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB> Sub<Fixed<WB, NB, FB, EB, OpB, UpB>>
    for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    Self: QFormat + Promote<Fixed<WB, NB, FB, EB, OpB, UpB>>,
    Fixed<WB, NB, FB, EB, OpB, UpB>: QFormat,
{
    type Output = <Self as Promote<Fixed<WB, NB, FB, EB, OpB, UpB>>>::Sum;

    #[inline]
    fn sub(self, rhs: Fixed<WB, NB, FB, EB, OpB, UpB>) -> Self::Output {
        add_values(self, rhs, true, "sub")
    }
}

impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB> Mul<Fixed<WB, NB, FB, EB, OpB, UpB>>
    for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    Self: QFormat + Promote<Fixed<WB, NB, FB, EB, OpB, UpB>>,
    Fixed<WB, NB, FB, EB, OpB, UpB>: QFormat,
{
    type Output = <Self as Promote<Fixed<WB, NB, FB, EB, OpB, UpB>>>::Product;

    #[inline]
    fn mul(self, rhs: Fixed<WB, NB, FB, EB, OpB, UpB>) -> Self::Output {
        mul_values(self, rhs, "mul")
    }
}

impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB> Div<Fixed<WB, NB, FB, EB, OpB, UpB>>
    for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    Self: QFormat + Promote<Fixed<WB, NB, FB, EB, OpB, UpB>>,
    Fixed<WB, NB, FB, EB, OpB, UpB>: QFormat,
{
    type Output = <Self as Promote<Fixed<WB, NB, FB, EB, OpB, UpB>>>::Quotient;

    #[inline]
    fn div(self, rhs: Fixed<WB, NB, FB, EB, OpB, UpB>) -> Self::Output {
        div_values(self, rhs, "div")
    }
}

impl<W, N, F, E, Op, Up> Neg for Fixed<W, N, F, E, Op, Up>
where
    W: Word,
    N: Unsigned,
    F: Unsigned,
    E: Integer,
    Op: OverflowPolicy,
    Up: UnderflowPolicy,
{
    type Output = Self;

    /// Unary negation keeps the operand format; the signed minimum (and any
    /// non-zero unsigned value) consults the overflow policy.
    #[inline]
    fn neg(self) -> Self {
        Self::from_stored(Self::checked(-self.stored_wide(), "neg"))
    }
}

/// Compound assignment is assignment of a freshly computed value,
/// renormalised back into the left operand's format.
impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB> AddAssign<Fixed<WB, NB, FB, EB, OpB, UpB>>
    for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    Self: QFormat,
    Fixed<WB, NB, FB, EB, OpB, UpB>: QFormat,
{
    #[inline]
    fn add_assign(&mut self, rhs: Fixed<WB, NB, FB, EB, OpB, UpB>) {
        *self = add_values(*self, rhs, false, "add");
    }
}

impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB> SubAssign<Fixed<WB, NB, FB, EB, OpB, UpB>>
    for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    Self: QFormat,
    Fixed<WB, NB, FB, EB, OpB, UpB>: QFormat,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Fixed<WB, NB, FB, EB, OpB, UpB>) {
        *self = add_values(*self, rhs, true, "sub");
    }
}

impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB> MulAssign<Fixed<WB, NB, FB, EB, OpB, UpB>>
    for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    Self: QFormat,
    Fixed<WB, NB, FB, EB, OpB, UpB>: QFormat,
{
    #[inline]
    fn mul_assign(&mut self, rhs: Fixed<WB, NB, FB, EB, OpB, UpB>) {
        *self = mul_values(*self, rhs, "mul");
    }
}

impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB> DivAssign<Fixed<WB, NB, FB, EB, OpB, UpB>>
    for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    Self: QFormat,
    Fixed<WB, NB, FB, EB, OpB, UpB>: QFormat,
{
    #[inline]
    fn div_assign(&mut self, rhs: Fixed<WB, NB, FB, EB, OpB, UpB>) {
        *self = div_values(*self, rhs, "div");
    }
}
