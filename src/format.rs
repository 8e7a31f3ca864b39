//! The Q-format descriptor and its value carrier.
//!
//! A [`Fixed<W, N, F, E, Op, Up>`] value is a single stored integer of word
//! type `W`; the remaining parameters are compile-time state. The
//! represented real is `stored * 2^(-F) * 2^(-E)`.
//!
//! The [`QFormat`] trait is the runtime face of the descriptor: every
//! attribute of the format (bit counts, stored-integer bounds, scale shift,
//! policies) is available as an associated const, so generic arithmetic
//! compiles to straight-line integer code per instantiation.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use typenum::{Integer, Unsigned, Z0};

use crate::arith::{rescale, try_rescale};
use crate::error::Result;
use crate::policy::{Ignore, OverflowPolicy, Raise, UnderflowPolicy};
use crate::tables;
use crate::word::Word;

/// A fixed-point value in the Q-format `(N, F, E)` stored in word `W`.
///
/// - `N` integer bits and `F` fractional bits (typenum unsigned integers),
/// - `E` external scaling exponent (typenum integer): the represented real
///   is `stored * 2^(-F) * 2^(-E)`,
/// - `Op` / `Up` overflow and underflow policies.
///
/// The format must satisfy `N + F <= bits(W) - (signed ? 1 : 0)`; this is
/// asserted at compile time on first use of any constructor.
///
/// Use the [`Q`](crate::Q) and [`UQ`](crate::UQ) aliases to pick the
/// smallest storage word automatically:
///
/// ```
/// use qfix::{Q, QFormat};
/// use qfix::typenum::{U10, U20};
///
/// let x = Q::<U10, U20>::from_num(1.5);
/// let y = Q::<U10, U20>::from_num(0.25);
/// let sum = x + y; // Q(11, 20), still exact
/// assert_eq!(sum.value(), 1_835_008);
/// ```
pub struct Fixed<W, N, F, E = Z0, Op = Raise, Up = Ignore> {
    stored: W,
    _format: PhantomData<(N, F, E, Op, Up)>,
}

/// Rounding applied by shift-based rescalings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStyle {
    /// Truncation toward zero (all rescaling shifts).
    TowardZero,
    /// Round to nearest, halves away from zero (real-to-fixed construction
    /// only).
    ToNearest,
}

/// Compile-time descriptor surface of a Q-format.
///
/// Implemented for every valid [`Fixed`] instantiation. Generic code (the
/// arithmetic core, the CORDIC front-ends) is written against this trait;
/// each bound resolves to plain constants at monomorphisation.
pub trait QFormat: Copy + PartialEq + PartialOrd {
    /// The storage word.
    type Word: Word;
    /// The overflow policy.
    type Op: OverflowPolicy;
    /// The underflow policy.
    type Up: UnderflowPolicy;

    /// Integer bits, excluding the sign.
    const INT_BITS: u32;
    /// Fractional bits.
    const FRAC_BITS: u32;
    /// External scaling exponent.
    const EXP: i32;
    /// Whether the storage word is signed.
    const SIGNED: bool;
    /// Significant bits, `N + F`.
    const DIGITS: u32;
    /// Total binary scale of the stored integer, `F + E`.
    const SCALE_SHIFT: i32;
    /// Largest stored integer of the format, `2^(N+F) - 1`.
    const MAX_STORED: i128;
    /// Least stored integer of the format: `-2^(N+F)` if signed, else 0.
    const MIN_STORED: i128;

    /// Wraps a wide stored integer without rescaling or checking.
    ///
    /// The caller must have established that `v` is within
    /// [`MIN_STORED`](Self::MIN_STORED)..=[`MAX_STORED`](Self::MAX_STORED).
    fn from_stored(v: i128) -> Self;

    /// The stored integer, widened.
    fn stored_wide(self) -> i128;

    /// Range-checks a stored integer, consulting the overflow policy when it
    /// falls outside the format bounds.
    #[inline]
    fn checked(v: i128, op: &'static str) -> i128 {
        if v > Self::MAX_STORED || v < Self::MIN_STORED {
            Self::Op::on_overflow(v, Self::MIN_STORED, Self::MAX_STORED, op)
        } else {
            v
        }
    }

    /// Reports a value whose magnitude exceeded the wide intermediate.
    #[inline]
    fn overflowed(sign: i128, op: &'static str) -> i128 {
        let sentinel = if sign < 0 { i128::MIN } else { i128::MAX };
        Self::Op::on_overflow(sentinel, Self::MIN_STORED, Self::MAX_STORED, op)
    }

    /// Reports a non-zero value squeezed to zero by a narrowing shift.
    ///
    /// The replacement produced by the underflow policy is range-checked, so
    /// a saturated `-1` in an unsigned destination escalates to the overflow
    /// policy.
    #[inline]
    fn underflowed(sign: i128, op: &'static str) -> i128 {
        Self::checked(Self::Up::on_underflow(sign, op), op)
    }

    /// Reports a zero denominator; `sign` is the numerator's sign.
    #[inline]
    fn division_by_zero(sign: i128, op: &'static str) -> i128 {
        Self::Op::on_division_by_zero(sign, Self::MIN_STORED, Self::MAX_STORED, op)
    }
}

impl<W, N, F, E, Op, Up> QFormat for Fixed<W, N, F, E, Op, Up>
where
    W: Word,
    N: Unsigned,
    F: Unsigned,
    E: Integer,
    Op: OverflowPolicy,
    Up: UnderflowPolicy,
{
    type Word = W;
    type Op = Op;
    type Up = Up;

    const INT_BITS: u32 = N::U32;
    const FRAC_BITS: u32 = F::U32;
    const EXP: i32 = E::I32;
    const SIGNED: bool = W::SIGNED;
    const DIGITS: u32 = N::U32 + F::U32;
    const SCALE_SHIFT: i32 = F::I32 + E::I32;
    const MAX_STORED: i128 = (1i128 << (N::U32 + F::U32)) - 1;
    const MIN_STORED: i128 = if W::SIGNED {
        -(1i128 << (N::U32 + F::U32))
    } else {
        0
    };

    #[inline]
    fn from_stored(v: i128) -> Self {
        debug_assert!(v >= Self::MIN_STORED && v <= Self::MAX_STORED);
        Fixed {
            stored: W::narrow(v),
            _format: PhantomData,
        }
    }

    #[inline]
    fn stored_wide(self) -> i128 {
        self.stored.widen()
    }
}

/// `2^k` as an `f64`, valid for any `k`; saturates to infinity / zero
/// outside the double range. Built from bits so the core stays float-free
/// beyond plain arithmetic.
pub(crate) fn pow2(k: i32) -> f64 {
    if k >= 1024 {
        f64::INFINITY
    } else if k >= -1022 {
        f64::from_bits(u64::from((k + 1023) as u32) << 52)
    } else if k >= -1074 {
        // Subnormal range.
        f64::from_bits(1u64 << (k + 1074))
    } else {
        0.0
    }
}

impl<W, N, F, E, Op, Up> Fixed<W, N, F, E, Op, Up>
where
    W: Word,
    N: Unsigned,
    F: Unsigned,
    E: Integer,
    Op: OverflowPolicy,
    Up: UnderflowPolicy,
{
    /// Format invariant, evaluated once per instantiation.
    const VALID: () = assert!(
        N::U32 + F::U32 + (W::SIGNED as u32) <= W::BITS && N::U32 + F::U32 > 0,
        "Q-format does not fit its storage word"
    );

    /// `numeric_limits`: fixed-point numbers are bounded.
    pub const IS_BOUNDED: bool = true;
    /// `numeric_limits`: arithmetic may round.
    pub const IS_EXACT: bool = false;
    /// `numeric_limits`: not an integer type.
    pub const IS_INTEGER: bool = false;
    /// `numeric_limits`: the ignore policy wraps modulo the stored range.
    pub const IS_MODULO: bool = true;
    /// `numeric_limits`: no infinities.
    pub const HAS_INFINITY: bool = false;
    /// `numeric_limits`: no NaN.
    pub const HAS_NAN: bool = false;
    /// `numeric_limits`: no subnormal values.
    pub const HAS_SUBNORMAL: bool = false;
    /// `numeric_limits`: shift-based rescalings truncate toward zero.
    pub const ROUND_STYLE: RoundStyle = RoundStyle::TowardZero;
    /// `numeric_limits`: the radix of the representation.
    pub const RADIX: u32 = 2;
    /// Decimal digits representable without change, `floor((n+f)*log10 2)`.
    pub const DIGITS10: u32 = ((N::U64 + F::U64) * 30_103 / 100_000) as u32;
    /// Largest binary exponent, `n`.
    pub const MAX_EXPONENT: i32 = N::I32;
    /// Base-10 approximation of [`MAX_EXPONENT`](Self::MAX_EXPONENT).
    pub const MAX_EXPONENT10: i32 = ((N::I64 * 30_103) / 100_000) as i32;
    /// Smallest binary exponent, `f`.
    pub const MIN_EXPONENT: i32 = F::I32;
    /// Base-10 approximation of [`MIN_EXPONENT`](Self::MIN_EXPONENT).
    pub const MIN_EXPONENT10: i32 = ((F::I64 * 30_103) / 100_000) as i32;

    /// Constructs from a real value, rounding to the nearest representable
    /// value with halves away from zero. The overflow policy fires when the
    /// rounded stored integer is out of range.
    #[must_use]
    pub fn from_num(x: f64) -> Self {
        let () = Self::VALID;
        let scaled = x * pow2(<Self as QFormat>::SCALE_SHIFT);
        let rounded = if scaled >= 0.0 {
            scaled + 0.5
        } else {
            scaled - 0.5
        };
        // The saturating float cast turns out-of-range values into the i128
        // extremes, which the range check then resolves.
        Self::from_stored(Self::checked(rounded as i128, "from_num"))
    }

    /// Constructs from a real value, reporting overflow as an error instead
    /// of consulting the policy.
    ///
    /// # Errors
    /// Returns [`Error::Overflow`](crate::Error::Overflow) when the rounded
    /// stored integer does not fit the format.
    pub fn try_from_num(x: f64) -> Result<Self> {
        let () = Self::VALID;
        let scaled = x * pow2(<Self as QFormat>::SCALE_SHIFT);
        let rounded = if scaled >= 0.0 {
            scaled + 0.5
        } else {
            scaled - 0.5
        };
        let v = rounded as i128;
        if v > <Self as QFormat>::MAX_STORED || v < <Self as QFormat>::MIN_STORED {
            Err(crate::Error::overflow("from_num"))
        } else {
            Ok(Self::from_stored(v))
        }
    }

    /// Constructs from a single-precision real value.
    #[must_use]
    pub fn from_f32(x: f32) -> Self {
        Self::from_num(f64::from(x))
    }

    /// Constructs from an integer, shifted into place.
    #[must_use]
    pub fn from_int(i: i64) -> Self {
        let () = Self::VALID;
        rescale(i128::from(i), 0, "from_int")
    }

    /// Wraps a pre-computed stored integer without rescaling.
    ///
    /// The overflow policy fires when the word holds more significant bits
    /// than the format allows.
    #[must_use]
    pub fn wrap(bits: W) -> Self {
        let () = Self::VALID;
        Self::from_stored(Self::checked(bits.widen(), "wrap"))
    }

    /// Fallible form of [`wrap`](Self::wrap).
    ///
    /// # Errors
    /// Returns [`Error::Overflow`](crate::Error::Overflow) when the stored
    /// integer is outside the format bounds.
    pub fn try_wrap(bits: W) -> Result<Self> {
        let () = Self::VALID;
        let v = bits.widen();
        if v > <Self as QFormat>::MAX_STORED || v < <Self as QFormat>::MIN_STORED {
            Err(crate::Error::overflow("wrap"))
        } else {
            Ok(Self::from_stored(v))
        }
    }

    /// The stored integer.
    #[must_use]
    pub fn value(self) -> W {
        self.stored
    }

    /// Normalises into another Q-format.
    ///
    /// Left shifts when the destination scale is finer (overflow policy if
    /// significant bits are lost), right shifts truncating toward zero when
    /// it is coarser (underflow policy if a non-zero value reaches zero).
    #[must_use]
    pub fn convert<T: QFormat>(self) -> T {
        rescale(self.stored_wide(), <Self as QFormat>::SCALE_SHIFT, "convert")
    }

    /// Fallible form of [`convert`](Self::convert).
    ///
    /// # Errors
    /// Returns [`Error::Overflow`](crate::Error::Overflow) or
    /// [`Error::Underflow`](crate::Error::Underflow) instead of consulting
    /// the destination policies.
    pub fn try_convert<T: QFormat>(self) -> Result<T> {
        try_rescale(self.stored_wide(), <Self as QFormat>::SCALE_SHIFT, "convert")
    }

    /// The represented value as a double.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        self.stored_wide() as f64 * pow2(-<Self as QFormat>::SCALE_SHIFT)
    }

    /// The represented value as a single.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// The absolute value; the overflow policy fires at the signed minimum.
    #[must_use]
    pub fn abs(self) -> Self {
        let v = self.stored_wide();
        if v < 0 {
            Self::from_stored(Self::checked(-v, "abs"))
        } else {
            self
        }
    }

    /// The largest representable value.
    #[must_use]
    pub fn largest() -> Self {
        let () = Self::VALID;
        Self::from_stored(<Self as QFormat>::MAX_STORED)
    }

    /// The least representable value.
    #[must_use]
    pub fn least() -> Self {
        let () = Self::VALID;
        Self::from_stored(<Self as QFormat>::MIN_STORED)
    }

    /// The smallest positive value, `wrap(1)`.
    #[must_use]
    pub fn epsilon() -> Self {
        let () = Self::VALID;
        Self::from_stored(1)
    }

    /// `numeric_limits`: alias for [`largest`](Self::largest).
    #[must_use]
    pub fn max() -> Self {
        Self::largest()
    }

    /// `numeric_limits`: alias for [`least`](Self::least).
    #[must_use]
    pub fn min() -> Self {
        Self::least()
    }

    /// `numeric_limits`: the maximum rounding error, one half ULP.
    #[must_use]
    pub fn round_error() -> Self {
        rescale(1, 1, "const")
    }

    /// The stored-integer scale, `2^f`.
    #[must_use]
    pub fn scale() -> f64 {
        pow2(F::I32)
    }

    /// The external scaling prefactor, `2^-e`.
    #[must_use]
    pub fn scaling_factor() -> f64 {
        pow2(-E::I32)
    }

    /// The resolution of the format, `2^-f`.
    #[must_use]
    pub fn precision() -> f64 {
        pow2(-F::I32)
    }

    /// Dynamic range in decibels, `20*log10(largest stored integer)`.
    #[cfg(feature = "std")]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dynamic_range_db() -> f64 {
        20.0 * (<Self as QFormat>::MAX_STORED as f64).log10()
    }

    /// The signed sibling format: same `N`, `F`, `E` and policies over the
    /// signed word of equal width.
    #[must_use]
    pub fn to_signed(self) -> Fixed<W::SignedSibling, N, F, E, Op, Up> {
        Fixed::<W::SignedSibling, N, F, E, Op, Up>::from_stored(
            Fixed::<W::SignedSibling, N, F, E, Op, Up>::checked(self.stored_wide(), "to_signed"),
        )
    }

    /// The unsigned sibling format; negative values consult the overflow
    /// policy.
    #[must_use]
    pub fn to_unsigned(self) -> Fixed<W::UnsignedSibling, N, F, E, Op, Up> {
        Fixed::<W::UnsignedSibling, N, F, E, Op, Up>::from_stored(
            Fixed::<W::UnsignedSibling, N, F, E, Op, Up>::checked(
                self.stored_wide(),
                "to_unsigned",
            ),
        )
    }

    /// The zero value.
    #[must_use]
    pub fn zero() -> Self {
        let () = Self::VALID;
        Self::from_stored(0)
    }

    /// The value one.
    #[must_use]
    pub fn one() -> Self {
        Self::from_int(1)
    }

    /// The value two.
    #[must_use]
    pub fn two() -> Self {
        Self::from_int(2)
    }

    /// The value one half.
    #[must_use]
    pub fn half() -> Self {
        rescale(1, 1, "const")
    }
}

macro_rules! format_consts {
    ($($(#[$doc:meta])* $name:ident => $bits:path;)*) => {$(
        $(#[$doc])*
        #[must_use]
        pub fn $name() -> Self {
            let () = Self::VALID;
            Self::from_stored(Self::checked(
                tables::scaled($bits, 60, <Self as QFormat>::SCALE_SHIFT),
                "const",
            ))
        }
    )*};
}

/// Mathematical constants, rendered as values of the format. Each consults
/// the overflow policy when the constant does not fit (for example `pi()` in
/// a format with fewer than two integer bits).
impl<W, N, F, E, Op, Up> Fixed<W, N, F, E, Op, Up>
where
    W: Word,
    N: Unsigned,
    F: Unsigned,
    E: Integer,
    Op: OverflowPolicy,
    Up: UnderflowPolicy,
{
    format_consts! {
        /// Euler's number e.
        e => tables::math::E;
        /// log2(e).
        log2_e => tables::math::LOG2_E;
        /// log10(e).
        log10_e => tables::math::LOG10_E;
        /// log10(2).
        log10_2 => tables::math::LOG10_2;
        /// ln(2).
        ln_2 => tables::math::LN_2;
        /// ln(10).
        ln_10 => tables::math::LN_10;
        /// 2*pi.
        tau => tables::math::TAU;
        /// Archimedes' constant pi.
        pi => tables::math::PI;
        /// pi/2.
        frac_pi_2 => tables::math::FRAC_PI_2;
        /// pi/4.
        frac_pi_4 => tables::math::FRAC_PI_4;
        /// 1/pi.
        frac_1_pi => tables::math::FRAC_1_PI;
        /// 2/pi.
        frac_2_pi => tables::math::FRAC_2_PI;
        /// 2/sqrt(pi).
        frac_2_sqrt_pi => tables::math::FRAC_2_SQRT_PI;
        /// sqrt(2).
        sqrt_2 => tables::math::SQRT_2;
        /// 1/sqrt(2).
        frac_1_sqrt_2 => tables::math::FRAC_1_SQRT_2;
        /// 2*sqrt(2).
        sqrt_8 => tables::math::SQRT_8;
    }
}

impl<W: Word, N, F, E, Op, Up> Clone for Fixed<W, N, F, E, Op, Up> {
    #[inline]
    fn clone(&self) -> Self {
        Fixed {
            stored: self.stored,
            _format: PhantomData,
        }
    }
}

impl<W: Word, N, F, E, Op, Up> Copy for Fixed<W, N, F, E, Op, Up> {}

impl<W: Word, N, F, E, Op, Up> Default for Fixed<W, N, F, E, Op, Up> {
    fn default() -> Self {
        Fixed {
            stored: W::ZERO,
            _format: PhantomData,
        }
    }
}

impl<W: Word, N, F, E, Op, Up> PartialEq for Fixed<W, N, F, E, Op, Up> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.stored == other.stored
    }
}

impl<W: Word, N, F, E, Op, Up> Eq for Fixed<W, N, F, E, Op, Up> {}

impl<W: Word, N, F, E, Op, Up> PartialOrd for Fixed<W, N, F, E, Op, Up> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Word, N, F, E, Op, Up> Ord for Fixed<W, N, F, E, Op, Up> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.stored.cmp(&other.stored)
    }
}

impl<W: Word, N, F, E, Op, Up> Hash for Fixed<W, N, F, E, Op, Up> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.stored.hash(state);
    }
}

impl<W, N, F, E, Op, Up> fmt::Display for Fixed<W, N, F, E, Op, Up>
where
    W: Word,
    N: Unsigned,
    F: Unsigned,
    E: Integer,
    Op: OverflowPolicy,
    Up: UnderflowPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl<W, N, F, E, Op, Up> fmt::Debug for Fixed<W, N, F, E, Op, Up>
where
    W: Word,
    N: Unsigned,
    F: Unsigned,
    E: Integer,
    Op: OverflowPolicy,
    Up: UnderflowPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if W::SIGNED { "Q" } else { "UQ" };
        write!(
            f,
            "{}({}, {}, {})[{}]",
            tag,
            N::U32,
            F::U32,
            E::I32,
            self.stored
        )
    }
}

#[cfg(feature = "serde")]
impl<W, N, F, E, Op, Up> serde::Serialize for Fixed<W, N, F, E, Op, Up>
where
    W: Word + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.stored.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, W, N, F, E, Op, Up> serde::Deserialize<'de> for Fixed<W, N, F, E, Op, Up>
where
    W: Word + serde::Deserialize<'de>,
    N: Unsigned,
    F: Unsigned,
    E: Integer,
    Op: OverflowPolicy,
    Up: UnderflowPolicy,
{
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        let stored = W::deserialize(deserializer)?;
        let wide = stored.widen();
        if wide > <Self as QFormat>::MAX_STORED || wide < <Self as QFormat>::MIN_STORED {
            return Err(serde::de::Error::custom(
                "stored integer outside Q-format bounds",
            ));
        }
        Ok(Self::from_stored(wide))
    }
}
