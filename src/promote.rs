//! The compile-time type-promotion algebra.
//!
//! Given the Q-formats of two operands, these traits compute the Q-format
//! of the sum/difference, product and quotient, and the result formats of
//! the elementary functions — all at the type level, so the promotion table
//! is fully known before any value is constructed.
//!
//! A promoted format is **expandable** when a host word wide enough for its
//! significant bits exists (at most 63 for signed results, 64 for
//! unsigned); otherwise the promotion is **closed** and the result
//! descriptor degenerates to the left operand. Result signedness is the OR
//! of the operand signednesses; result policies are always the left
//! operand's.

use core::marker::PhantomData;
use core::ops::{Add, BitOr, Shr, Sub};

use typenum::consts::*;
use typenum::{
    Add1, Bit, Diff, Integer, IsLessOrEqual, LeEq, Log2, Logarithm2, Max, Maximum, Min, Minimum,
    Or, Shright, Sub1, Sum, Unsigned,
};

use crate::format::{Fixed, QFormat};
use crate::word::Word;

/// Maps a significant-bit count to the smallest host word that holds it.
///
/// `S` is the required signedness: `B1` impls cover widths `1..=63`
/// (signed words reserve a sign bit), `B0` impls cover `1..=64`.
pub trait StoredBits<S: Bit> {
    /// The selected storage word.
    type Word: Word;
}

macro_rules! stored_bits {
    ($sign:ty, $word:ty: $($width:ident)+) => {$(
        impl StoredBits<$sign> for $width {
            type Word = $word;
        }
    )+};
}

stored_bits!(B1, i8: U1 U2 U3 U4 U5 U6 U7);
stored_bits!(B1, i16: U8 U9 U10 U11 U12 U13 U14 U15);
stored_bits!(B1, i32: U16 U17 U18 U19 U20 U21 U22 U23 U24 U25 U26 U27 U28 U29 U30 U31);
stored_bits!(B1, i64: U32 U33 U34 U35 U36 U37 U38 U39 U40 U41 U42 U43 U44 U45 U46 U47
    U48 U49 U50 U51 U52 U53 U54 U55 U56 U57 U58 U59 U60 U61 U62 U63);
stored_bits!(B0, u8: U1 U2 U3 U4 U5 U6 U7 U8);
stored_bits!(B0, u16: U9 U10 U11 U12 U13 U14 U15 U16);
stored_bits!(B0, u32: U17 U18 U19 U20 U21 U22 U23 U24 U25 U26 U27 U28 U29 U30 U31 U32);
stored_bits!(B0, u64: U33 U34 U35 U36 U37 U38 U39 U40 U41 U42 U43 U44 U45 U46 U47
    U48 U49 U50 U51 U52 U53 U54 U55 U56 U57 U58 U59 U60 U61 U62 U63 U64);

/// The widest significant-bit count a host word can hold per signedness.
pub trait WidthLimit: Bit {
    /// 63 for signed storage, 64 for unsigned.
    type Max: Unsigned;
}

impl WidthLimit for B1 {
    type Max = U63;
}

impl WidthLimit for B0 {
    type Max = U64;
}

/// A candidate promoted format, before the closed/expandable decision.
pub struct Candidate<S, N, F, E>(PhantomData<(S, N, F, E)>);

/// Resolves a [`Candidate`] against the host: the `B1` impl selects storage
/// for the expandable format, the `B0` impl falls back to the left
/// operand's type (the closed case).
pub trait Materialize<Fits: Bit, Left> {
    /// The resolved result type.
    type Output: QFormat;
}

impl<S, N, F, E, L> Materialize<B1, L> for Candidate<S, N, F, E>
where
    S: Bit,
    N: Unsigned + Add<F>,
    F: Unsigned,
    E: Integer,
    Sum<N, F>: StoredBits<S>,
    L: QFormat,
{
    type Output = Fixed<<Sum<N, F> as StoredBits<S>>::Word, N, F, E, L::Op, L::Up>;
}

impl<S, N, F, E, L> Materialize<B0, L> for Candidate<S, N, F, E>
where
    L: QFormat,
{
    type Output = L;
}

/// Result signedness of a binary operation.
pub type CommonSign<WA, WB> = Or<<WA as Word>::Signedness, <WB as Word>::Signedness>;
/// Significant width of a candidate format.
type WidthOf<N, F> = Sum<N, F>;
/// Whether a candidate width fits the host for signedness `S`.
type FitsIn<S, K> = LeEq<K, <S as WidthLimit>::Max>;
/// Resolved result type of a candidate against left operand `L`.
pub type Resolved<S, N, F, E, L> =
    <Candidate<S, N, F, E> as Materialize<FitsIn<S, WidthOf<N, F>>, L>>::Output;

/// Sum/difference integer bits: `max(nA, nB) + 1`.
type SumN<NA, NB> = Add1<Maximum<NA, NB>>;
/// Sum/difference fractional bits: `max(fA, fB)`.
type SumF<FA, FB> = Maximum<FA, FB>;
/// Sum/difference scaling exponent: `min(eA, eB)`.
type SumE<EA, EB> = Minimum<EA, EB>;
/// Product integer bits: `nA + nB`.
type ProdN<NA, NB> = Sum<NA, NB>;
/// Product fractional bits: `fA + fB`.
type ProdF<FA, FB> = Sum<FA, FB>;
/// Product scaling exponent: `eA + eB`.
type ProdE<EA, EB> = Sum<EA, EB>;
/// Quotient integer bits: `nA + fB` (the magnitude bound of `a/b`).
type QuotN<NA, FB> = Sum<NA, FB>;
/// Quotient fractional bits: `fA + nB` (the scale produced by the
/// pre-shifted division).
type QuotF<FA, NB> = Sum<FA, NB>;
/// Quotient scaling exponent: `eA - eB`.
type QuotE<EA, EB> = Diff<EA, EB>;

/// Result formats of the binary operators.
///
/// `Sum` also serves the difference. The left operand is the closed-case
/// fallback for all three formats.
pub trait Promote<Rhs = Self> {
    /// Q-format of `self + rhs` and `self - rhs`.
    type Sum: QFormat;
    /// Q-format of `self * rhs`.
    type Product: QFormat;
    /// Q-format of `self / rhs`.
    type Quotient: QFormat;
}

impl<WA, NA, FA, EA, OpA, UpA, WB, NB, FB, EB, OpB, UpB>
    Promote<Fixed<WB, NB, FB, EB, OpB, UpB>> for Fixed<WA, NA, FA, EA, OpA, UpA>
where
    WA: Word,
    WB: Word,
    Self: QFormat,
    WA::Signedness: BitOr<WB::Signedness>,
    CommonSign<WA, WB>: WidthLimit,
    // Sum format.
    NA: Max<NB> + Add<NB> + Add<FB>,
    FA: Max<FB> + Add<FB> + Add<NB>,
    EA: Min<EB> + Add<EB> + Sub<EB>,
    Maximum<NA, NB>: Add<B1>,
    SumN<NA, NB>: Add<SumF<FA, FB>> + Unsigned,
    SumF<FA, FB>: Unsigned,
    SumE<EA, EB>: Integer,
    WidthOf<SumN<NA, NB>, SumF<FA, FB>>: IsLessOrEqual<<CommonSign<WA, WB> as WidthLimit>::Max>,
    Candidate<CommonSign<WA, WB>, SumN<NA, NB>, SumF<FA, FB>, SumE<EA, EB>>:
        Materialize<FitsIn<CommonSign<WA, WB>, WidthOf<SumN<NA, NB>, SumF<FA, FB>>>, Self>,
    // Product format.
    ProdN<NA, NB>: Add<ProdF<FA, FB>> + Unsigned,
    ProdF<FA, FB>: Unsigned,
    ProdE<EA, EB>: Integer,
    WidthOf<ProdN<NA, NB>, ProdF<FA, FB>>: IsLessOrEqual<<CommonSign<WA, WB> as WidthLimit>::Max>,
    Candidate<CommonSign<WA, WB>, ProdN<NA, NB>, ProdF<FA, FB>, ProdE<EA, EB>>:
        Materialize<FitsIn<CommonSign<WA, WB>, WidthOf<ProdN<NA, NB>, ProdF<FA, FB>>>, Self>,
    // Quotient format.
    QuotN<NA, FB>: Add<QuotF<FA, NB>> + Unsigned,
    QuotF<FA, NB>: Unsigned,
    QuotE<EA, EB>: Integer,
    WidthOf<QuotN<NA, FB>, QuotF<FA, NB>>: IsLessOrEqual<<CommonSign<WA, WB> as WidthLimit>::Max>,
    Candidate<CommonSign<WA, WB>, QuotN<NA, FB>, QuotF<FA, NB>, QuotE<EA, EB>>:
        Materialize<FitsIn<CommonSign<WA, WB>, WidthOf<QuotN<NA, FB>, QuotF<FA, NB>>>, Self>,
{
    type Sum = Resolved<CommonSign<WA, WB>, SumN<NA, NB>, SumF<FA, FB>, SumE<EA, EB>, Self>;
    type Product = Resolved<CommonSign<WA, WB>, ProdN<NA, NB>, ProdF<FA, FB>, ProdE<EA, EB>, Self>;
    type Quotient = Resolved<CommonSign<WA, WB>, QuotN<NA, FB>, QuotF<FA, NB>, QuotE<EA, EB>, Self>;
}

/// Integer-bit growth of the sum-of-`n+f`-terms promotion:
/// `ceil(log2(n + f))`, requiring `n + f >= 2`.
type GrowthOf<N, F> = Add1<Log2<Sub1<Sum<N, F>>>>;
/// Integer bits of the log/exp family result: `n + ceil(log2(n + f))`.
type LogN<N, F> = Sum<N, GrowthOf<N, F>>;
/// Integer bits of the square root result: `ceil(n/2) + 1`.
type SqrtN<N> = Add1<Shright<Add1<N>, U1>>;

/// Result formats of the elementary functions.
///
/// `Log` covers `ln`, `log2`, `log10` and the hyperbolic family (their
/// promotion is the same sum-of-terms rule); `Exp` is the same growth with
/// unsigned storage; `Sqrt` halves the integer bits. The trigonometric
/// functions keep their input format and need no entry here. Closed growth
/// degenerates to the input format.
pub trait PromoteElementary {
    /// Q-format of the logarithm family and the hyperbolic functions.
    type Log: QFormat;
    /// Q-format of `exp` (unsigned: the exponential is positive).
    type Exp: QFormat;
    /// Q-format of `sqrt`.
    type Sqrt: QFormat;
}

impl<W, N, F, E, Op, Up> PromoteElementary for Fixed<W, N, F, E, Op, Up>
where
    W: Word,
    Self: QFormat,
    W::Signedness: WidthLimit,
    N: Add<F> + Add<B1> + Add<GrowthOf<N, F>>,
    F: Unsigned,
    E: Integer,
    Sum<N, F>: Sub<B1>,
    Sub1<Sum<N, F>>: Logarithm2,
    Log2<Sub1<Sum<N, F>>>: Add<B1>,
    // Log / Exp candidate.
    LogN<N, F>: Add<F> + Unsigned,
    WidthOf<LogN<N, F>, F>:
        IsLessOrEqual<<W::Signedness as WidthLimit>::Max> + IsLessOrEqual<U64>,
    Candidate<W::Signedness, LogN<N, F>, F, E>:
        Materialize<FitsIn<W::Signedness, WidthOf<LogN<N, F>, F>>, Self>,
    Candidate<B0, LogN<N, F>, F, E>: Materialize<FitsIn<B0, WidthOf<LogN<N, F>, F>>, Self>,
    // Sqrt candidate.
    Add1<N>: Shr<U1>,
    Shright<Add1<N>, U1>: Add<B1>,
    SqrtN<N>: Add<F> + Unsigned,
    WidthOf<SqrtN<N>, F>: IsLessOrEqual<<W::Signedness as WidthLimit>::Max>,
    Candidate<W::Signedness, SqrtN<N>, F, E>:
        Materialize<FitsIn<W::Signedness, WidthOf<SqrtN<N>, F>>, Self>,
{
    type Log = Resolved<W::Signedness, LogN<N, F>, F, E, Self>;
    type Exp = Resolved<B0, LogN<N, F>, F, E, Self>;
    type Sqrt = Resolved<W::Signedness, SqrtN<N>, F, E, Self>;
}
