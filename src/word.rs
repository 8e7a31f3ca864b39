//! Host storage words backing fixed-point values.
//!
//! A Q-format stores its value in the smallest host integer that holds
//! `n + f` significant bits (plus a sign bit for signed formats). Storage
//! stops at 64 bits so that `i128` is a lossless intermediate for every
//! operation, including pre-shifted division numerators.

use core::fmt::{Debug, Display};
use core::hash::Hash;

use typenum::{Bit, B0, B1};

/// A host integer usable as fixed-point storage.
///
/// Implemented for `i8..=i64` and `u8..=u64`. The signedness is exposed both
/// as a value (`SIGNED`) and as a type-level [`Bit`] so the promotion algebra
/// can compute result signedness at compile time.
pub trait Word: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// Type-level signedness: `B1` for signed words, `B0` for unsigned.
    type Signedness: Bit;

    /// The signed word of the same width.
    type SignedSibling: Word;

    /// The unsigned word of the same width.
    type UnsignedSibling: Word;

    /// Total width in bits, including the sign bit.
    const BITS: u32;

    /// Whether this word is a signed integer.
    const SIGNED: bool;

    /// The zero word.
    const ZERO: Self;

    /// Widens losslessly into the universal intermediate.
    fn widen(self) -> i128;

    /// Truncates a wide intermediate back into this word.
    ///
    /// Callers must have range-checked `v` against the destination format;
    /// the cast itself is a plain truncation.
    fn narrow(v: i128) -> Self;
}

/// Marker for signed storage words.
///
/// The elementary functions require signed intermediates and results, so
/// their bounds name this trait.
pub trait SignedWord: Word {}

macro_rules! impl_word {
    ($($word:ty, $signed:ty, $unsigned:ty, $bit:ty, $is_signed:expr;)*) => {$(
        impl Word for $word {
            type Signedness = $bit;
            type SignedSibling = $signed;
            type UnsignedSibling = $unsigned;

            const BITS: u32 = <$word>::BITS;
            const SIGNED: bool = $is_signed;
            const ZERO: Self = 0;

            #[inline]
            fn widen(self) -> i128 {
                self as i128
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn narrow(v: i128) -> Self {
                v as $word
            }
        }
    )*};
}

impl_word! {
    i8, i8, u8, B1, true;
    i16, i16, u16, B1, true;
    i32, i32, u32, B1, true;
    i64, i64, u64, B1, true;
    u8, i8, u8, B0, false;
    u16, i16, u16, B0, false;
    u32, i32, u32, B0, false;
    u64, i64, u64, B0, false;
}

impl SignedWord for i8 {}
impl SignedWord for i16 {}
impl SignedWord for i32 {}
impl SignedWord for i64 {}
