//! Tests for construction, limits, constants and conversions

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use qfix::typenum::{P4, U1, U10, U16, U2, U20, U24, U27, U4, U5, U8};
    use qfix::{Fixed, Ignore, Q, QFormat, Raise, Saturate, UQ};

    type Fix = Q<U10, U20>;

    #[test]
    fn from_num_rounds_to_nearest() {
        let x = Fix::from_num(1.5);
        assert_eq!(x.value(), 3 << 19);

        // Halves round away from zero in both directions.
        let ulp = 1.0 / 1_048_576.0;
        let up = Fix::from_num(0.5 * ulp);
        assert_eq!(up.value(), 1);
        let down = Fix::from_num(-0.5 * ulp);
        assert_eq!(down.value(), -1);
    }

    #[test]
    fn from_int_shifts_into_place() {
        assert_eq!(Fix::from_int(3).value(), 3 << 20);
        assert_eq!(Fix::from_int(-2).value(), -2 << 20);
        assert_eq!(Fix::from_int(0).value(), 0);
    }

    #[test]
    fn wrap_and_value_are_inverse() {
        let x = Fix::from_num(0.7071);
        assert_eq!(Fix::wrap(x.value()).value(), x.value());
    }

    #[test]
    fn wrap_checks_format_bounds() {
        // Q(5, 10) in an i16 leaves no slack; Q(4, 8) in an i16 does.
        type Narrow = Fixed<i16, U4, U8, qfix::typenum::Z0, Raise, Ignore>;
        assert!(Narrow::try_wrap(4095).is_ok());
        assert!(Narrow::try_wrap(4096).is_err());
        assert!(Narrow::try_wrap(-4096).is_ok());
        assert!(Narrow::try_wrap(-4097).is_err());
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn wrap_raises_outside_bounds() {
        type Narrow = Fixed<i16, U4, U8, qfix::typenum::Z0, Raise, Ignore>;
        let _ = Narrow::wrap(4096);
    }

    #[test]
    fn round_trip_through_double_is_exact() {
        for stored in [-1_000_000_i32, -1, 0, 1, 524_288, 1_048_575] {
            let x = Fix::wrap(stored);
            assert_eq!(Fix::from_num(x.to_f64()).value(), stored);
        }
    }

    #[test]
    fn try_from_num_reports_overflow() {
        assert!(Q::<U5, U10>::try_from_num(31.9).is_ok());
        assert!(Q::<U5, U10>::try_from_num(32.1).is_err());
        assert!(Q::<U5, U10>::try_from_num(-33.0).is_err());
    }

    #[test]
    fn stored_integer_bounds() {
        assert_eq!(Q::<U5, U10>::MAX_STORED, 32_767);
        assert_eq!(Q::<U5, U10>::MIN_STORED, -32_768);
        assert_eq!(UQ::<U4, U27>::MAX_STORED, (1 << 31) - 1);
        assert_eq!(UQ::<U4, U27>::MIN_STORED, 0);
    }

    #[test]
    fn numeric_limits_surface() {
        assert!(Fix::IS_BOUNDED);
        assert!(!Fix::IS_EXACT);
        assert!(!Fix::IS_INTEGER);
        assert!(Fix::IS_MODULO);
        assert!(!Fix::HAS_INFINITY);
        assert!(!Fix::HAS_NAN);
        assert!(!Fix::HAS_SUBNORMAL);
        assert_eq!(Fix::RADIX, 2);
        assert_eq!(Fix::DIGITS, 30);
        assert_eq!(Fix::DIGITS10, 9);
        assert_eq!(Fix::MAX_EXPONENT, 10);
        assert_eq!(Fix::MIN_EXPONENT, 20);
        assert_eq!(Fix::round_error().to_f64(), 0.5);
        assert_eq!(Fix::epsilon().value(), 1);
        assert_eq!(Fix::max().value(), Fix::MAX_STORED as i32);
        assert_eq!(Fix::min().value(), Fix::MIN_STORED as i32);
    }

    #[test]
    fn scale_and_precision() {
        assert_eq!(Q::<U5, U10>::scale(), 1024.0);
        assert_eq!(Q::<U5, U10>::precision(), 1.0 / 1024.0);
        assert_eq!(Q::<U5, U10>::scaling_factor(), 1.0);
        assert_eq!(Q::<U2, U8, P4>::scaling_factor(), 1.0 / 16.0);

        let db = Q::<U5, U10>::dynamic_range_db();
        assert!((db - 90.3).abs() < 0.1);
    }

    #[test]
    fn external_scaling_exponent() {
        // Q(2, 8, e=4): represented value is stored * 2^-12.
        type Small = Q<U2, U8, P4>;
        let x = Small::from_num(0.2);
        assert_eq!(x.value(), 819);
        assert!((x.to_f64() - 0.2).abs() < 1.0 / 4096.0);
        assert!((Small::largest().to_f64() - 0.25).abs() < 0.001);
    }

    #[test]
    fn constants_match_doubles() {
        type Wide = Q<U8, U24>;
        let tol = 1.0 / 16_777_216.0;
        assert!((Wide::pi().to_f64() - core::f64::consts::PI).abs() <= tol);
        assert!((Wide::tau().to_f64() - core::f64::consts::TAU).abs() <= tol);
        assert!((Wide::e().to_f64() - core::f64::consts::E).abs() <= tol);
        assert!((Wide::ln_2().to_f64() - core::f64::consts::LN_2).abs() <= tol);
        assert!((Wide::ln_10().to_f64() - core::f64::consts::LN_10).abs() <= tol);
        assert!((Wide::sqrt_2().to_f64() - core::f64::consts::SQRT_2).abs() <= tol);
        assert!((Wide::frac_pi_2().to_f64() - core::f64::consts::FRAC_PI_2).abs() <= tol);
        assert!((Wide::frac_pi_4().to_f64() - core::f64::consts::FRAC_PI_4).abs() <= tol);
        assert!((Wide::frac_1_pi().to_f64() - core::f64::consts::FRAC_1_PI).abs() <= tol);
        assert!((Wide::frac_2_pi().to_f64() - core::f64::consts::FRAC_2_PI).abs() <= tol);
        assert!((Wide::frac_1_sqrt_2().to_f64() - core::f64::consts::FRAC_1_SQRT_2).abs() <= tol);
        assert!((Wide::log2_e().to_f64() - core::f64::consts::LOG2_E).abs() <= tol);
        assert!((Wide::log10_e().to_f64() - core::f64::consts::LOG10_E).abs() <= tol);
        assert!((Wide::log10_2().to_f64() - core::f64::consts::LOG10_2).abs() <= tol);
        assert!((Wide::frac_2_sqrt_pi().to_f64() - core::f64::consts::FRAC_2_SQRT_PI).abs() <= tol);
        assert!((Wide::sqrt_8().to_f64() - 2.0 * core::f64::consts::SQRT_2).abs() <= tol);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn pi_raises_in_a_one_bit_format() {
        let _ = Q::<U1, U10>::pi();
    }

    #[test]
    fn convert_between_formats() {
        let x = Fix::from_num(1.5);
        let narrow: Q<U4, U8> = x.convert();
        assert_eq!(narrow.value(), 384);

        let back: Fix = narrow.convert();
        assert_eq!(back.value(), x.value());
    }

    #[test]
    fn convert_truncates_toward_zero() {
        let x = Fix::from_num(-1.9);
        let whole: Q<U10, U1> = x.convert();
        // -1.9 truncates to -1.5 on the half grid.
        assert_eq!(whole.to_f64(), -1.5);
    }

    #[test]
    fn convert_underflow_ignored_by_default() {
        let tiny = Fix::epsilon();
        let coarse: Q<U10, U8> = tiny.convert();
        assert_eq!(coarse.value(), 0);
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn convert_underflow_raises_when_asked() {
        type Strict = Q<U10, U8, qfix::typenum::Z0, Raise, Raise>;
        let tiny = Fix::epsilon();
        let _: Strict = tiny.convert();
    }

    #[test]
    fn convert_underflow_saturates_to_one_ulp() {
        type Clamped = Q<U10, U8, qfix::typenum::Z0, Raise, Saturate>;
        let tiny = Fix::epsilon();
        let c: Clamped = tiny.convert();
        assert_eq!(c.value(), 1);
        let c: Clamped = (-tiny).convert();
        assert_eq!(c.value(), -1);
    }

    #[test]
    fn try_convert_reports_instead_of_panicking() {
        let big = Fix::from_num(100.0);
        assert!(big.try_convert::<Q<U2, U20>>().is_err());
        assert!(Fix::epsilon().try_convert::<Q<U10, U8>>().is_err());
        assert!(big.try_convert::<Q<U10, U8>>().is_ok());
    }

    #[test]
    fn saturating_construction_clamps() {
        type Sat = Q<U5, U10, qfix::typenum::Z0, Saturate>;
        assert_eq!(Sat::from_num(100.0).value(), 32_767);
        assert_eq!(Sat::from_num(-100.0).value(), -32_768);
    }

    #[test]
    fn ignoring_construction_wraps() {
        type Wrapping = Q<U5, U10, qfix::typenum::Z0, Ignore>;
        assert_eq!(Wrapping::from_num(33.0).to_f64(), -31.0);
    }

    #[test]
    fn signed_and_unsigned_siblings() {
        let x = UQ::<U4, U27>::from_num(3.25);
        let s = x.to_signed();
        assert_eq!(s.value(), x.value() as i32);

        type Sat = Fixed<i16, U4, U8, qfix::typenum::Z0, Saturate, Ignore>;
        let neg = Sat::from_num(-1.0);
        assert_eq!(neg.to_unsigned().value(), 0);
        let pos = Sat::from_num(2.5);
        assert_eq!(pos.to_unsigned().value(), 640);
    }

    #[test]
    fn display_and_debug() {
        let x = Q::<U4, U16>::from_num(1.25);
        assert_eq!(std::format!("{x}"), "1.25");
        let dbg = std::format!("{x:?}");
        assert!(dbg.contains("Q(4, 16, 0)"));
    }

    #[test]
    fn comparisons_follow_values() {
        let a = Fix::from_num(-2.0);
        let b = Fix::from_num(0.5);
        let c = Fix::from_num(0.5);
        assert!(a < b);
        assert!(b >= c);
        assert_eq!(b, c);
        assert_ne!(a, b);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Fix::default().value(), 0);
        assert_eq!(Fix::default(), Fix::zero());
    }

    #[test]
    fn basic_values() {
        assert_eq!(Fix::one().to_f64(), 1.0);
        assert_eq!(Fix::two().to_f64(), 2.0);
        assert_eq!(Fix::half().to_f64(), 0.5);
        assert_eq!(Q::<U16, U10>::one().value(), 1024);
    }

    #[test]
    fn abs_behaviour() {
        let x = Fix::from_num(-1.5);
        assert_eq!(x.abs().to_f64(), 1.5);
        assert_eq!(Fix::from_num(1.5).abs().to_f64(), 1.5);
    }
}
