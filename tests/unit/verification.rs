//! Cross-cutting algebraic properties, checked end to end

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use qfix::typenum::{U10, U20, U28, U4, U5, U6, U16, Z0};
    use qfix::{asin, cos, ln, exp, sin, sin_cos, sqrt, tan, Q, QFormat, Raise, UQ};

    type Fix = Q<U10, U20>;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    // Round-trip: to_double(from_double(v)) within epsilon/2 across the
    // representable range.
    #[test]
    fn real_round_trip_is_within_half_an_ulp() {
        let eps = Fix::precision();
        let mut v = Fix::least().to_f64();
        let hi = Fix::largest().to_f64();
        while v < hi {
            let x = Fix::from_num(v);
            assert!((x.to_f64() - v).abs() <= eps / 2.0, "round trip at {v}");
            v += 37.832_199;
        }
    }

    // Wrap/unwrap is exact for every stored integer.
    #[test]
    fn wrap_unwrap_is_exact() {
        for stored in [
            Fix::MIN_STORED,
            -1,
            0,
            1,
            12_345_678,
            Fix::MAX_STORED,
        ] {
            let x = Fix::wrap(stored as i32);
            assert_eq!(Fix::wrap(x.value()).value(), x.value());
        }
    }

    // Additive identity is exact.
    #[test]
    fn additive_identity() {
        for v in [-511.5, -0.25, 0.0, 0.333, 1023.9] {
            let x = Fix::from_num(v);
            assert_eq!((x + Fix::zero()).to_f64(), x.to_f64());
        }
    }

    // Multiplicative identity holds exactly after renormalisation.
    #[test]
    fn multiplicative_identity() {
        for v in [-2.5, -0.125, 0.0, 0.77, 500.25] {
            let x = Fix::from_num(v);
            let back: Fix = (x * Fix::one()).convert();
            assert_eq!(back.value(), x.value());
        }
    }

    // Negation is an involution except at the signed minimum.
    #[test]
    fn negation_involution() {
        for v in [-100.0, -0.001, 0.5, 900.125] {
            let x = Fix::from_num(v);
            assert_eq!((-(-x)).value(), x.value());
        }
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn negation_fires_at_the_signed_minimum() {
        let _ = -Q::<U5, U10, Z0, Raise>::least();
    }

    // Distributivity within the representable range.
    #[test]
    fn distributivity() {
        let samples = [-3.25, -0.4, 0.1, 1.75, 7.5];
        for &a in &samples {
            for &b in &samples {
                for &c in &samples {
                    let (fa, fb, fc) =
                        (Fix::from_num(a), Fix::from_num(b), Fix::from_num(c));
                    let lhs = (fa + fb) * fc;
                    let rhs = fa * fc + fb * fc;
                    assert!(
                        approx(lhs.to_f64(), rhs.to_f64(), 2.0 * Fix::precision()),
                        "({a} + {b}) * {c}"
                    );
                }
            }
        }
    }

    // Trig identities at representable angles.
    #[test]
    fn trig_identities() {
        type Angle = Q<U6, U16>;
        for i in -7..=7 {
            let x = Angle::from_num(f64::from(i) * 0.19);
            let (s, c) = sin_cos(x);
            assert!(approx(
                s.to_f64() * s.to_f64() + c.to_f64() * c.to_f64(),
                1.0,
                0.002
            ));
            assert!(approx(
                tan(x).to_f64() * cos(x).to_f64(),
                sin(x).to_f64(),
                0.002
            ));
        }
    }

    // Inverse laws inside the principal ranges.
    #[test]
    fn inverse_laws() {
        type Angle = Q<U6, U16>;
        for i in -14..=14 {
            let x = f64::from(i) * 0.1;
            let round = asin(sin(Angle::from_num(x))).unwrap();
            assert!(approx(round.to_f64(), x, 0.003), "asin(sin({x}))");
        }
        for i in -20..=20 {
            let x = f64::from(i) * 0.15;
            let e = exp(Angle::from_num(x));
            let round = ln(e.to_signed()).unwrap();
            assert!(approx(round.to_f64(), x, 0.003), "ln(exp({x}))");
        }
    }

    // Monotonicity on the stored-integer grid, exhaustively on a small
    // format.
    #[test]
    fn sqrt_monotone_exhaustive() {
        type Small = Q<U4, U6>;
        let mut prev = sqrt(Small::zero()).unwrap();
        for stored in 1..=Small::MAX_STORED {
            let cur = sqrt(Small::wrap(stored as i16)).unwrap();
            assert!(cur >= prev, "inversion at {stored}");
            prev = cur;
        }
    }

    // Overflow detection: for each operation there is an input pair whose
    // exact result is one ULP outside the destination and the raise policy
    // observably fires. Addition and subtraction:
    #[test]
    #[should_panic(expected = "overflow")]
    fn addition_overflow_detected() {
        let x = Q::<U5, U10>::largest();
        let _ = x + Q::<U5, U10>::epsilon();
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn subtraction_overflow_detected() {
        let x = Q::<U5, U10>::least();
        let _ = x - Q::<U5, U10>::epsilon();
    }

    // Multiplication (closed format, so the destination is the operand
    // format):
    #[test]
    #[should_panic(expected = "overflow")]
    fn multiplication_overflow_detected() {
        // 1024 * 1024 is exactly one stored ULP above the closed range.
        type WideQ = Q<qfix::typenum::U20, qfix::typenum::U30>;
        let a = WideQ::from_num(1024.0);
        let _ = a * a;
    }

    // Division:
    #[test]
    #[should_panic(expected = "overflow")]
    fn division_overflow_detected() {
        let a = Q::<U5, U10>::least();
        let _ = a / -Q::<U5, U10>::epsilon();
    }

    // Unsigned carry:
    #[test]
    #[should_panic(expected = "overflow")]
    fn unsigned_carry_detected() {
        let x = UQ::<U4, U28>::largest();
        let _ = x + UQ::<U4, U28>::epsilon();
    }
}
