//! Smoke tests across a spread of formats

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use qfix::typenum::{U12, U16, U24, U3, U4, U40, U6, U8};
    use qfix::{
        acos, acosh, asin, asinh, atan, atan2, atanh, cos, cosh, exp, ln, log10, log2, pow2, sin,
        sin_cos, sinh, sinh_cosh, sqrt, tan, tanh, Q, QFormat, UQ,
    };

    #[test]
    fn trig_smoke() {
        let angle = Q::<U6, U16>::from_num(0.5);
        let _ = sin(angle);
        let _ = cos(angle);
        let _ = tan(angle);
        let _ = sin_cos(angle);
    }

    #[test]
    fn inverse_trig_smoke() {
        let x = Q::<U6, U16>::from_num(0.5);
        let _ = asin(x).unwrap();
        let _ = acos(x).unwrap();
        let _ = atan(x);
        let _ = atan2(x, Q::<U6, U16>::one());
    }

    #[test]
    fn hyperbolic_smoke() {
        let x = Q::<U6, U16>::from_num(0.5);
        let _ = sinh(x);
        let _ = cosh(x);
        let _ = tanh(x);
        let _ = sinh_cosh(x);
        let _ = asinh(x);
        let _ = atanh(x);
        let _ = acosh(Q::<U6, U16>::from_num(1.5)).unwrap();
    }

    #[test]
    fn exponential_smoke() {
        let x = Q::<U6, U16>::from_num(0.5);
        let _ = exp(x);
        let _ = pow2(x);
        let _ = ln(x).unwrap();
        let _ = log2(x).unwrap();
        let _ = log10(x).unwrap();
        let _ = sqrt(x).unwrap();
    }

    #[test]
    fn small_formats_work() {
        let x = Q::<U3, U4>::from_num(1.25);
        assert!((sin(x).to_f64() - 1.25_f64.sin()).abs() < 0.1);
        assert!((sqrt(x).unwrap().to_f64() - 1.25_f64.sqrt()).abs() < 0.1);
    }

    #[test]
    fn wide_formats_work() {
        let x = Q::<U12, U40>::from_num(0.25);
        assert!((sin(x).to_f64() - 0.25_f64.sin()).abs() < 1e-9);
        assert!((exp(x).to_f64() - 0.25_f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn deep_fraction_formats_work() {
        let x = Q::<U8, U24>::from_num(0.1);
        let arithmetic = (x + x) * x;
        assert!((arithmetic.to_f64() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn unsigned_arithmetic_works() {
        let a = UQ::<U8, U8>::from_num(3.5);
        let b = UQ::<U8, U8>::from_num(1.25);
        assert_eq!((a + b).to_f64(), 4.75);
        assert_eq!((a - b).to_f64(), 2.25);
        assert_eq!((a * b).to_f64(), 4.375);
        assert!(((a / b).to_f64() - 2.8).abs() < 1e-4);
    }

    #[test]
    fn copies_compute_identically() {
        let x = Q::<U6, U16>::from_num(0.875);
        let y = x;
        assert_eq!(sin(x).value(), sin(y).value());
        assert_eq!(exp(x).value(), exp(y).value());
    }
}
