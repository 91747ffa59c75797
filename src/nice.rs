//! "Nice number" rounding for tick step selection.

/// Round a positive span to a human-friendly step of the form
/// `m * 10^e` with `m` in `{1, 2, 5, 10}`.
///
/// With `round` set the nearest nice mantissa is chosen (thresholds 1.5,
/// 3 and 7); otherwise the smallest nice mantissa not below the input is
/// chosen. The result is undefined for `x <= 0`; callers must guard.
pub fn nice_num(x: f64, round: bool) -> f64 {
    let exp = x.log10().floor();
    let f = x / 10f64.powf(exp);
    let nf = if round {
        if f < 1.5 {
            1.0
        } else if f < 3.0 {
            2.0
        } else if f < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nf * 10f64.powf(exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn round_mode_thresholds() {
        assert_eq!(nice_num(1.4, true), 1.0);
        assert_eq!(nice_num(1.5, true), 2.0);
        assert_eq!(nice_num(2.9, true), 2.0);
        assert_eq!(nice_num(3.0, true), 5.0);
        assert_eq!(nice_num(6.9, true), 5.0);
        assert_eq!(nice_num(7.0, true), 10.0);
    }

    #[test]
    fn ceil_mode_thresholds() {
        assert_eq!(nice_num(1.0, false), 1.0);
        assert_eq!(nice_num(1.1, false), 2.0);
        assert_eq!(nice_num(2.0, false), 2.0);
        assert_eq!(nice_num(4.9, false), 5.0);
        assert_eq!(nice_num(5.1, false), 10.0);
    }

    #[test]
    fn scales_across_magnitudes() {
        assert_eq!(nice_num(0.0014, true), 0.001);
        assert_eq!(nice_num(42.0, true), 50.0);
        assert_eq!(nice_num(123_000.0, true), 100_000.0);
    }

    proptest! {
        #[test]
        fn result_is_nice_mantissa(x in 1e-6f64..1e9) {
            let v = nice_num(x, true);
            prop_assert!(v > 0.0);
            let exp = v.log10().floor();
            let mantissa = v / 10f64.powf(exp);
            let is_nice = [1.0f64, 2.0, 5.0, 10.0]
                .iter()
                .any(|m| (mantissa - m).abs() < 1e-9);
            prop_assert!(is_nice, "mantissa {} not in 1/2/5/10", mantissa);
        }

        #[test]
        fn ceil_mode_never_shrinks_mantissa(x in 1e-6f64..1e9) {
            let v = nice_num(x, false);
            // Ceil mode picks a step at least as large as the input, up to
            // floating-point noise at the decade boundary.
            prop_assert!(v >= x * (1.0 - 1e-12));
        }
    }
}
