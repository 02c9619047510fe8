//! Normal distribution primitives used by every pricing path.
//!
//! The CDF goes through the Abramowitz-Stegun 7.1.26 rational approximation
//! of erf rather than a library CDF: downstream fixtures (option prices, VaR
//! multipliers) are pinned to this exact approximation, which is accurate to
//! about 1.5e-7 absolute error.

use std::f64::consts::{PI, SQRT_2};

const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Error function, Abramowitz-Stegun 7.1.26. Odd: erf(-x) = -erf(x).
#[inline]
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

/// Standard normal CDF.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Standard normal PDF.
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{Continuous, ContinuousCDF, Normal};

    #[test]
    fn test_cdf_matches_reference_within_tolerance() {
        let reference = Normal::new(0.0, 1.0).unwrap();
        let mut x = -6.0;
        while x <= 6.0 {
            let err = (norm_cdf(x) - reference.cdf(x)).abs();
            assert!(err < 1.5e-7, "cdf error {err} at x={x}");
            x += 0.01;
        }
    }

    #[test]
    fn test_pdf_matches_reference() {
        let reference = Normal::new(0.0, 1.0).unwrap();
        for x in [-3.0, -1.0, 0.0, 0.5, 2.5] {
            assert!((norm_pdf(x) - reference.pdf(x)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_erf_odd_symmetry() {
        for x in [0.1, 0.7, 1.3, 2.9] {
            assert!((erf(x) + erf(-x)).abs() < 1e-15);
        }
    }

    #[test]
    fn test_cdf_anchor_values() {
        // These exact values are part of the numeric contract (the VaR engine
        // uses norm_cdf(-0.05) and norm_cdf(-0.01) as multipliers).
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((norm_cdf(-0.05) - 0.4800611269374935).abs() < 1e-12);
        assert!((norm_cdf(-0.01) - 0.4960106206005236).abs() < 1e-12);
    }
}
