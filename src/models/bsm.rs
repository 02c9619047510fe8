//! Black-Scholes-Merton European option pricing with analytic Greeks.
//!
//! d1 = (ln(S/K) + (r + sigma^2/2) T) / (sigma sqrt(T))
//! d2 = d1 - sigma sqrt(T)
//!
//! Call: price = S N(d1) - K e^(-rT) N(d2)
//! Put:  price = K e^(-rT) N(-d2) - S N(-d1)
//!
//! Pure function over its inputs; never panics, never allocates. The caller
//! supplies positive S and K.

use crate::math::{norm_cdf, norm_pdf};
use crate::models::{Greeks, OptionType, Quote};

/// Price a single European option.
///
/// `t` is time to maturity in years (days/252), `sigma` annualized
/// volatility, `r` annualized rate as a decimal.
///
/// If `t <= 0` or `sigma <= 0` the analytic formula would divide by zero in
/// d1/d2, so the quote degrades to intrinsic value with a sign-only delta and
/// zero gamma/vega/theta/rho.
pub fn price(s: f64, k: f64, t: f64, sigma: f64, r: f64, option_type: OptionType) -> Quote {
    if t <= 0.0 || sigma <= 0.0 {
        return expired_or_flat(s, k, option_type);
    }

    let sqrt_t = t.sqrt();
    let sigma_sqrt_t = sigma * sqrt_t;
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;

    let disc = (-r * t).exp();
    let pdf_d1 = norm_pdf(d1);

    let gamma = pdf_d1 / (s * sigma_sqrt_t);
    let vega = s * pdf_d1 * sqrt_t;

    let (price, delta, theta, rho) = match option_type {
        OptionType::Call => {
            let nd1 = norm_cdf(d1);
            let nd2 = norm_cdf(d2);
            (
                s * nd1 - k * disc * nd2,
                nd1,
                -(s * pdf_d1 * sigma) / (2.0 * sqrt_t) - r * k * disc * nd2,
                k * t * disc * nd2,
            )
        }
        OptionType::Put => {
            let nmd1 = norm_cdf(-d1);
            let nmd2 = norm_cdf(-d2);
            (
                k * disc * nmd2 - s * nmd1,
                norm_cdf(d1) - 1.0,
                -(s * pdf_d1 * sigma) / (2.0 * sqrt_t) + r * k * disc * nmd2,
                -k * t * disc * nmd2,
            )
        }
    };

    Quote {
        price,
        greeks: Greeks {
            delta,
            gamma,
            vega,
            theta,
            rho,
        },
        d1,
        d2,
    }
}

/// Degenerate branch: intrinsic value, delta in {1, 0, -1} by moneyness.
fn expired_or_flat(s: f64, k: f64, option_type: OptionType) -> Quote {
    let (price, delta) = match option_type {
        OptionType::Call => ((s - k).max(0.0), if s > k { 1.0 } else { 0.0 }),
        OptionType::Put => ((k - s).max(0.0), if s < k { -1.0 } else { 0.0 }),
    };

    Quote {
        price,
        greeks: Greeks {
            delta,
            ..Greeks::default()
        },
        d1: f64::INFINITY,
        d2: f64::INFINITY,
    }
}
