//! Value-at-Risk over the historical spot path.
//!
//! The portfolio is repriced at every historical close with each option's own
//! stored IV and a fixed time to maturity: a pure spot-shock repricing, not a
//! walk of the calendar. Parametric and empirical-quantile VaR are then read
//! off the simple returns of that value series.

use crate::chain::TRADING_DAYS;
use crate::config::EngineConfig;
use crate::math::norm_cdf;
use crate::models::bsm;
use crate::portfolio::Portfolio;

/// Loss magnitudes in currency units, all non-negative. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct VaRResult {
    pub parametric95: f64,
    pub parametric99: f64,
    pub historical95: f64,
    pub historical99: f64,
}

/// VaR of the option positions alone.
pub fn compute_var(
    portfolio: &Portfolio,
    historical_prices: &[f64],
    config: &EngineConfig,
) -> VaRResult {
    compute_var_with_stock(portfolio, historical_prices, config, 0.0)
}

/// VaR of the portfolio plus a delta-hedge stock leg of `hedge_shares`.
pub fn compute_var_hedged(
    portfolio: &Portfolio,
    historical_prices: &[f64],
    config: &EngineConfig,
    hedge_shares: f64,
) -> VaRResult {
    compute_var_with_stock(portfolio, historical_prices, config, hedge_shares)
}

fn compute_var_with_stock(
    portfolio: &Portfolio,
    historical_prices: &[f64],
    config: &EngineConfig,
    hedge_shares: f64,
) -> VaRResult {
    if historical_prices.len() < 2 || portfolio.is_empty() {
        return VaRResult::default();
    }

    let r = config.rate();
    let values: Vec<f64> = historical_prices
        .iter()
        .map(|&spot| {
            let options: f64 = portfolio
                .positions()
                .iter()
                .map(|p| {
                    let o = &p.option;
                    let t = f64::from(o.maturity_days) / TRADING_DAYS;
                    let q = bsm::price(spot, o.strike, t, o.iv, r, o.option_type);
                    p.quantity as f64 * q.price * config.lot_size
                })
                .sum();
            options + hedge_shares * spot
        })
        .collect();

    // Simple returns; a zero or sign-flipping base produces non-finite or
    // meaningless entries, which are discarded.
    let mut returns: Vec<f64> = Vec::with_capacity(values.len() - 1);
    for pair in values.windows(2) {
        let ret = (pair[1] - pair[0]) / pair[0];
        if ret.is_finite() {
            returns.push(ret);
        }
    }
    if returns.len() < 2 {
        return VaRResult::default();
    }

    let current_value = *values.last().unwrap_or(&0.0);

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let var_sum: f64 = returns.iter().map(|r| (r - mean) * (r - mean)).sum();
    let std_dev = (var_sum / (n - 1.0)).sqrt();

    // The upstream engine used the normal CDF where an inverse CDF belongs:
    // norm_cdf(-0.05) ~ 0.4801 and norm_cdf(-0.01) ~ 0.4960 stand in for the
    // 1.645 / 2.326 z-scores. Kept as the numeric contract.
    let m95 = norm_cdf(-0.05);
    let m99 = norm_cdf(-0.01);
    let parametric = |m: f64| (-(mean + m * std_dev) * current_value).max(0.0);

    let mut sorted = returns;
    sorted.sort_by(|a, b| a.total_cmp(b));
    let quantile = |c: f64| {
        let idx = ((c * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
        (-sorted[idx] * current_value).max(0.0)
    };

    VaRResult {
        parametric95: parametric(m95),
        parametric99: parametric(m99),
        historical95: quantile(0.05),
        historical99: quantile(0.01),
    }
}
