//! Synthetic option chain: fixed maturities, a strike ladder around spot, and
//! a parametric volatility smile. Every contract is priced twice, once at its
//! smile-assigned IV and once at the flat historical volatility, so consumers
//! can compare the two surfaces.

use crate::models::bsm;
use crate::models::{OptionType, Quote};
use std::collections::BTreeMap;

/// Chain maturities in calendar days.
pub const MATURITIES: [u32; 3] = [30, 60, 90];

/// Strike ladder as multiples of spot.
const STRIKE_STEPS: [f64; 5] = [0.95, 0.98, 1.00, 1.02, 1.05];

/// Trading days per year; maturities convert as days/252.
pub const TRADING_DAYS: f64 = 252.0;

/// A single listed contract. Immutable after generation; `id` is derived from
/// (strike, maturity, type) and is the stable identity used to re-point
/// portfolio positions after the chain is regenerated.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OptionContract {
    pub id: String,
    pub strike: f64,
    pub maturity_days: u32,
    pub option_type: OptionType,
    /// Smile-assigned implied volatility.
    pub iv: f64,
    /// Primary quote, priced at `iv`.
    pub quote: Quote,
    /// Shadow quote, priced at the flat historical volatility.
    pub hist_quote: Quote,
}

impl OptionContract {
    pub fn make_id(strike: f64, maturity_days: u32, option_type: OptionType) -> String {
        format!("{}-{}-{}", strike, maturity_days, option_type.code())
    }
}

/// Maturity (days) -> contracts at that maturity. All maturities share the
/// same strike ladder; each (maturity, strike) has exactly one call and one
/// put.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct OptionChain {
    pub expiries: BTreeMap<u32, Vec<OptionContract>>,
}

impl OptionChain {
    pub fn find(&self, id: &str) -> Option<&OptionContract> {
        self.expiries.values().flatten().find(|o| o.id == id)
    }

    pub fn contracts(&self) -> impl Iterator<Item = &OptionContract> {
        self.expiries.values().flatten()
    }

    /// Distinct strikes in the chain, ascending.
    pub fn strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self
            .expiries
            .values()
            .flatten()
            .map(|o| o.strike)
            .collect();
        strikes.sort_by(|a, b| a.total_cmp(b));
        strikes.dedup();
        strikes
    }
}

/// Smile/skew assignment: flat historical vol bent by log-moneyness.
/// At the money (moneyness = 0) this is exactly `hist_vol`.
#[inline]
fn smile_iv(hist_vol: f64, moneyness: f64) -> f64 {
    hist_vol * (1.0 + 0.2 * moneyness * moneyness - 0.1 * moneyness)
}

/// Build the chain for the current spot.
///
/// `existing_strikes` are merged into the default ladder (dedup, ascending)
/// so contracts held in a portfolio remain representable after regeneration.
pub fn generate(
    current_price: f64,
    hist_vol: f64,
    risk_free_rate_pct: f64,
    existing_strikes: &[f64],
) -> OptionChain {
    let r = risk_free_rate_pct / 100.0;

    let mut strikes: Vec<f64> = STRIKE_STEPS
        .iter()
        .map(|m| (current_price * m).round())
        .collect();
    strikes.extend_from_slice(existing_strikes);
    strikes.sort_by(|a, b| a.total_cmp(b));
    strikes.dedup();

    let mut expiries = BTreeMap::new();
    for &maturity in &MATURITIES {
        let t = f64::from(maturity) / TRADING_DAYS;
        let mut contracts = Vec::with_capacity(strikes.len() * 2);

        for &strike in &strikes {
            let moneyness = (strike / current_price).ln();
            let iv = smile_iv(hist_vol, moneyness);

            for option_type in [OptionType::Call, OptionType::Put] {
                contracts.push(OptionContract {
                    id: OptionContract::make_id(strike, maturity, option_type),
                    strike,
                    maturity_days: maturity,
                    option_type,
                    iv,
                    quote: bsm::price(current_price, strike, t, iv, r, option_type),
                    hist_quote: bsm::price(current_price, strike, t, hist_vol, r, option_type),
                });
            }
        }
        expiries.insert(maturity, contracts);
    }

    OptionChain { expiries }
}
