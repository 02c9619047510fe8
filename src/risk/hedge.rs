//! Delta and gamma hedge suggestions.

use crate::chain::{OptionChain, OptionContract};
use crate::models::Greeks;
use crate::portfolio::Portfolio;

/// Portfolios with |gamma| below this are considered already neutral.
const GAMMA_NEUTRAL_EPS: f64 = 1e-6;

/// Maturity bucket the gamma hedge trades in.
const HEDGE_MATURITY_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HedgeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for HedgeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

/// A gamma-neutralizing option trade. Recomputed whenever the portfolio or
/// the chain changes.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GammaHedgeSuggestion {
    pub action: HedgeAction,
    /// Lots, rounded to nearest, always non-negative.
    pub quantity: i64,
    pub option: OptionContract,
    pub message: String,
}

/// Stock quantity that neutralizes portfolio delta. Signed: positive means
/// buy stock.
#[inline]
pub fn delta_hedge_shares(portfolio_greeks: &Greeks, lot_size: f64) -> f64 {
    -portfolio_greeks.delta * lot_size
}

/// Pick the gamma hedge: among 30-day contracts, the one with the largest
/// absolute gamma, ties going to the later contract in chain order.
pub fn gamma_hedge(portfolio: &Portfolio, chain: &OptionChain) -> Option<GammaHedgeSuggestion> {
    if portfolio.is_empty() {
        return None;
    }
    let portfolio_gamma = portfolio.aggregate_greeks().gamma;
    if portfolio_gamma.abs() < GAMMA_NEUTRAL_EPS {
        return None;
    }

    let mut candidates: Vec<&OptionContract> =
        chain.expiries.get(&HEDGE_MATURITY_DAYS)?.iter().collect();
    // Stable sort ascending by |gamma|, then take the last: max |gamma| with
    // ties resolved in favor of later iteration order.
    candidates.sort_by(|a, b| {
        a.quote
            .greeks
            .gamma
            .abs()
            .total_cmp(&b.quote.greeks.gamma.abs())
    });
    let candidate = (*candidates.last()?).clone();
    if candidate.quote.greeks.gamma.abs() < 1e-12 {
        return None;
    }

    let signed = (-portfolio_gamma / candidate.quote.greeks.gamma).round();
    let action = if signed > 0.0 {
        HedgeAction::Buy
    } else {
        HedgeAction::Sell
    };
    let quantity = signed.abs() as i64;
    let message = format!(
        "{action} {quantity} lot(s) of {} to neutralize portfolio gamma ({portfolio_gamma:.6})",
        candidate.id
    );

    Some(GammaHedgeSuggestion {
        action,
        quantity,
        option: candidate,
        message,
    })
}
