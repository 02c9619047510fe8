//! P&L scenarios: discrete spot shocks for the live portfolio, and
//! (days-passed, iv-shift) repricing for multi-leg strategies.

use crate::chain::{OptionContract, TRADING_DAYS};
use crate::config::EngineConfig;
use crate::models::{bsm, OptionType};
use crate::portfolio::Portfolio;
use crate::risk::hedge::delta_hedge_shares;
use smallvec::SmallVec;

/// Spot shocks applied to the last close.
pub const SPOT_SHOCKS: [f64; 5] = [-0.02, -0.01, 0.0, 0.01, 0.02];

/// One row of the shock table.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ShockPnl {
    /// Shock as a fraction of spot (-0.02 = down 2%).
    pub shock: f64,
    pub spot: f64,
    pub unhedged: f64,
    pub hedged: f64,
}

/// Reprice every position at each shocked spot (same IV, maturity and rate)
/// and diff against the current mark. The hedged column adds the stock P&L of
/// a single-share-per-delta hedge (lot size 1, matching the source engine)
/// while the option legs stay scaled by the configured lot size.
pub fn spot_shock_pnl(
    portfolio: &Portfolio,
    last_price: f64,
    config: &EngineConfig,
) -> Vec<ShockPnl> {
    let r = config.rate();
    let hedge_shares = delta_hedge_shares(&portfolio.aggregate_greeks(), 1.0);

    SPOT_SHOCKS
        .iter()
        .map(|&shock| {
            let spot = last_price * (1.0 + shock);
            let unhedged: f64 = portfolio
                .positions()
                .iter()
                .map(|p| {
                    let o = &p.option;
                    let t = f64::from(o.maturity_days) / TRADING_DAYS;
                    let repriced = bsm::price(spot, o.strike, t, o.iv, r, o.option_type);
                    p.quantity as f64 * (repriced.price - o.quote.price) * config.lot_size
                })
                .sum();

            ShockPnl {
                shock,
                spot,
                unhedged,
                hedged: unhedged + hedge_shares * (spot - last_price),
            }
        })
        .collect()
}

/// One leg of a strategy: a contract's pricing inputs frozen at entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StrategyLeg {
    pub option_type: OptionType,
    pub strike: f64,
    pub maturity_days: u32,
    pub iv: f64,
    pub entry_price: f64,
    pub quantity: i64,
}

impl StrategyLeg {
    /// Freeze a chain contract as a strategy leg at its current mark.
    pub fn from_contract(option: &OptionContract, quantity: i64) -> Self {
        Self {
            option_type: option.option_type,
            strike: option.strike,
            maturity_days: option.maturity_days,
            iv: option.iv,
            entry_price: option.quote.price,
            quantity,
        }
    }
}

/// A small multi-leg strategy (spread, straddle, condor). Most strategies fit
/// four legs without spilling to the heap.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Strategy {
    pub legs: SmallVec<[StrategyLeg; 4]>,
}

impl Strategy {
    pub fn new(legs: impl IntoIterator<Item = StrategyLeg>) -> Self {
        Self {
            legs: legs.into_iter().collect(),
        }
    }

    /// P&L at `spot` after `days_passed` calendar days and an additive IV
    /// shift, per share (no lot scaling).
    ///
    /// Time decay floors at the pricer's degenerate branch, and the IV shift
    /// is not clamped: a zero or negative shifted vol also routes through the
    /// intrinsic-value fallback.
    pub fn pnl(&self, spot: f64, days_passed: f64, iv_shift: f64, r: f64) -> f64 {
        self.legs
            .iter()
            .map(|leg| {
                let t = (f64::from(leg.maturity_days) - days_passed) / TRADING_DAYS;
                let iv = leg.iv + iv_shift;
                let repriced = bsm::price(spot, leg.strike, t, iv, r, leg.option_type);
                leg.quantity as f64 * (repriced.price - leg.entry_price)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain;
    use chrono::NaiveDate;

    fn config() -> EngineConfig {
        EngineConfig {
            risk_free_rate_pct: 7.0,
            lot_size: 100.0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        }
    }

    fn long_call() -> (chain::OptionChain, Portfolio) {
        let c = chain::generate(100.0, 0.20, 7.0, &[]);
        let mut p = Portfolio::default();
        p.upsert(c.find("100-30-C").unwrap().clone(), 1);
        (c, p)
    }

    #[test]
    fn test_shock_table_shape() {
        let (_, p) = long_call();
        let table = spot_shock_pnl(&p, 100.0, &config());
        assert_eq!(table.len(), 5);
        assert_eq!(table[2].shock, 0.0);
        assert!(table[2].unhedged.abs() < 1e-9, "zero shock, zero P&L");
        assert!(table[2].hedged.abs() < 1e-9);
    }

    #[test]
    fn test_long_call_directionality() {
        let (_, p) = long_call();
        let table = spot_shock_pnl(&p, 100.0, &config());
        assert!(table[0].unhedged < 0.0, "down 2% loses: {}", table[0].unhedged);
        assert!(table[4].unhedged > 0.0, "up 2% gains: {}", table[4].unhedged);
        // Short-stock hedge shares use lot size 1 by contract, so damping is
        // partial, but the direction of the adjustment must hold.
        assert!(table[0].hedged > table[0].unhedged);
        assert!(table[4].hedged < table[4].unhedged);
    }

    #[test]
    fn test_strategy_entry_day_is_flat() {
        let (c, _) = long_call();
        let straddle = Strategy::new([
            StrategyLeg::from_contract(c.find("100-30-C").unwrap(), 1),
            StrategyLeg::from_contract(c.find("100-30-P").unwrap(), 1),
        ]);
        // No time passed, no vol shift, same spot: marks equal entry prices.
        assert!(straddle.pnl(100.0, 0.0, 0.0, 0.07).abs() < 1e-9);
    }

    #[test]
    fn test_strategy_theta_decay() {
        let (c, _) = long_call();
        let straddle = Strategy::new([
            StrategyLeg::from_contract(c.find("100-30-C").unwrap(), 1),
            StrategyLeg::from_contract(c.find("100-30-P").unwrap(), 1),
        ]);
        // A long straddle bleeds with the calendar at unchanged spot.
        let pnl = straddle.pnl(100.0, 10.0, 0.0, 0.07);
        assert!(pnl < 0.0, "10 days of decay: {pnl}");
    }

    #[test]
    fn test_strategy_expiry_is_intrinsic() {
        let (c, _) = long_call();
        let call = c.find("100-30-C").unwrap();
        let leg = Strategy::new([StrategyLeg::from_contract(call, 1)]);
        // Past maturity the leg reprices to intrinsic value.
        let pnl = leg.pnl(107.0, 45.0, 0.0, 0.07);
        assert!((pnl - (7.0 - call.quote.price)).abs() < 1e-9);
    }

    #[test]
    fn test_negative_iv_shift_routes_degenerate() {
        let (c, _) = long_call();
        let call = c.find("100-30-C").unwrap();
        let leg = Strategy::new([StrategyLeg::from_contract(call, 1)]);
        // Shift drives vol below zero: intrinsic-value pricing, not a panic.
        let pnl = leg.pnl(95.0, 0.0, -1.0, 0.07);
        assert!((pnl - (0.0 - call.quote.price)).abs() < 1e-9);
    }

    #[test]
    fn test_vega_exposure() {
        let (c, _) = long_call();
        let leg = Strategy::new([StrategyLeg::from_contract(c.find("100-60-C").unwrap(), 1)]);
        assert!(leg.pnl(100.0, 0.0, 0.05, 0.07) > 0.0);
        assert!(leg.pnl(100.0, 0.0, -0.05, 0.07) < 0.0);
    }
}
