//! Portfolio state: signed option positions keyed by contract id.

use crate::chain::{OptionChain, OptionContract};
use crate::models::Greeks;

/// A held contract. Quantity is in lots, signed (long > 0, short < 0) and
/// never zero; a zero-quantity update removes the position.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PortfolioPosition {
    pub option: OptionContract,
    pub quantity: i64,
}

/// Kept as a sequence with id uniqueness enforced on insert; there is exactly
/// one logical writer per session, so no interior locking.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Portfolio {
    positions: Vec<PortfolioPosition>,
}

impl Portfolio {
    pub fn positions(&self) -> &[PortfolioPosition] {
        &self.positions
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Insert or replace the position for `option`; quantity 0 removes it.
    pub fn upsert(&mut self, option: OptionContract, quantity: i64) {
        if quantity == 0 {
            self.remove(&option.id);
            return;
        }
        match self.positions.iter_mut().find(|p| p.option.id == option.id) {
            Some(existing) => {
                existing.option = option;
                existing.quantity = quantity;
            }
            None => self.positions.push(PortfolioPosition { option, quantity }),
        }
    }

    pub fn remove(&mut self, option_id: &str) {
        self.positions.retain(|p| p.option.id != option_id);
    }

    /// Distinct strikes currently held, fed back into chain regeneration so
    /// held contracts stay listed.
    pub fn strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self.positions.iter().map(|p| p.option.strike).collect();
        strikes.sort_by(|a, b| a.total_cmp(b));
        strikes.dedup();
        strikes
    }

    /// Re-point every position at the freshly generated chain, matching by
    /// contract id. Positions whose id vanished are dropped with a warning;
    /// with held strikes merged into the ladder that should not happen.
    pub fn relink(&mut self, chain: &OptionChain) {
        self.positions.retain_mut(|p| match chain.find(&p.option.id) {
            Some(fresh) => {
                p.option = fresh.clone();
                true
            }
            None => {
                tracing::warn!(id = %p.option.id, "position dropped: contract no longer listed");
                false
            }
        });
    }

    /// Quantity-weighted sum of IV-based Greeks. Empty portfolio is all-zero.
    pub fn aggregate_greeks(&self) -> Greeks {
        let mut total = Greeks::default();
        for p in &self.positions {
            let q = p.quantity as f64;
            let g = p.option.quote.greeks;
            total.delta += q * g.delta;
            total.gamma += q * g.gamma;
            total.vega += q * g.vega;
            total.theta += q * g.theta;
            total.rho += q * g.rho;
        }
        total
    }

    /// Mark-to-market value at the stored IV quotes, in currency units.
    pub fn value(&self, lot_size: f64) -> f64 {
        self.positions
            .iter()
            .map(|p| p.quantity as f64 * p.option.quote.price * lot_size)
            .sum()
    }
}
