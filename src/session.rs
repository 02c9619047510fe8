//! Session state: the single logical writer over config, prices, stats,
//! chain and portfolio. Every mutation runs the full recompute before the
//! next action is accepted; nothing here is incremental and nothing needs a
//! lock.

use crate::chain::{self, OptionChain};
use crate::config::EngineConfig;
use crate::feeds::PricePoint;
use crate::models::stats::{compute_stats, HistoricalStats};
use crate::models::Greeks;
use crate::portfolio::Portfolio;
use crate::risk::hedge::{self, GammaHedgeSuggestion};
use crate::risk::scenario::{self, ShockPnl};
use crate::risk::var::{self, VaRResult};

pub struct Session {
    ticker: String,
    config: EngineConfig,
    prices: Vec<PricePoint>,
    stats: HistoricalStats,
    chain: OptionChain,
    portfolio: Portfolio,
}

impl Session {
    pub fn new(ticker: impl Into<String>, config: EngineConfig, prices: Vec<PricePoint>) -> Self {
        let mut session = Self {
            ticker: ticker.into(),
            config,
            prices,
            stats: HistoricalStats::default(),
            chain: OptionChain::default(),
            portfolio: Portfolio::default(),
        };
        session.recompute();
        session
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn prices(&self) -> &[PricePoint] {
        &self.prices
    }

    pub fn stats(&self) -> &HistoricalStats {
        &self.stats
    }

    pub fn chain(&self) -> &OptionChain {
        &self.chain
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().map(|p| p.price)
    }

    fn closes(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p.price).collect()
    }

    /// Swap in a new config snapshot and recompute everything derived.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.recompute();
    }

    /// Replace the price series (e.g. after a re-fetch) and recompute.
    pub fn set_prices(&mut self, prices: Vec<PricePoint>) {
        self.prices = prices;
        self.recompute();
    }

    /// Insert or update a position by contract id; quantity 0 removes it.
    /// Returns false (and leaves the portfolio untouched) for unknown ids.
    pub fn upsert_position(&mut self, option_id: &str, quantity: i64) -> bool {
        if quantity == 0 {
            self.portfolio.remove(option_id);
            return true;
        }
        match self.chain.find(option_id) {
            Some(contract) => {
                self.portfolio.upsert(contract.clone(), quantity);
                true
            }
            None => {
                tracing::warn!(id = %option_id, "upsert ignored: contract not in chain");
                false
            }
        }
    }

    pub fn remove_position(&mut self, option_id: &str) {
        self.portfolio.remove(option_id);
    }

    /// Full recompute: stats from the series, chain from the last close with
    /// held strikes merged, positions re-pointed at the fresh contracts.
    fn recompute(&mut self) {
        self.stats = compute_stats(&self.closes());
        self.chain = match self.last_price() {
            Some(last) => chain::generate(
                last,
                self.stats.annualized_volatility,
                self.config.risk_free_rate_pct,
                &self.portfolio.strikes(),
            ),
            None => OptionChain::default(),
        };
        self.portfolio.relink(&self.chain);
    }

    pub fn portfolio_greeks(&self) -> Greeks {
        self.portfolio.aggregate_greeks()
    }

    pub fn portfolio_value(&self) -> f64 {
        self.portfolio.value(self.config.lot_size)
    }

    pub fn delta_hedge_shares(&self) -> f64 {
        hedge::delta_hedge_shares(&self.portfolio_greeks(), self.config.lot_size)
    }

    pub fn gamma_hedge(&self) -> Option<GammaHedgeSuggestion> {
        hedge::gamma_hedge(&self.portfolio, &self.chain)
    }

    pub fn var_unhedged(&self) -> VaRResult {
        var::compute_var(&self.portfolio, &self.closes(), &self.config)
    }

    pub fn var_hedged(&self) -> VaRResult {
        var::compute_var_hedged(
            &self.portfolio,
            &self.closes(),
            &self.config,
            self.delta_hedge_shares(),
        )
    }

    pub fn shock_pnl(&self) -> Vec<ShockPnl> {
        match self.last_price() {
            Some(last) => scenario::spot_shock_pnl(&self.portfolio, last, &self.config),
            None => Vec::new(),
        }
    }
}
