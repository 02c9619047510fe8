//! Deterministic fallback series: geometric Brownian motion over weekdays,
//! seeded from (ticker, date range) so a given request always reproduces the
//! same path. Peripheral by design; it only exists so the engine keeps
//! working when the provider is down.

use crate::feeds::PricePoint;
use chrono::{Datelike, NaiveDate, Weekday};

const ANNUAL_DRIFT: f64 = 0.08;
const ANNUAL_VOL: f64 = 0.25;
const DT: f64 = 1.0 / 252.0;

/// Simulate daily closes for every weekday in [start, end].
pub fn simulate_daily_series(ticker: &str, start: NaiveDate, end: NaiveDate) -> Vec<PricePoint> {
    let seed = fnv1a(format!("{ticker}:{start}:{end}").as_bytes());
    let mut rng = Lcg::new(seed);

    // Initial price in [50, 200), derived from the seed.
    let mut price = 50.0 + 150.0 * rng.next_f64();
    let step = ANNUAL_VOL * DT.sqrt();
    let drift = (ANNUAL_DRIFT - 0.5 * ANNUAL_VOL * ANNUAL_VOL) * DT;

    let mut series = Vec::new();
    let mut date = start;
    while date <= end {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            series.push(PricePoint { date, price });
            price *= (drift + step * rng.next_gaussian()).exp();
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    series
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// 64-bit LCG (Knuth constants) with a Box-Muller gaussian on top.
struct Lcg {
    state: u64,
    spare: Option<f64>,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed,
            spare: None,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform in (0, 1); the top 53 bits, never exactly zero.
    fn next_f64(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 + 1.0) / (1u64 << 53) as f64
    }

    fn next_gaussian(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        let u1 = self.next_f64();
        let u2 = self.next_f64();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * std::f64::consts::PI * u2;
        self.spare = Some(radius * angle.sin());
        radius * angle.cos()
    }
}
