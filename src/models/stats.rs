//! Historical return statistics from a daily close series.

/// Statistics derived from a price series. Recomputed whenever the series or
/// the config changes; never mutated in place.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct HistoricalStats {
    pub log_returns: Vec<f64>,
    pub annualized_volatility: f64,
    pub skewness: f64,
    /// Excess kurtosis (normal distribution = 0).
    pub excess_kurtosis: f64,
}

/// Compute log-return statistics over consecutive closes.
///
/// Fewer than 2 returns, or a flat series (zero standard deviation), yields
/// the all-zero result rather than an error; downstream consumers treat that
/// as "no signal".
///
/// Conventions: sample standard deviation (n-1) annualized by sqrt(252);
/// skewness and kurtosis use population central moments over that sample
/// standard deviation. The mixed convention is the engine's numeric contract.
pub fn compute_stats(prices: &[f64]) -> HistoricalStats {
    let mut log_returns = Vec::with_capacity(prices.len().saturating_sub(1));
    for pair in prices.windows(2) {
        log_returns.push((pair[1] / pair[0]).ln());
    }

    let n = log_returns.len();
    if n < 2 {
        return HistoricalStats::default();
    }
    let nf = n as f64;

    let mean = log_returns.iter().sum::<f64>() / nf;

    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for &r in &log_returns {
        let d = r - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }

    let std_dev = (m2 / (nf - 1.0)).sqrt();
    if std_dev <= 0.0 {
        return HistoricalStats {
            log_returns,
            ..HistoricalStats::default()
        };
    }

    HistoricalStats {
        annualized_volatility: std_dev * 252.0_f64.sqrt(),
        skewness: (m3 / nf) / std_dev.powi(3),
        excess_kurtosis: (m4 / nf) / std_dev.powi(4) - 3.0,
        log_returns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_series_fixture() {
        let stats = compute_stats(&[100.0, 101.0, 102.0, 101.0, 103.0]);
        assert_eq!(stats.log_returns.len(), 4);
        assert!((stats.log_returns[0] - 0.009950330853168092).abs() < 1e-15);
        assert!((stats.annualized_volatility - 0.1964008815762364).abs() < 1e-12);
        assert!((stats.skewness + 0.43165604971267224).abs() < 1e-10);
        assert!((stats.excess_kurtosis + 1.8183000778260003).abs() < 1e-10);
    }

    #[test]
    fn test_too_few_points_is_zero() {
        for prices in [&[][..], &[100.0][..], &[100.0, 101.0][..]] {
            let stats = compute_stats(prices);
            assert_eq!(stats.annualized_volatility, 0.0);
            assert_eq!(stats.skewness, 0.0);
            assert_eq!(stats.excess_kurtosis, 0.0);
        }
    }

    #[test]
    fn test_constant_series_is_zero() {
        // Flat closes: std dev is exactly zero, which must not divide.
        let stats = compute_stats(&[100.0; 10]);
        assert_eq!(stats.log_returns.len(), 9);
        assert_eq!(stats.annualized_volatility, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.excess_kurtosis, 0.0);
    }

    #[test]
    fn test_vol_scales_with_dispersion() {
        let calm = compute_stats(&[100.0, 100.5, 100.2, 100.8, 100.4]);
        let wild = compute_stats(&[100.0, 110.0, 95.0, 112.0, 90.0]);
        assert!(wild.annualized_volatility > calm.annualized_volatility);
    }
}
