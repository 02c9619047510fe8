use crate::errors::{EngineError, EngineResult};
use chrono::NaiveDate;

/// Session-level engine configuration. Immutable snapshot: a change is applied
/// atomically by handing a whole new value to the session, which then
/// recomputes stats, chain and every derived risk figure from scratch.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EngineConfig {
    /// Annualized risk-free rate as a percentage (7.0 = 7%).
    pub risk_free_rate_pct: f64,
    /// Shares per option contract.
    pub lot_size: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl EngineConfig {
    /// Risk-free rate as a decimal, the form the pricer consumes.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.risk_free_rate_pct / 100.0
    }
}

/// Process-level configuration from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ticker: String,
    pub price_api_base_url: String,
    pub fetch_timeout_secs: u64,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();

        let risk_free_rate_pct = env_var_or("RISK_FREE_RATE_PCT", "7.0")
            .parse::<f64>()
            .map_err(|e| EngineError::Config(format!("RISK_FREE_RATE_PCT: {e}")))?;

        let lot_size = env_var_or("LOT_SIZE", "100")
            .parse::<f64>()
            .map_err(|e| EngineError::Config(format!("LOT_SIZE: {e}")))?;

        let fetch_timeout_secs = env_var_or("FETCH_TIMEOUT_SECS", "5")
            .parse::<u64>()
            .map_err(|e| EngineError::Config(format!("FETCH_TIMEOUT_SECS: {e}")))?;

        let start_date = parse_date("START_DATE", &env_var_or("START_DATE", "2025-01-01"))?;
        let end_date = parse_date("END_DATE", &env_var_or("END_DATE", "2025-06-30"))?;
        if end_date < start_date {
            return Err(EngineError::Config(format!(
                "END_DATE {end_date} precedes START_DATE {start_date}"
            )));
        }

        Ok(Self {
            ticker: env_var_or("TICKER", "NIFTY"),
            price_api_base_url: env_var_or(
                "PRICE_API_BASE_URL",
                "http://localhost:8787/api/history",
            ),
            fetch_timeout_secs,
            engine: EngineConfig {
                risk_free_rate_pct,
                lot_size,
                start_date,
                end_date,
            },
        })
    }
}

fn parse_date(key: &str, raw: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| EngineError::Config(format!("{key}: {e}")))
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_is_decimal() {
        let cfg = EngineConfig {
            risk_free_rate_pct: 7.0,
            lot_size: 100.0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        };
        assert!((cfg.rate() - 0.07).abs() < 1e-12);
    }
}
