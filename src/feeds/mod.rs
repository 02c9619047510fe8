pub mod provider;
pub mod sim;

use crate::config::AppConfig;
use chrono::NaiveDate;

/// One daily close. Series are ordered ascending by date and immutable once
/// fetched.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Fetch the daily series, falling back to the deterministic simulation when
/// the provider fails or returns nothing usable. Never fails: downstream
/// components always receive a well-formed series.
pub async fn load_series(client: &reqwest::Client, config: &AppConfig) -> Vec<PricePoint> {
    let range = (config.engine.start_date, config.engine.end_date);
    match provider::fetch_daily_series(
        client,
        &config.price_api_base_url,
        &config.ticker,
        range.0,
        range.1,
    )
    .await
    {
        Ok(series) => {
            tracing::info!(ticker = %config.ticker, points = series.len(), "price series fetched");
            series
        }
        Err(e) => {
            tracing::warn!(ticker = %config.ticker, error = %e, "price fetch failed, using simulated series");
            sim::simulate_daily_series(&config.ticker, range.0, range.1)
        }
    }
}
