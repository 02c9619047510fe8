//! Daily-close history client.
//!
//! The upstream proxy answers
//! `GET {base}?symbol={t}&start={YYYY-MM-DD}&end={YYYY-MM-DD}` with
//!
//! ```json
//! { "status": "ok",
//!   "series": [ { "date": "2025-01-02", "close": 101.5 }, ... ] }
//! ```
//!
//! Fields are deserialized as Options and validated here; rows with missing
//! dates or non-positive closes are dropped rather than propagated.

use crate::errors::{EngineError, EngineResult};
use crate::feeds::PricePoint;
use chrono::NaiveDate;
use reqwest::Client;

#[derive(Debug, serde::Deserialize)]
struct HistoryResponse {
    #[allow(dead_code)]
    status: Option<String>,
    series: Option<Vec<HistoryRow>>,
}

#[derive(Debug, serde::Deserialize)]
struct HistoryRow {
    date: Option<String>,
    close: Option<f64>,
}

pub async fn fetch_daily_series(
    client: &Client,
    base_url: &str,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Vec<PricePoint>> {
    let url = format!(
        "{}?symbol={ticker}&start={start}&end={end}",
        base_url.trim_end_matches('/')
    );

    // Transport failures surface as EngineError::Network, malformed bodies
    // as EngineError::Parse, via the From impls.
    let resp = client.get(&url).send().await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(EngineError::PriceFeed(format!("HTTP {status}: {body}")));
    }

    let body = resp.text().await?;
    let data: HistoryResponse = serde_json::from_str(&body)?;

    let rows = data
        .series
        .ok_or_else(|| EngineError::PriceFeed("no series in response".into()))?;

    let mut series: Vec<PricePoint> = rows.iter().filter_map(parse_row).collect();
    series.sort_by_key(|p| p.date);

    if series.is_empty() {
        return Err(EngineError::PriceFeed("zero usable points".into()));
    }
    Ok(series)
}

fn parse_row(row: &HistoryRow) -> Option<PricePoint> {
    let date = NaiveDate::parse_from_str(row.date.as_deref()?, "%Y-%m-%d").ok()?;
    let price = row.close?;
    if price <= 0.0 || !price.is_finite() {
        return None;
    }
    Some(PricePoint { date, price })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: Option<&str>, close: Option<f64>) -> HistoryRow {
        HistoryRow {
            date: date.map(str::to_string),
            close,
        }
    }

    #[test]
    fn test_decode_failure_maps_to_parse_error() {
        let err = serde_json::from_str::<HistoryResponse>("not json").unwrap_err();
        let e: EngineError = err.into();
        assert!(matches!(e, EngineError::Parse(_)), "got {e}");
    }

    #[test]
    fn test_parse_row_valid() {
        let p = parse_row(&row(Some("2025-03-14"), Some(182.5))).unwrap();
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(p.price, 182.5);
    }

    #[test]
    fn test_parse_row_rejects_bad_rows() {
        assert!(parse_row(&row(None, Some(10.0))).is_none());
        assert!(parse_row(&row(Some("14/03/2025"), Some(10.0))).is_none());
        assert!(parse_row(&row(Some("2025-03-14"), None)).is_none());
        assert!(parse_row(&row(Some("2025-03-14"), Some(0.0))).is_none());
        assert!(parse_row(&row(Some("2025-03-14"), Some(-3.0))).is_none());
        assert!(parse_row(&row(Some("2025-03-14"), Some(f64::NAN))).is_none());
    }
}
