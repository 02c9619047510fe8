//! Flat tabular report: labeled sections, each a header line followed by
//! quoted comma-separated rows and a blank-line separator.

use crate::session::Session;

/// Render the full desk report for the current session state. Portfolio
/// sections are emitted only when positions exist.
pub fn render_report(session: &Session) -> String {
    let mut out = String::new();

    summary_section(&mut out, session);
    prices_section(&mut out, session);
    pricing_section(&mut out, session);
    greeks_section(&mut out, session, "Greeks-by-IV", false);
    greeks_section(&mut out, session, "Greeks-by-HistVol", true);

    if !session.portfolio().is_empty() {
        portfolio_section(&mut out, session);
        scenario_section(&mut out, session);
        var_section(&mut out, "VaR Unhedged", session.var_unhedged());
        var_section(&mut out, "VaR Hedged", session.var_hedged());
    }

    out
}

fn section(out: &mut String, title: &str, rows: &[Vec<String>]) {
    out.push_str(title);
    out.push('\n');
    for fields in rows {
        let quoted: Vec<String> = fields.iter().map(|f| format!("\"{f}\"")).collect();
        out.push_str(&quoted.join(","));
        out.push('\n');
    }
    out.push('\n');
}

fn num(v: f64) -> String {
    format!("{v:.4}")
}

fn summary_section(out: &mut String, s: &Session) {
    let stats = s.stats();
    let rows = vec![
        vec!["Metric".into(), "Value".into()],
        vec!["Ticker".into(), s.ticker().into()],
        vec![
            "Last Price".into(),
            s.last_price().map(num).unwrap_or_else(|| "n/a".into()),
        ],
        vec!["Data Points".into(), s.prices().len().to_string()],
        vec![
            "Annualized Volatility".into(),
            num(stats.annualized_volatility),
        ],
        vec!["Skewness".into(), num(stats.skewness)],
        vec!["Excess Kurtosis".into(), num(stats.excess_kurtosis)],
        vec![
            "Risk-Free Rate (%)".into(),
            num(s.config().risk_free_rate_pct),
        ],
        vec!["Lot Size".into(), num(s.config().lot_size)],
    ];
    section(out, "Summary Statistics", &rows);
}

fn prices_section(out: &mut String, s: &Session) {
    let mut rows = vec![vec!["Date".into(), "Close".into()]];
    for p in s.prices() {
        rows.push(vec![p.date.to_string(), num(p.price)]);
    }
    section(out, "Prices", &rows);
}

fn pricing_section(out: &mut String, s: &Session) {
    let mut rows = vec![vec![
        "Id".into(),
        "Type".into(),
        "Strike".into(),
        "Maturity (d)".into(),
        "IV".into(),
        "Price (IV)".into(),
        "Price (HistVol)".into(),
        "D1".into(),
        "D2".into(),
    ]];
    for o in s.chain().contracts() {
        rows.push(vec![
            o.id.clone(),
            o.option_type.to_string(),
            num(o.strike),
            o.maturity_days.to_string(),
            num(o.iv),
            num(o.quote.price),
            num(o.hist_quote.price),
            num(o.quote.d1),
            num(o.quote.d2),
        ]);
    }
    section(out, "Option Pricing", &rows);
}

fn greeks_section(out: &mut String, s: &Session, title: &str, hist: bool) {
    let mut rows = vec![vec![
        "Id".into(),
        "Delta".into(),
        "Gamma".into(),
        "Vega".into(),
        "Theta".into(),
        "Rho".into(),
    ]];
    for o in s.chain().contracts() {
        let g = if hist {
            o.hist_quote.greeks
        } else {
            o.quote.greeks
        };
        rows.push(vec![
            o.id.clone(),
            num(g.delta),
            num(g.gamma),
            num(g.vega),
            num(g.theta),
            num(g.rho),
        ]);
    }
    section(out, title, &rows);
}

fn portfolio_section(out: &mut String, s: &Session) {
    let lot = s.config().lot_size;
    let mut rows = vec![vec![
        "Id".into(),
        "Quantity".into(),
        "Price".into(),
        "Value".into(),
    ]];
    for p in s.portfolio().positions() {
        rows.push(vec![
            p.option.id.clone(),
            p.quantity.to_string(),
            num(p.option.quote.price),
            num(p.quantity as f64 * p.option.quote.price * lot),
        ]);
    }
    rows.push(vec![
        "Total".into(),
        s.portfolio().len().to_string(),
        String::new(),
        num(s.portfolio_value()),
    ]);
    section(out, "Portfolio", &rows);
}

fn scenario_section(out: &mut String, s: &Session) {
    let mut rows = vec![vec![
        "Shock (%)".into(),
        "Spot".into(),
        "Unhedged PnL".into(),
        "Delta-Hedged PnL".into(),
    ]];
    for shock in s.shock_pnl() {
        rows.push(vec![
            num(shock.shock * 100.0),
            num(shock.spot),
            num(shock.unhedged),
            num(shock.hedged),
        ]);
    }
    section(out, "PnL Scenarios", &rows);
}

fn var_section(out: &mut String, title: &str, var: crate::risk::var::VaRResult) {
    let rows = vec![
        vec!["Measure".into(), "Loss".into()],
        vec!["Parametric 95%".into(), num(var.parametric95)],
        vec!["Parametric 99%".into(), num(var.parametric99)],
        vec!["Historical 95%".into(), num(var.historical95)],
        vec!["Historical 99%".into(), num(var.historical99)],
    ];
    section(out, title, &rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::feeds::PricePoint;
    use chrono::NaiveDate;

    fn test_session(with_position: bool) -> Session {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let prices = [100.0, 102.0, 99.0, 101.0, 103.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                date: start + chrono::Days::new(i as u64),
                price,
            })
            .collect();
        let mut s = Session::new(
            "TEST",
            EngineConfig {
                risk_free_rate_pct: 7.0,
                lot_size: 100.0,
                start_date: start,
                end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            },
            prices,
        );
        if with_position {
            assert!(s.upsert_position("100-30-C", 1));
        }
        s
    }

    #[test]
    fn test_sections_without_portfolio() {
        let report = render_report(&test_session(false));
        for title in [
            "Summary Statistics",
            "Prices",
            "Option Pricing",
            "Greeks-by-IV",
            "Greeks-by-HistVol",
        ] {
            assert!(report.contains(&format!("{title}\n")), "missing {title}");
        }
        assert!(!report.contains("Portfolio\n"));
        assert!(!report.contains("VaR Unhedged\n"));
    }

    #[test]
    fn test_sections_with_portfolio() {
        let report = render_report(&test_session(true));
        for title in ["Portfolio", "PnL Scenarios", "VaR Unhedged", "VaR Hedged"] {
            assert!(report.contains(&format!("{title}\n")), "missing {title}");
        }
        assert!(report.contains("\"100-30-C\""));
    }

    #[test]
    fn test_rows_are_quoted_and_sections_separated() {
        let report = render_report(&test_session(false));
        assert!(report.contains("\"Metric\",\"Value\""));
        assert!(report.contains("\"Ticker\",\"TEST\""));
        // Blank line between sections.
        assert!(report.contains("\n\nPrices\n"));
    }
}
