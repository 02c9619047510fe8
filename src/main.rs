use greekdesk::config::AppConfig;
use greekdesk::export;
use greekdesk::feeds;
use greekdesk::session::Session;

#[tokio::main]
async fn main() {
    // Structured logging to stderr; the report itself goes to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(ticker = %cfg.ticker, start = %cfg.engine.start_date, end = %cfg.engine.end_date, "greekdesk starting");

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(cfg.fetch_timeout_secs))
        .build()
        .unwrap_or_default();

    let prices = feeds::load_series(&client, &cfg).await;
    let session = Session::new(cfg.ticker.clone(), cfg.engine, prices);

    tracing::info!(
        points = session.prices().len(),
        vol = session.stats().annualized_volatility,
        contracts = session.chain().contracts().count(),
        "session ready"
    );

    print!("{}", export::render_report(&session));
}
