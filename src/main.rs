use brrts_scraper::service::{scrape_activity, RenderConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dsn = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "271147".to_string());

    let config = RenderConfig::from_env();
    let result = scrape_activity(&config, &dsn).await;

    println!(
        "{}",
        serde_json::to_string_pretty(&result).expect("result record serializes")
    );
}
