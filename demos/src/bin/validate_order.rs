//! Demo 3: Order validation
//!
//! Showcases: the signed test-order endpoint; nothing is executed.
//!
//! Requires MEXC_API_KEY and MEXC_API_SECRET in the environment.
//!
//! Run: cargo run --bin validate_order -- BTCUSDT 0.001 30000

use chrono::Utc;
use colored::*;
use mexc_rest::{Credentials, MexcRestClient, OrderRequest};
use mexc_types::OrderSide;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "BTCUSDT".to_string());
    let quantity = args.next().unwrap_or_else(|| "0.001".to_string());
    let price = args.next().unwrap_or_else(|| "30000".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ORDER VALIDATION (test endpoint)".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let creds = Credentials::from_env()?;
    let client = MexcRestClient::with_credentials(creds)?;

    let order = OrderRequest::limit(symbol.as_str(), OrderSide::Buy, quantity.as_str(), price.as_str())
        .with_client_order_id(format!("demo-{}", Utc::now().timestamp()));

    println!(
        "  {} {} {} @ {}",
        "BUY".green().bold(),
        quantity,
        symbol.yellow(),
        price
    );

    let timestamp = Utc::now().timestamp() as u64;
    let echo = client.place_order_test(&order, timestamp).await?;

    println!();
    println!("{} Order accepted by validation: {}", "✓".green(), echo);
    Ok(())
}
