//! Demo 1: Market overview
//!
//! Showcases: public market data endpoints, no credentials needed
//!
//! Run: cargo run --bin market_overview [SYMBOL]

use colored::*;
use mexc_rest::MexcRestClient;
use mexc_types::KlineInterval;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MARKET OVERVIEW - {}", symbol).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = MexcRestClient::new()?;

    if client.ping().await? {
        println!("{} Exchange reachable", "✓".green());
    } else {
        println!("{} Unexpected ping response", "✗".red());
    }

    let time = client.server_time().await?;
    println!("{} Server time: {}", "✓".green(), time.server_time);

    let avg = client.average_price(&symbol).await?;
    println!(
        "{} Average price ({}m window): {}",
        "✓".green(),
        avg.mins,
        avg.price.yellow()
    );

    let book = client.order_book(&symbol, None).await?;
    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        println!(
            "{} Top of book: {} {} / {} {}",
            "✓".green(),
            "BID".yellow(),
            bid,
            "ASK".yellow(),
            ask
        );
    }

    let klines = client
        .klines(&symbol, KlineInterval::Hour1, None, None, Some(500))
        .await?;
    if let Some(last) = klines.last() {
        println!(
            "{} Last hourly candle: O {:?} H {:?} L {:?} C {:?}",
            "✓".green(),
            last.open(),
            last.high(),
            last.low(),
            last.close()
        );
    }

    let trades = client.recent_trades(&symbol, None).await?;
    println!("{} {} recent trades fetched", "✓".green(), trades.len());

    Ok(())
}
