//! Demo 2: Account balances
//!
//! Showcases: signed account query
//!
//! Requires MEXC_API_KEY and MEXC_API_SECRET in the environment.
//!
//! Run: cargo run --bin account_balances

use colored::*;
use mexc_rest::{Credentials, MexcRestClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT BALANCES".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let creds = Credentials::from_env()?;
    let client = MexcRestClient::with_credentials(creds)?;

    let account = client.account_info().await?;
    println!(
        "{} Account type: {}",
        "✓".green(),
        account.account_type.as_deref().unwrap_or("unknown")
    );
    println!(
        "{} Trading {} / withdrawals {}",
        "✓".green(),
        if account.can_trade { "enabled".green() } else { "disabled".red() },
        if account.can_withdraw { "enabled".green() } else { "disabled".red() },
    );
    println!();

    let mut shown = 0;
    for balance in &account.balances {
        let free = balance.free().unwrap_or_default();
        let locked = balance.locked().unwrap_or_default();
        if free.is_zero() && locked.is_zero() {
            continue;
        }

        println!(
            "  {:<8} free {:>18}  locked {:>18}",
            balance.asset.yellow(),
            free,
            locked
        );
        shown += 1;
    }

    if shown == 0 {
        println!("  {}", "No non-zero balances".dimmed());
    }

    Ok(())
}
