//! Example: Futures signed endpoints (account + listen key).
//!
//! Run with: cargo run --example futures_private

use std::env;

use binance_futures_client::auth::Account;
use binance_futures_client::futures::rest::FuturesRestClient;
use binance_futures_client::types::Params;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let account = match Account::try_from_env() {
        Some(account) => account,
        None => {
            println!("Set BINANCE_API_KEY and BINANCE_API_SECRET to run this example.");
            return Ok(());
        }
    };
    println!("Account {} ({})", account.name(), account);

    let mut builder = FuturesRestClient::builder();
    if env::var("BINANCE_FUTURES_TESTNET").is_ok() {
        builder = builder.use_testnet();
    }
    let client = builder.build();

    println!("=== Balance ===");
    match client.get_account_balance(&account, None).await? {
        Some(balance) => println!("{}: {}", balance.asset, balance.balance),
        None => println!("No {} balance", client.default_asset()),
    }

    println!("\n=== Leverage (BTCUSDT) ===");
    match client.get_leverage(&account, "BTCUSDT").await {
        Ok(leverage) => println!("Leverage: {}x", leverage),
        Err(e) => println!("Leverage unavailable: {}", e),
    }

    println!("\n=== Position Mode ===");
    let dual = client.get_position_mode(&account).await?;
    println!("Hedge mode: {}", dual);

    println!("\n=== Open Orders ===");
    let orders = client.get_open_orders(&account, None).await?;
    println!("Open orders: {}", orders.as_array().map_or(0, Vec::len));

    println!("\n=== Income (last 5 funding fees) ===");
    let income = client
        .get_income_history(
            &account,
            Params::new().with("incomeType", "FUNDING_FEE").with("limit", 5u32),
        )
        .await?;
    println!("{}", income);

    println!("\n=== Listen Key ===");
    let key = client.create_listen_key(&account).await?;
    let prefix: String = key.listen_key.chars().take(8).collect();
    println!("Listen key: {}...", prefix);
    client.extend_listen_key(&account).await?;
    client.close_listen_key(&account).await?;

    Ok(())
}
