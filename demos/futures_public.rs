//! Example: Fetching Binance futures public data.
//!
//! Run with: cargo run --example futures_public

use binance_futures_client::futures::rest::FuturesRestClient;
use futures_util::future::join_all;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = FuturesRestClient::new();

    println!("=== Symbols (first 5) ===");
    let symbols = client.get_exchange_symbols().await?;
    for symbol in symbols.iter().take(5) {
        println!("{}: {:?} {:?}", symbol.symbol, symbol.contract_type, symbol.status);
    }

    println!("\n=== Prices (concurrent) ===");
    let pairs = ["BTCUSDT", "ETHUSDT", "BNBUSDT"];
    let prices = join_all(pairs.iter().map(|s| client.get_symbol_price(s))).await;
    for (symbol, price) in pairs.iter().zip(prices) {
        match price {
            Ok(price) => println!("{}: {}", symbol, price),
            Err(e) => println!("{}: error: {}", symbol, e),
        }
    }

    Ok(())
}
