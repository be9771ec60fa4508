//! Binance USD-M futures API client.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binance_futures_client::futures::rest::FuturesRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FuturesRestClient::new();
//!     let symbols = client.get_exchange_symbols().await?;
//!     for symbol in symbols.iter().take(5) {
//!         println!("{}: {:?}", symbol.symbol, symbol.contract_type);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! Signed endpoints append a `timestamp` and a `signature` parameter:
//!
//! ```text
//! signature = hex(HMAC-SHA256(query_string, api_secret))
//! ```
//!
//! The raw API key travels separately in the `X-MBX-APIKEY` header. Public
//! endpoints carry the timestamp only.
//!
//! ## API Documentation
//!
//! - REST API: <https://developers.binance.com/docs/derivatives/usds-margined-futures>

pub mod rest;
