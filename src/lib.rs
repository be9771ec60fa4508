//! # Binance Futures Client
//!
//! An async Rust client library for the Binance USD-M futures REST API.
//!
//! ## Features
//!
//! - Signed requests (HMAC-SHA256) with per-call account selection
//! - Public and signed endpoints distinguished at compile time
//! - Ordered, canonical query encoding shared by signing and transmission
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use binance_futures_client::futures::rest::FuturesRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FuturesRestClient::new();
//!     let price = client.get_symbol_price("BTCUSDT").await?;
//!     println!("BTCUSDT: {}", price);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod futures;
pub mod types;

// Re-export commonly used types at crate root
pub use auth::Account;
pub use error::BinanceError;
pub use types::{MarginType, OrderSide, OrderType, Params, PositionSide, TimeInForce};

/// Result type alias using BinanceError
pub type Result<T> = std::result::Result<T, BinanceError>;
