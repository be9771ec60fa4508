//! Futures REST API client.
//!
//! This module provides the request builder and the REST client for Binance
//! USD-M futures trading.

mod client;
mod endpoints;
mod request;
mod types;

pub use client::{DEFAULT_TIMEOUT, FuturesRestClient, FuturesRestClientBuilder};
pub use endpoints::*;
pub use request::{
    PreparedRequest, RequestBuilder, SIGNATURE_PARAM, TIMESTAMP_PARAM, canonicalize, encode_query,
};
pub use types::{Balance, ExchangeInfoResponse, ListenKey, NewOrderRequest, PositionInfo, SymbolInfo};
