//! Futures REST API endpoint declarations.
//!
//! Each endpoint states its HTTP verb, path, and whether it is signed. The
//! authentication requirement is part of the type, so a public endpoint cannot
//! be sent with credentials and a signed endpoint cannot be sent without them.

use std::marker::PhantomData;

use reqwest::Method;

/// Base URL for Binance USD-M futures production API.
pub const FUTURES_BASE_URL: &str = "https://fapi.binance.com";

/// Base URL for Binance USD-M futures testnet API.
pub const FUTURES_TESTNET_URL: &str = "https://testnet.binancefuture.com";

/// Asset used by balance lookups when the caller does not name one.
pub const DEFAULT_ASSET: &str = "USDT";

/// Header carrying the raw API key on signed requests.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Marker for endpoints that require no credentials.
#[derive(Debug, Clone, Copy)]
pub struct Public;

/// Marker for endpoints that require a signature and API key header.
#[derive(Debug, Clone, Copy)]
pub struct Signed;

/// A REST endpoint: verb, path and authentication requirement.
#[derive(Debug, Clone)]
pub struct Endpoint<A> {
    method: Method,
    path: &'static str,
    auth: PhantomData<fn() -> A>,
}

impl<A> Endpoint<A> {
    /// Declare an endpoint.
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            auth: PhantomData,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

/// Public endpoints (no authentication required).
pub mod public {
    use super::*;

    /// Exchange trading rules and symbol information.
    pub const EXCHANGE_INFO: Endpoint<Public> = Endpoint::new(Method::GET, "/fapi/v1/exchangeInfo");

    /// Latest price for a symbol.
    pub const TICKER_PRICE: Endpoint<Public> = Endpoint::new(Method::GET, "/fapi/v1/ticker/price");
}

/// Signed endpoints (API key and signature required).
pub mod signed {
    use super::*;

    /// Start a user data stream.
    pub const LISTEN_KEY_CREATE: Endpoint<Signed> =
        Endpoint::new(Method::POST, "/fapi/v1/listenKey");

    /// Keep a user data stream alive.
    pub const LISTEN_KEY_EXTEND: Endpoint<Signed> =
        Endpoint::new(Method::PUT, "/fapi/v1/listenKey");

    /// Close a user data stream.
    pub const LISTEN_KEY_CLOSE: Endpoint<Signed> =
        Endpoint::new(Method::DELETE, "/fapi/v1/listenKey");

    /// Futures account balances.
    pub const BALANCE: Endpoint<Signed> = Endpoint::new(Method::GET, "/fapi/v2/balance");

    /// Account information including positions.
    pub const ACCOUNT: Endpoint<Signed> = Endpoint::new(Method::GET, "/fapi/v2/account");

    /// Place a new order.
    pub const ORDER_NEW: Endpoint<Signed> = Endpoint::new(Method::POST, "/fapi/v1/order");

    /// Cancel an order.
    pub const ORDER_CANCEL: Endpoint<Signed> = Endpoint::new(Method::DELETE, "/fapi/v1/order");

    /// Cancel all open orders for a symbol.
    pub const ALL_OPEN_ORDERS_CANCEL: Endpoint<Signed> =
        Endpoint::new(Method::DELETE, "/fapi/v1/allOpenOrders");

    /// Cancel multiple orders for a symbol.
    pub const BATCH_ORDERS_CANCEL: Endpoint<Signed> =
        Endpoint::new(Method::DELETE, "/fapi/v1/batchOrders");

    /// Change initial leverage for a symbol.
    pub const LEVERAGE: Endpoint<Signed> = Endpoint::new(Method::POST, "/fapi/v1/leverage");

    /// Change margin type for a symbol.
    pub const MARGIN_TYPE: Endpoint<Signed> = Endpoint::new(Method::POST, "/fapi/v1/marginType");

    /// Add or reduce isolated position margin.
    pub const POSITION_MARGIN: Endpoint<Signed> =
        Endpoint::new(Method::POST, "/fapi/v1/positionMargin");

    /// Query the current position mode.
    pub const POSITION_MODE_GET: Endpoint<Signed> =
        Endpoint::new(Method::GET, "/fapi/v1/positionSide/dual");

    /// Change the position mode (hedge or one-way).
    pub const POSITION_MODE_SET: Endpoint<Signed> =
        Endpoint::new(Method::POST, "/fapi/v1/positionSide/dual");

    /// Income history.
    pub const INCOME: Endpoint<Signed> = Endpoint::new(Method::GET, "/fapi/v1/income");

    /// All orders (active, cancelled, filled).
    pub const ALL_ORDERS: Endpoint<Signed> = Endpoint::new(Method::GET, "/fapi/v1/allOrders");

    /// Current open orders.
    pub const OPEN_ORDERS: Endpoint<Signed> = Endpoint::new(Method::GET, "/fapi/v1/openOrders");
}
