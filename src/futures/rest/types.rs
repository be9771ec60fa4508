//! Request and response types for the futures REST API.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::types::{OrderSide, OrderType, Params, PositionSide, TimeInForce};

// Response shapes

/// Response for the listen key endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListenKey {
    /// Token identifying the user data stream
    #[serde(rename = "listenKey")]
    pub listen_key: String,
}

/// Response for the exchange info endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfoResponse {
    /// Exchange timezone
    pub timezone: Option<String>,
    /// Server time in milliseconds
    #[serde(rename = "serverTime")]
    pub server_time: Option<i64>,
    /// Tradable symbols
    pub symbols: Vec<SymbolInfo>,
}

/// A tradable futures symbol.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    /// Symbol name (e.g. "BTCUSDT")
    pub symbol: String,
    /// Underlying pair
    pub pair: Option<String>,
    /// Contract type (e.g. "PERPETUAL")
    pub contract_type: Option<String>,
    /// Trading status (e.g. "TRADING")
    pub status: Option<String>,
    /// Base asset
    pub base_asset: Option<String>,
    /// Quote asset
    pub quote_asset: Option<String>,
    /// Margin asset
    pub margin_asset: Option<String>,
    /// Price precision
    pub price_precision: Option<u32>,
    /// Quantity precision
    pub quantity_precision: Option<u32>,
    /// Symbol filters (price, lot size, ...)
    #[serde(default)]
    pub filters: Vec<serde_json::Value>,
}

/// A single asset balance from the balance endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Unique account alias
    pub account_alias: Option<String>,
    /// Asset code (e.g. "USDT")
    pub asset: String,
    /// Wallet balance
    pub balance: Decimal,
    /// Cross wallet balance
    pub cross_wallet_balance: Option<Decimal>,
    /// Unrealized PnL of crossed positions
    pub cross_un_pnl: Option<Decimal>,
    /// Available balance
    pub available_balance: Option<Decimal>,
    /// Maximum amount for transfer out
    pub max_withdraw_amount: Option<Decimal>,
    /// Whether the asset can be used as margin in multi-assets mode
    pub margin_available: Option<bool>,
    /// Last update time
    pub update_time: Option<i64>,
}

/// Response for the ticker price endpoint.
///
/// Binance sends the price as a string; a bare JSON number is accepted too.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SymbolPrice {
    pub price: serde_json::Value,
}

impl SymbolPrice {
    /// The price as a float, from either a string or a number.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.price {
            serde_json::Value::String(s) => s.trim().parse().ok(),
            serde_json::Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

/// Account information, narrowed to the position list.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountPositions {
    pub positions: Vec<PositionInfo>,
}

/// A position entry from the account endpoint.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInfo {
    /// Symbol name
    pub symbol: String,
    /// Current initial leverage
    #[serde_as(as = "DisplayFromStr")]
    pub leverage: u32,
    /// Whether the position is isolated
    pub isolated: Option<bool>,
    /// Position side
    pub position_side: Option<PositionSide>,
    /// Position amount
    pub position_amt: Option<Decimal>,
    /// Average entry price
    pub entry_price: Option<Decimal>,
    /// Unrealized profit
    pub unrealized_profit: Option<Decimal>,
}

/// Response for the position mode endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PositionModeResponse {
    #[serde(rename = "dualSidePosition")]
    pub dual_side_position: bool,
}

// Requests

/// Parameters for placing a new order.
///
/// ```rust
/// use binance_futures_client::futures::rest::NewOrderRequest;
/// use binance_futures_client::types::{OrderSide, TimeInForce};
/// use rust_decimal::Decimal;
///
/// let request = NewOrderRequest::limit(
///     "BTCUSDT",
///     OrderSide::Buy,
///     Decimal::new(1, 3),
///     Decimal::new(50000, 0),
/// )
/// .time_in_force(TimeInForce::Gtc)
/// .reduce_only(true);
/// ```
#[derive(Debug, Clone)]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
    pub reduce_only: Option<bool>,
    pub position_side: Option<PositionSide>,
    pub new_client_order_id: Option<String>,
}

impl NewOrderRequest {
    /// Create an order request of any type.
    pub fn new(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity: None,
            price: None,
            stop_price: None,
            time_in_force: None,
            reduce_only: None,
            position_side: None,
            new_client_order_id: None,
        }
    }

    /// Market order for a quantity.
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::new(symbol, side, OrderType::Market).quantity(quantity)
    }

    /// Limit order for a quantity at a price; defaults to GTC.
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::new(symbol, side, OrderType::Limit)
            .quantity(quantity)
            .price(price)
            .time_in_force(TimeInForce::Gtc)
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = Some(reduce_only);
        self
    }

    pub fn position_side(mut self, side: PositionSide) -> Self {
        self.position_side = Some(side);
        self
    }

    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }
}

impl From<NewOrderRequest> for Params {
    fn from(req: NewOrderRequest) -> Self {
        Params::new()
            .with("symbol", req.symbol)
            .with("side", req.side)
            .with_opt("positionSide", req.position_side)
            .with("type", req.order_type)
            .with_opt("timeInForce", req.time_in_force)
            .with_opt("quantity", req.quantity)
            .with_opt("reduceOnly", req.reduce_only)
            .with_opt("price", req.price)
            .with_opt("stopPrice", req.stop_price)
            .with_opt("newClientOrderId", req.new_client_order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_deserialize_string_decimals() {
        let json = r#"{
            "accountAlias": "SgsR",
            "asset": "USDT",
            "balance": "122607.35137903",
            "crossWalletBalance": "23.72469206",
            "crossUnPnl": "0.00000000",
            "availableBalance": "23.72469206",
            "maxWithdrawAmount": "23.72469206",
            "marginAvailable": true,
            "updateTime": 1617939110373
        }"#;
        let balance: Balance = serde_json::from_str(json).unwrap();
        assert_eq!(balance.asset, "USDT");
        assert_eq!(balance.balance, "122607.35137903".parse::<Decimal>().unwrap());
        assert_eq!(balance.margin_available, Some(true));
    }

    #[test]
    fn test_position_leverage_from_string() {
        let json = r#"{"symbol":"BTCUSDT","leverage":"20","isolated":false,"positionSide":"BOTH"}"#;
        let position: PositionInfo = serde_json::from_str(json).unwrap();
        assert_eq!(position.leverage, 20);
        assert_eq!(position.position_side, Some(PositionSide::Both));
    }

    #[test]
    fn test_symbol_price_string_or_number() {
        let from_str: SymbolPrice = serde_json::from_str(r#"{"price":"12345.60"}"#).unwrap();
        let from_num: SymbolPrice = serde_json::from_str(r#"{"price":12345.6}"#).unwrap();
        let garbage: SymbolPrice = serde_json::from_str(r#"{"price":"n/a"}"#).unwrap();
        let null: SymbolPrice = serde_json::from_str(r#"{"price":null}"#).unwrap();
        assert!((from_str.as_f64().unwrap() - 12345.6).abs() < 1e-9);
        assert!((from_num.as_f64().unwrap() - 12345.6).abs() < 1e-9);
        assert!(garbage.as_f64().is_none());
        assert!(null.as_f64().is_none());
    }

    #[test]
    fn test_symbol_info_minimal() {
        let info: SymbolInfo = serde_json::from_str(r#"{"symbol":"ETHUSDT"}"#).unwrap();
        assert_eq!(info.symbol, "ETHUSDT");
        assert!(info.filters.is_empty());
    }

    #[test]
    fn test_new_order_into_params() {
        let params: Params = NewOrderRequest::limit(
            "BTCUSDT",
            OrderSide::Sell,
            "0.010".parse().unwrap(),
            "65000.5".parse().unwrap(),
        )
        .reduce_only(false)
        .client_order_id("abc")
        .into();

        let pairs: Vec<(&str, String)> = params.iter().map(|(k, v)| (k, v.canonical())).collect();
        assert_eq!(
            pairs,
            vec![
                ("symbol", "BTCUSDT".to_string()),
                ("side", "SELL".to_string()),
                ("type", "LIMIT".to_string()),
                ("timeInForce", "GTC".to_string()),
                ("quantity", "0.01".to_string()),
                ("reduceOnly", "false".to_string()),
                ("price", "65000.5".to_string()),
                ("newClientOrderId", "abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_market_order_has_no_price() {
        let params: Params =
            NewOrderRequest::market("BTCUSDT", OrderSide::Buy, Decimal::ONE).into();
        assert!(params.get("price").is_none());
        assert!(params.get("timeInForce").is_none());
        assert_eq!(params.get("type").unwrap().canonical(), "MARKET");
    }
}
