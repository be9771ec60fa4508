//! Binance USD-M futures REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{Account, SystemClock, TimestampProvider};
use crate::error::{ApiError, BinanceError};
use crate::futures::rest::endpoints::{
    API_KEY_HEADER, DEFAULT_ASSET, Endpoint, FUTURES_BASE_URL, FUTURES_TESTNET_URL, Public,
    Signed, public, signed,
};
use crate::futures::rest::request::{PreparedRequest, RequestBuilder};
use crate::futures::rest::types::*;
use crate::types::{MarginType, Params};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The Binance USD-M futures REST API client.
///
/// Construct one client per process and clone it where needed; clones share
/// the same pooled HTTP transport. Signed endpoints take the [`Account`] to
/// act for, so a single client serves any number of accounts.
///
/// No retries are performed: transport failures, timeouts and non-2xx
/// responses are returned to the caller as errors.
///
/// # Example
///
/// ```rust,no_run
/// use binance_futures_client::futures::rest::FuturesRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FuturesRestClient::new();
///
///     let price = client.get_symbol_price("BTCUSDT").await?;
///     println!("BTCUSDT: {}", price);
///
///     Ok(())
/// }
/// ```
///
/// For signed endpoints, pass an account:
///
/// ```rust,no_run
/// use binance_futures_client::auth::Account;
/// use binance_futures_client::futures::rest::FuturesRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let account = Account::new(1, "main", "api_key", "api_secret");
///     let client = FuturesRestClient::new();
///
///     if let Some(balance) = client.get_account_balance(&account, None).await? {
///         println!("{}: {}", balance.asset, balance.balance);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct FuturesRestClient {
    http_client: ClientWithMiddleware,
    requests: RequestBuilder,
    default_asset: String,
}

impl FuturesRestClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> FuturesRestClientBuilder {
        FuturesRestClientBuilder::new()
    }

    /// The request builder used by this client.
    pub fn request_builder(&self) -> &RequestBuilder {
        &self.requests
    }

    /// Asset used by [`get_account_balance`](Self::get_account_balance) when none is given.
    pub fn default_asset(&self) -> &str {
        &self.default_asset
    }

    // HTTP request methods.

    /// Send a request to a public endpoint.
    pub async fn public_request<T>(
        &self,
        endpoint: &Endpoint<Public>,
        params: Params,
    ) -> Result<T, BinanceError>
    where
        T: DeserializeOwned,
    {
        let request = self.requests.public(endpoint, params)?;
        tracing::debug!(method = %request.method(), path = endpoint.path(), "public request");
        self.execute(request).await
    }

    /// Send a signed request on behalf of an account.
    pub async fn signed_request<T>(
        &self,
        endpoint: &Endpoint<Signed>,
        params: Params,
        account: &Account,
    ) -> Result<T, BinanceError>
    where
        T: DeserializeOwned,
    {
        let request = self.requests.signed(endpoint, params, account)?;
        tracing::debug!(
            method = %request.method(),
            path = endpoint.path(),
            account = account.name(),
            fingerprint = %account.fingerprint(),
            "signed request"
        );
        self.execute(request).await
    }

    /// Send a prepared request and decode the JSON response.
    pub async fn execute<T>(&self, request: PreparedRequest) -> Result<T, BinanceError>
    where
        T: DeserializeOwned,
    {
        let mut builder = self
            .http_client
            .request(request.method().clone(), request.url().clone());
        if let Some(api_key) = request.api_key() {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        let response = builder.send().await?;
        self.parse_response(response).await
    }

    /// Parse a response from the Binance API.
    ///
    /// - Success: any 2xx status, body decoded as `T`
    /// - Error: non-2xx status, body usually `{"code": -1121, "msg": "..."}`
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, BinanceError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(error) => BinanceError::Api {
                    status: status.as_u16(),
                    error,
                },
                Err(_) => BinanceError::HttpStatus {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            BinanceError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
        })
    }

    // Public endpoints.

    /// Get the list of tradable symbols from exchange info.
    pub async fn get_exchange_symbols(&self) -> Result<Vec<SymbolInfo>, BinanceError> {
        let response: ExchangeInfoResponse = self
            .public_request(&public::EXCHANGE_INFO, Params::new())
            .await?;
        Ok(response.symbols)
    }

    /// Get the latest price for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The futures symbol (e.g., "BTCUSDT")
    pub async fn get_symbol_price(&self, symbol: &str) -> Result<f64, BinanceError> {
        let response: SymbolPrice = self
            .public_request(&public::TICKER_PRICE, Params::new().with("symbol", symbol))
            .await?;
        response.as_f64().ok_or_else(|| {
            BinanceError::InvalidResponse(format!("Invalid price: {}", response.price))
        })
    }

    // Signed endpoints: user data stream.

    /// Start a user data stream and return its listen key.
    pub async fn create_listen_key(&self, account: &Account) -> Result<ListenKey, BinanceError> {
        self.signed_request(&signed::LISTEN_KEY_CREATE, Params::new(), account)
            .await
    }

    /// Extend the current listen key's validity.
    pub async fn extend_listen_key(&self, account: &Account) -> Result<Value, BinanceError> {
        self.signed_request(&signed::LISTEN_KEY_EXTEND, Params::new(), account)
            .await
    }

    /// Close the user data stream.
    pub async fn close_listen_key(&self, account: &Account) -> Result<Value, BinanceError> {
        self.signed_request(&signed::LISTEN_KEY_CLOSE, Params::new(), account)
            .await
    }

    // Signed endpoints: account.

    /// Get the balance entry for one asset.
    ///
    /// Returns `None` when the account has no entry for the asset.
    ///
    /// # Arguments
    ///
    /// * `asset` - Asset code; the client's default asset when `None`
    pub async fn get_account_balance(
        &self,
        account: &Account,
        asset: Option<&str>,
    ) -> Result<Option<Balance>, BinanceError> {
        let asset = asset.unwrap_or(&self.default_asset);
        let balances: Vec<Balance> = self
            .signed_request(&signed::BALANCE, Params::new(), account)
            .await?;
        Ok(balances.into_iter().find(|b| b.asset == asset))
    }

    /// Get full account information (assets, positions, margin).
    pub async fn get_account_info(&self, account: &Account) -> Result<Value, BinanceError> {
        self.signed_request(&signed::ACCOUNT, Params::new(), account)
            .await
    }

    /// Get the current leverage for a symbol.
    ///
    /// Unlike [`get_account_balance`](Self::get_account_balance), a missing
    /// entry is an error: [`BinanceError::PositionNotFound`].
    pub async fn get_leverage(&self, account: &Account, symbol: &str) -> Result<u32, BinanceError> {
        let info: AccountPositions = self
            .signed_request(&signed::ACCOUNT, Params::new(), account)
            .await?;
        info.positions
            .into_iter()
            .find(|p| p.symbol == symbol)
            .map(|p| p.leverage)
            .ok_or_else(|| BinanceError::PositionNotFound {
                symbol: symbol.to_string(),
            })
    }

    /// Change the initial leverage for a symbol.
    pub async fn set_leverage(
        &self,
        account: &Account,
        symbol: &str,
        leverage: u32,
    ) -> Result<Value, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("leverage", leverage);
        self.signed_request(&signed::LEVERAGE, params, account).await
    }

    /// Query whether hedge mode (dual side position) is enabled.
    pub async fn get_position_mode(&self, account: &Account) -> Result<bool, BinanceError> {
        let response: PositionModeResponse = self
            .signed_request(&signed::POSITION_MODE_GET, Params::new(), account)
            .await?;
        Ok(response.dual_side_position)
    }

    /// Enable (`true`) or disable (`false`) hedge mode.
    pub async fn set_position_mode(
        &self,
        account: &Account,
        dual_side_position: bool,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("dualSidePosition", dual_side_position);
        self.signed_request(&signed::POSITION_MODE_SET, params, account)
            .await
    }

    /// Change the margin type for a symbol.
    pub async fn set_margin_type(
        &self,
        account: &Account,
        symbol: &str,
        margin_type: MarginType,
    ) -> Result<Value, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("marginType", margin_type);
        self.signed_request(&signed::MARGIN_TYPE, params, account)
            .await
    }

    /// Add (positive amount) or reduce (negative amount) isolated position margin.
    ///
    /// A zero amount (including `-0`) is rejected with
    /// [`BinanceError::InvalidParameter`] and nothing is sent.
    pub async fn modify_isolated_margin(
        &self,
        account: &Account,
        symbol: &str,
        amount: Decimal,
    ) -> Result<Value, BinanceError> {
        if amount.is_zero() {
            return Err(BinanceError::InvalidParameter(format!(
                "margin adjustment for {symbol} must be non-zero"
            )));
        }
        let margin_type: u32 = if amount.is_sign_negative() { 2 } else { 1 };
        let params = Params::new()
            .with("symbol", symbol)
            .with("amount", amount.abs())
            .with("type", margin_type);
        self.signed_request(&signed::POSITION_MARGIN, params, account)
            .await
    }

    /// Get income history; filters (symbol, incomeType, startTime, ...) pass through.
    pub async fn get_income_history(
        &self,
        account: &Account,
        filters: Params,
    ) -> Result<Value, BinanceError> {
        self.signed_request(&signed::INCOME, filters, account).await
    }

    // Signed endpoints: trading.

    /// Place a new order.
    ///
    /// Accepts raw [`Params`] or a [`NewOrderRequest`].
    pub async fn new_order(
        &self,
        account: &Account,
        order: impl Into<Params>,
    ) -> Result<Value, BinanceError> {
        self.signed_request(&signed::ORDER_NEW, order.into(), account)
            .await
    }

    /// Cancel an order by exchange order id.
    pub async fn cancel_order(
        &self,
        account: &Account,
        symbol: &str,
        order_id: u64,
    ) -> Result<Value, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("orderId", order_id);
        self.signed_request(&signed::ORDER_CANCEL, params, account)
            .await
    }

    /// Cancel all open orders for a symbol.
    pub async fn cancel_all_orders(
        &self,
        account: &Account,
        symbol: &str,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with("symbol", symbol);
        self.signed_request(&signed::ALL_OPEN_ORDERS_CANCEL, params, account)
            .await
    }

    /// Cancel several orders for a symbol in one request.
    pub async fn cancel_multiple_orders(
        &self,
        account: &Account,
        symbol: &str,
        order_ids: &[u64],
    ) -> Result<Value, BinanceError> {
        let params = Params::new()
            .with("symbol", symbol)
            .with("orderIdList", serde_json::to_string(order_ids)?);
        self.signed_request(&signed::BATCH_ORDERS_CANCEL, params, account)
            .await
    }

    /// Get all orders; filters (symbol, orderId, startTime, limit, ...) pass through.
    pub async fn get_all_orders(
        &self,
        account: &Account,
        filters: Params,
    ) -> Result<Value, BinanceError> {
        self.signed_request(&signed::ALL_ORDERS, filters, account)
            .await
    }

    /// Get open orders, for one symbol or for all symbols.
    pub async fn get_open_orders(
        &self,
        account: &Account,
        symbol: Option<&str>,
    ) -> Result<Value, BinanceError> {
        let params = Params::new().with_opt("symbol", symbol);
        self.signed_request(&signed::OPEN_ORDERS, params, account)
            .await
    }
}

impl Default for FuturesRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FuturesRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuturesRestClient")
            .field("base_url", &self.requests.base_url())
            .field("default_asset", &self.default_asset)
            .finish()
    }
}

/// Builder for [`FuturesRestClient`].
pub struct FuturesRestClientBuilder {
    base_url: String,
    http_client: Option<reqwest::Client>,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
    user_agent: Option<String>,
    timeout: Duration,
    default_asset: String,
}

impl FuturesRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: FUTURES_BASE_URL.to_string(),
            http_client: None,
            timestamp_provider: None,
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            default_asset: DEFAULT_ASSET.to_string(),
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use the testnet environment.
    pub fn use_testnet(mut self) -> Self {
        self.base_url = FUTURES_TESTNET_URL.to_string();
        self
    }

    /// Use an existing HTTP client instead of building one.
    ///
    /// `timeout` and `user_agent` are ignored when this is set; configure them
    /// on the supplied client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the asset used by balance lookups when none is given.
    pub fn default_asset(mut self, asset: impl Into<String>) -> Self {
        self.default_asset = asset.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> FuturesRestClient {
        let reqwest_client = match self.http_client {
            Some(client) => client,
            None => {
                // Build default headers.
                let mut headers = HeaderMap::new();
                let user_agent = self.user_agent.unwrap_or_else(|| {
                    format!("binance-futures-client/{}", env!("CARGO_PKG_VERSION"))
                });
                let header_value = HeaderValue::from_str(&user_agent)
                    .unwrap_or_else(|_| HeaderValue::from_static("binance-futures-client"));
                headers.insert(USER_AGENT, header_value);

                reqwest::Client::builder()
                    .default_headers(headers)
                    .timeout(self.timeout)
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new())
            }
        };

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let clock = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(SystemClock::new()));

        FuturesRestClient {
            http_client: client,
            requests: RequestBuilder::new(self.base_url, clock),
            default_asset: self.default_asset,
        }
    }
}

impl Default for FuturesRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
