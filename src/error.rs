//! Error types for the Binance futures client library.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for all client operations.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP request failed (connection error, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Query string encoding error
    #[error("Query encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// Binance API returned an error body
    #[error("Binance API error (HTTP {status}): {error}")]
    Api {
        /// HTTP status of the response
        status: u16,
        /// Error reported by the exchange
        error: ApiError,
    },

    /// Non-success HTTP status without a recognizable error body
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status of the response
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The account has no position entry for the requested symbol
    #[error("Cannot get leverage: no position found for symbol {symbol}")]
    PositionNotFound {
        /// Symbol that was looked up
        symbol: String,
    },

    /// A parameter was rejected before any request was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl BinanceError {
    /// Returns the exchange error if this is an API error.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            BinanceError::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Check if the underlying transport reported a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            BinanceError::Http(e) => e.is_timeout(),
            BinanceError::HttpMiddleware(reqwest_middleware::Error::Reqwest(e)) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Error object returned by Binance in the response body.
///
/// Binance reports failures as `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    /// Numeric error code (negative for request errors)
    pub code: i64,
    /// Human-readable error message
    pub msg: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }

    /// Check if the request was rejected for an invalid signature.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == error_codes::INVALID_SIGNATURE
    }

    /// Check if the request timestamp fell outside the receive window.
    pub fn is_timestamp_rejected(&self) -> bool {
        self.code == error_codes::INVALID_TIMESTAMP
    }

    /// Check if the API key was rejected.
    pub fn is_invalid_key(&self) -> bool {
        self.code == error_codes::REJECTED_MBX_KEY || self.code == error_codes::API_KEY_FORMAT
    }

    /// Check if the referenced order does not exist.
    pub fn is_unknown_order(&self) -> bool {
        self.code == error_codes::UNKNOWN_ORDER || self.code == error_codes::NO_SUCH_ORDER
    }

    /// Check if a margin type or position mode change was a no-op.
    ///
    /// Binance rejects setting a value that is already in effect.
    pub fn is_no_change_needed(&self) -> bool {
        self.code == error_codes::NO_NEED_TO_CHANGE_MARGIN_TYPE
            || self.code == error_codes::NO_NEED_TO_CHANGE_POSITION_SIDE
    }
}

/// Known Binance futures error codes.
pub mod error_codes {
    pub const UNKNOWN: i64 = -1000;
    pub const TOO_MANY_REQUESTS: i64 = -1003;
    pub const INVALID_TIMESTAMP: i64 = -1021;
    pub const INVALID_SIGNATURE: i64 = -1022;
    pub const BAD_SYMBOL: i64 = -1121;
    pub const NO_SUCH_ORDER: i64 = -2013;
    pub const API_KEY_FORMAT: i64 = -2014;
    pub const REJECTED_MBX_KEY: i64 = -2015;
    pub const UNKNOWN_ORDER: i64 = -2011;
    pub const NO_NEED_TO_CHANGE_MARGIN_TYPE: i64 = -4046;
    pub const NO_NEED_TO_CHANGE_POSITION_SIDE: i64 = -4059;
}
