//! Request construction: parameter canonicalization, signing and URL assembly.
//!
//! The pipeline for every call is:
//!
//! ```text
//! params -> booleans as "true"/"false" -> append timestamp
//!        -> encode query -> (signed only) HMAC over that exact query -> append signature
//! ```
//!
//! The query string produced here is the one transmitted; nothing re-encodes
//! it after signing.

use std::sync::Arc;

use reqwest::Method;
use url::Url;

use crate::auth::{Account, TimestampProvider, sign_query};
use crate::error::BinanceError;
use crate::futures::rest::endpoints::{Endpoint, Public, Signed};
use crate::types::Params;

/// Name of the injected timestamp parameter.
pub const TIMESTAMP_PARAM: &str = "timestamp";

/// Name of the injected signature parameter.
pub const SIGNATURE_PARAM: &str = "signature";

/// Convert parameters to their wire strings and append the timestamp.
///
/// Caller parameters keep their order. Any caller-supplied `timestamp` or
/// `signature` is dropped; both are always produced by this pipeline.
pub fn canonicalize(params: Params, timestamp_ms: u64) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .filter(|(name, _)| name != TIMESTAMP_PARAM && name != SIGNATURE_PARAM)
        .map(|(name, value)| (name, value.canonical()))
        .collect();
    pairs.push((TIMESTAMP_PARAM.to_string(), timestamp_ms.to_string()));
    pairs
}

/// Encode canonical pairs as `application/x-www-form-urlencoded`, in order.
pub fn encode_query(pairs: &[(String, String)]) -> Result<String, BinanceError> {
    Ok(serde_urlencoded::to_string(pairs)?)
}

/// A fully built request, ready for the transport.
///
/// No network I/O has happened yet.
#[derive(Clone)]
pub struct PreparedRequest {
    method: Method,
    url: Url,
    api_key: Option<String>,
}

impl PreparedRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The encoded query string exactly as it will be sent.
    pub fn query(&self) -> &str {
        self.url.query().unwrap_or_default()
    }

    /// Value for the API key header, present only on signed requests.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_signed(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look up a decoded query parameter.
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

impl std::fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Builds [`PreparedRequest`]s against a fixed base URL.
#[derive(Clone)]
pub struct RequestBuilder {
    base_url: String,
    clock: Arc<dyn TimestampProvider>,
}

impl RequestBuilder {
    /// Create a request builder for a base URL (e.g. `https://fapi.binance.com`).
    pub fn new(base_url: impl Into<String>, clock: Arc<dyn TimestampProvider>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            clock,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an unauthenticated request: timestamp, no signature, no key header.
    pub fn public(
        &self,
        endpoint: &Endpoint<Public>,
        params: Params,
    ) -> Result<PreparedRequest, BinanceError> {
        let pairs = canonicalize(params, self.clock.timestamp_ms());
        let query = encode_query(&pairs)?;
        self.assemble(endpoint.method(), endpoint.path(), &query, None)
    }

    /// Build a signed request for an account.
    ///
    /// The signature covers the encoded query string verbatim and is appended
    /// as the final parameter.
    pub fn signed(
        &self,
        endpoint: &Endpoint<Signed>,
        params: Params,
        account: &Account,
    ) -> Result<PreparedRequest, BinanceError> {
        let pairs = canonicalize(params, self.clock.timestamp_ms());
        let query = encode_query(&pairs)?;
        let signature = sign_query(account, &query)?;
        // Hex digits need no escaping, so appending keeps the signed prefix intact.
        let query = format!("{query}&{SIGNATURE_PARAM}={signature}");
        self.assemble(
            endpoint.method(),
            endpoint.path(),
            &query,
            Some(account.api_key().to_string()),
        )
    }

    fn assemble(
        &self,
        method: &Method,
        path: &str,
        query: &str,
        api_key: Option<String>,
    ) -> Result<PreparedRequest, BinanceError> {
        let url = Url::parse(&format!("{}{}?{}", self.base_url, path, query))?;
        Ok(PreparedRequest {
            method: method.clone(),
            url,
            api_key,
        })
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SystemClock;
    use crate::futures::rest::endpoints::{public, signed};

    struct FixedClock(u64);

    impl TimestampProvider for FixedClock {
        fn timestamp_ms(&self) -> u64 {
            self.0
        }
    }

    fn builder(ts: u64) -> RequestBuilder {
        RequestBuilder::new("https://fapi.binance.com", Arc::new(FixedClock(ts)))
    }

    fn account() -> Account {
        Account::new(1, "a", "test_key", "test_secret")
    }

    #[test]
    fn test_canonicalize_booleans() {
        let params = Params::new()
            .with("reduceOnly", true)
            .with("closePosition", false)
            .with("symbol", "BTCUSDT");
        let pairs = canonicalize(params, 1);
        assert_eq!(pairs[0], ("reduceOnly".to_string(), "true".to_string()));
        assert_eq!(pairs[1], ("closePosition".to_string(), "false".to_string()));
        assert_eq!(pairs[2], ("symbol".to_string(), "BTCUSDT".to_string()));
    }

    #[test]
    fn test_canonicalize_appends_timestamp_last() {
        let params = Params::new().with("b", 2u32).with("a", 1u32);
        let pairs = canonicalize(params, 1_700_000_000_000);
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "timestamp"]);
        assert_eq!(pairs[2].1, "1700000000000");
    }

    #[test]
    fn test_canonicalize_empty_params_gets_timestamp() {
        let pairs = canonicalize(Params::new(), 42);
        assert_eq!(pairs, vec![("timestamp".to_string(), "42".to_string())]);
    }

    #[test]
    fn test_canonicalize_replaces_caller_timestamp_and_signature() {
        let params = Params::new()
            .with("timestamp", 1u64)
            .with("signature", "forged")
            .with("symbol", "BTCUSDT");
        let pairs = canonicalize(params, 99);
        assert_eq!(
            pairs,
            vec![
                ("symbol".to_string(), "BTCUSDT".to_string()),
                ("timestamp".to_string(), "99".to_string()),
            ]
        );
    }

    #[test]
    fn test_canonicalize_is_idempotent_on_canonical_input() {
        let native = Params::new().with("dualSidePosition", true).with("x", 1u32);
        let stringified = Params::new().with("dualSidePosition", "true").with("x", "1");
        assert_eq!(canonicalize(native, 5), canonicalize(stringified, 5));
    }

    #[test]
    fn test_encode_query_form_encoding() {
        let pairs = vec![
            ("note".to_string(), "a b&c".to_string()),
            ("timestamp".to_string(), "1".to_string()),
        ];
        assert_eq!(encode_query(&pairs).unwrap(), "note=a+b%26c&timestamp=1");
    }

    #[test]
    fn test_public_request_has_no_signature_or_key() {
        let req = builder(1000)
            .public(&public::TICKER_PRICE, Params::new().with("symbol", "BTCUSDT"))
            .unwrap();
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(
            req.url().as_str(),
            "https://fapi.binance.com/fapi/v1/ticker/price?symbol=BTCUSDT&timestamp=1000"
        );
        assert!(req.param("signature").is_none());
        assert!(req.api_key().is_none());
        assert!(!req.is_signed());
    }

    #[test]
    fn test_signed_request_signature_verifies() {
        let account = account();
        let params = Params::new()
            .with("symbol", "BTCUSDT")
            .with("side", "BUY")
            .with("reduceOnly", true);
        let req = builder(1_700_000_000_000)
            .signed(&signed::ORDER_NEW, params, &account)
            .unwrap();

        let query = req.query();
        let (unsigned, signature) = query.rsplit_once("&signature=").unwrap();
        assert_eq!(
            unsigned,
            "symbol=BTCUSDT&side=BUY&reduceOnly=true&timestamp=1700000000000"
        );
        assert_eq!(signature, sign_query(&account, unsigned).unwrap());
        assert_eq!(req.param("signature").unwrap(), signature);
        assert_eq!(req.api_key(), Some("test_key"));
        assert_eq!(req.method(), &Method::POST);
    }

    #[test]
    fn test_signed_request_with_empty_params() {
        let account = account();
        let req = builder(7)
            .signed(&signed::LISTEN_KEY_CREATE, Params::new(), &account)
            .unwrap();
        let expected_sig = sign_query(&account, "timestamp=7").unwrap();
        assert_eq!(req.query(), format!("timestamp=7&signature={expected_sig}"));
        assert_eq!(req.url().path(), "/fapi/v1/listenKey");
    }

    #[test]
    fn test_signature_covers_escaped_bytes() {
        let account = account();
        let params = Params::new().with("newClientOrderId", "id/with spaces");
        let req = builder(1).signed(&signed::ORDER_NEW, params, &account).unwrap();
        let (unsigned, signature) = req.query().rsplit_once("&signature=").unwrap();
        assert_eq!(unsigned, "newClientOrderId=id%2Fwith+spaces&timestamp=1");
        assert_eq!(signature, sign_query(&account, unsigned).unwrap());
        assert_eq!(req.param("newClientOrderId").unwrap(), "id/with spaces");
    }

    #[test]
    fn test_timestamp_near_wall_clock() {
        let builder = RequestBuilder::new("https://fapi.binance.com/", Arc::new(SystemClock));
        let req = builder.public(&public::EXCHANGE_INFO, Params::new()).unwrap();
        let ts: u64 = req.param("timestamp").unwrap().parse().unwrap();
        let now = SystemClock.timestamp_ms();
        assert!(now.abs_diff(ts) < 5_000);
        assert_eq!(builder.base_url(), "https://fapi.binance.com");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let req = builder(1)
            .signed(&signed::BALANCE, Params::new(), &account())
            .unwrap();
        let debug = format!("{:?}", req);
        assert!(!debug.contains("test_key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
