//! HMAC-SHA256 signature generation for Binance API authentication.
//!
//! Signed endpoints require a `signature` query parameter computed as:
//! ```text
//! hex(HMAC-SHA256(query_string, api_secret))
//! ```
//!
//! The query string must be exactly the bytes sent on the wire, with the
//! `signature` parameter itself excluded.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Account;
use crate::error::BinanceError;

type HmacSha256 = Hmac<Sha256>;

/// Sign an encoded query string for Binance's signed endpoints.
///
/// # Arguments
///
/// * `account` - Account whose secret is used as the HMAC key
/// * `query_string` - The URL-encoded query, in transmission order
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA256 signature.
///
/// # Example
///
/// ```rust
/// use binance_futures_client::auth::{Account, sign_query};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let account = Account::new(1, "main", "api_key", "api_secret");
/// let signature = sign_query(&account, "symbol=BTCUSDT&timestamp=1700000000000")?;
/// assert_eq!(signature.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn sign_query(account: &Account, query_string: &str) -> Result<String, BinanceError> {
    let mut mac = HmacSha256::new_from_slice(account.expose_secret().as_bytes())
        .map_err(|e| BinanceError::Auth(format!("Invalid HMAC key: {e}")))?;
    mac.update(query_string.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_known_vector() {
        // Example published in the Binance API documentation.
        let account = Account::new(
            1,
            "docs",
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A",
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
        );
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

        let signature = sign_query(&account, query).unwrap();

        assert_eq!(
            signature,
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let account = Account::new(1, "a", "k", "s");
        let signature = sign_query(&account, "timestamp=1").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signature_consistency() {
        let account = Account::new(1, "a", "k", "my_secret");
        let sig1 = sign_query(&account, "symbol=BTCUSDT&timestamp=12345").unwrap();
        let sig2 = sign_query(&account, "symbol=BTCUSDT&timestamp=12345").unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_query_order() {
        let account = Account::new(1, "a", "k", "my_secret");
        let sig1 = sign_query(&account, "a=1&b=2&timestamp=12345").unwrap();
        let sig2 = sign_query(&account, "b=2&a=1&timestamp=12345").unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_secret() {
        let sig1 = sign_query(&Account::new(1, "a", "k", "s1"), "timestamp=1").unwrap();
        let sig2 = sign_query(&Account::new(1, "a", "k", "s2"), "timestamp=1").unwrap();
        assert_ne!(sig1, sig2);
    }
}
