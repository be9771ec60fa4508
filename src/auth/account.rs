//! Account credentials for Binance API authentication.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// An exchange account: identity plus API key/secret pair.
///
/// All fields are read-only after construction. The key and secret are never
/// printed by `Debug` or `Display`; use [`Account::fingerprint`] to identify an
/// account in logs.
#[derive(Clone)]
pub struct Account {
    id: u64,
    name: String,
    api_key: SecretString,
    api_secret: SecretString,
}

impl Account {
    /// Create a new account from its identity and API key pair.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            api_key: SecretString::from(api_key.into()),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Numeric account id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name of the account.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the raw API key for the `X-MBX-APIKEY` header.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// One-way fingerprint of name, key and secret as lowercase hex SHA-256.
    ///
    /// Stable across calls. Safe to log; never usable for authentication.
    ///
    /// The three fields are hashed as a plain concatenation with no separator,
    /// so splits of the same bytes (`"ak" + "" + "s"` and `"a" + "k" + "s"`)
    /// share a fingerprint. Do not treat it as a unique account key.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update(self.api_key.expose_secret().as_bytes());
        hasher.update(self.api_secret.expose_secret().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Try to load an account from the default environment variables.
    ///
    /// Reads `BINANCE_API_KEY` and `BINANCE_API_SECRET`, plus the optional
    /// `BINANCE_ACCOUNT_ID` (default `0`) and `BINANCE_ACCOUNT_NAME`
    /// (default `"default"`). Returns `None` if the key or secret is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_prefix("BINANCE")
    }

    /// Try to load an account from environment variables with a custom prefix.
    ///
    /// With prefix `SUB1` this reads `SUB1_API_KEY`, `SUB1_API_SECRET`,
    /// `SUB1_ACCOUNT_ID` and `SUB1_ACCOUNT_NAME`.
    pub fn try_from_env_prefix(prefix: &str) -> Option<Self> {
        let api_key = std::env::var(format!("{prefix}_API_KEY")).ok()?;
        let api_secret = std::env::var(format!("{prefix}_API_SECRET")).ok()?;
        let id = std::env::var(format!("{prefix}_ACCOUNT_ID"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let name = std::env::var(format!("{prefix}_ACCOUNT_NAME"))
            .unwrap_or_else(|_| "default".to_string());

        Some(Self::new(id, name, api_key, api_secret))
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("fingerprint", &self.fingerprint())
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let account = Account::new(1, "a", "k", "s");
        assert_eq!(account.fingerprint(), account.fingerprint());
        assert_eq!(account.fingerprint(), Account::new(1, "a", "k", "s").fingerprint());
        assert_eq!(account.fingerprint().len(), 64);
    }

    #[test]
    fn test_fingerprint_depends_on_name_key_and_secret() {
        let base = Account::new(1, "a", "k", "s").fingerprint();
        assert_ne!(base, Account::new(1, "b", "k", "s").fingerprint());
        assert_ne!(base, Account::new(1, "a", "x", "s").fingerprint());
        assert_ne!(base, Account::new(1, "a", "k", "x").fingerprint());
        // id is not part of the fingerprint
        assert_eq!(base, Account::new(2, "a", "k", "s").fingerprint());
    }

    #[test]
    fn test_fingerprint_hashes_plain_concatenation() {
        let split_one = Account::new(1, "ak", "", "s").fingerprint();
        let split_two = Account::new(1, "a", "k", "s").fingerprint();
        assert_eq!(split_one, split_two);
        assert_eq!(split_two, hex::encode(Sha256::digest(b"aks")));
    }

    #[test]
    fn test_debug_and_display_redact_credentials() {
        let account = Account::new(7, "main", "my_api_key", "super_secret");
        let debug_str = format!("{:?}", account);
        assert!(debug_str.contains("main"));
        assert!(!debug_str.contains("my_api_key"));
        assert!(!debug_str.contains("super_secret"));
        assert_eq!(account.to_string(), account.fingerprint());
    }

    #[test]
    fn test_accessors() {
        let account = Account::new(3, "hedge", "key", "secret");
        assert_eq!(account.id(), 3);
        assert_eq!(account.name(), "hedge");
        assert_eq!(account.api_key(), "key");
        assert_eq!(account.expose_secret(), "secret");
    }

    #[test]
    fn test_try_from_env_prefix_missing() {
        assert!(Account::try_from_env_prefix("BFC_TEST_SURELY_UNSET").is_none());
    }
}
