//! Ordered request parameters.
//!
//! Binance signs the exact query string that is transmitted, so parameters
//! keep their insertion order from construction through encoding.

use rust_decimal::Decimal;

/// A scalar request parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String value, sent as-is
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating-point number
    Float(f64),
    /// Exact decimal (prices, quantities)
    Decimal(Decimal),
    /// Boolean, sent as the literal `true`/`false`
    Bool(bool),
}

impl ParamValue {
    /// The string form the exchange expects for this value.
    ///
    /// Booleans become `"true"`/`"false"`; everything else uses its display form.
    pub fn canonical(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(v) => v.to_string(),
            ParamValue::UInt(v) => v.to_string(),
            ParamValue::Float(v) => v.to_string(),
            ParamValue::Decimal(v) => v.normalize().to_string(),
            ParamValue::Bool(true) => "true".to_string(),
            ParamValue::Bool(false) => "false".to_string(),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::UInt(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::UInt(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        ParamValue::Decimal(value)
    }
}

/// Insertion-ordered mapping of parameter names to values.
///
/// Inserting an existing name replaces its value in place, keeping the
/// original position.
///
/// ```rust
/// use binance_futures_client::types::Params;
///
/// let params = Params::new()
///     .with("symbol", "BTCUSDT")
///     .with("limit", 10u32)
///     .with("reduceOnly", true);
/// assert_eq!(params.len(), 3);
/// assert_eq!(params.get("reduceOnly").unwrap().canonical(), "true");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, returning the updated set.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a parameter only if a value is present.
    pub fn with_opt<V: Into<ParamValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Look up a parameter value.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_bool_canonical_form() {
        assert_eq!(ParamValue::Bool(true).canonical(), "true");
        assert_eq!(ParamValue::Bool(false).canonical(), "false");
    }

    #[test]
    fn test_numeric_canonical_form() {
        assert_eq!(ParamValue::from(20u32).canonical(), "20");
        assert_eq!(ParamValue::from(-5i64).canonical(), "-5");
        assert_eq!(ParamValue::from(0.1f64).canonical(), "0.1");
        assert_eq!(ParamValue::from(0.0000001f64).canonical(), "0.0000001");
        let qty = Decimal::from_str("1.500").unwrap();
        assert_eq!(ParamValue::from(qty).canonical(), "1.5");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let params = Params::new().with("b", 1u32).with("a", 2u32).with("c", 3u32);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::from([("symbol", "BTCUSDT"), ("side", "BUY")]);
        params.insert("symbol", "ETHUSDT");
        let pairs: Vec<(&str, String)> = params.iter().map(|(k, v)| (k, v.canonical())).collect();
        assert_eq!(
            pairs,
            vec![("symbol", "ETHUSDT".to_string()), ("side", "BUY".to_string())]
        );
    }

    #[test]
    fn test_with_opt_skips_none() {
        let params = Params::new()
            .with_opt("symbol", Some("BTCUSDT"))
            .with_opt::<u32>("limit", None);
        assert_eq!(params.len(), 1);
        assert!(params.get("limit").is_none());
    }

    #[test]
    fn test_remove() {
        let mut params = Params::from([("a", 1u32), ("b", 2u32)]);
        assert_eq!(params.remove("a"), Some(ParamValue::UInt(1)));
        assert_eq!(params.remove("a"), None);
        assert_eq!(params.len(), 1);
    }
}
