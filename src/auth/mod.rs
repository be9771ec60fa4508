//! Authentication module for the Binance futures API.
//!
//! This module provides:
//! - Account credentials with secure secret storage
//! - Millisecond timestamps for request freshness
//! - HMAC-SHA256 signature generation for signed requests

mod account;
mod clock;
mod signature;

pub use account::Account;
pub use clock::{SystemClock, TimestampProvider};
pub use signature::sign_query;
