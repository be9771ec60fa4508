//! Shared types for the Binance futures API.

pub mod common;
pub mod params;

pub use common::*;
pub use params::{ParamValue, Params};
