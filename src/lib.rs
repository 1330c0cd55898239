//! Best-route trade estimation over AMM liquidity pools.
//!
//! Callers ask for the best price to sell or buy one token for another;
//! the crate builds a call-scoped pool graph from a reserve snapshot,
//! enumerates bounded multi-hop paths, prices them with exact integer
//! constant-product math and returns a slippage-bounded [`Trade`], or a
//! typed no-market error the caller can tell apart from a fault.

pub mod config;
pub mod core;
pub mod error;
pub mod estimator;
pub mod snapshot;

pub use crate::config::NetworkConfig;
pub use crate::core::types::{
    FeeModel, Fraction, Pool, Side, Token, TokenAmount, Trade, TradePath,
};
pub use crate::error::{EstimatorError, Result};
pub use crate::estimator::{
    estimate_buy, estimate_buy_with_pools, estimate_sell, estimate_sell_with_pools,
};
