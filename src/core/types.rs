use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Token identity: (chain id, address). Addresses compare
/// case-insensitively so checksummed and lowercased forms of the same
/// contract are one token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
}

impl Token {
    pub fn new(
        chain_id: u64,
        address: impl Into<String>,
        decimals: u8,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address: address.into(),
            decimals,
            symbol: symbol.into(),
        }
    }

    pub fn address_key(&self) -> String {
        self.address.to_ascii_lowercase()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address.eq_ignore_ascii_case(&other.address)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address_key().hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.symbol, self.address)
    }
}

/// An exact integer amount of a specific token, in the token's smallest
/// unit. All pricing math stays in `BigUint`; floats never enter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub token: Token,
    pub raw: BigUint,
}

impl TokenAmount {
    pub fn new(token: Token, raw: BigUint) -> Self {
        Self { token, raw }
    }
}

/// Rational fraction, e.g. an allowed slippage of 1/100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl Fraction {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// One liquidity pool: an undirected edge between `token0` and `token1`
/// with a two-sided reserve snapshot. Reserves are immutable for the
/// duration of one estimation call. `token0`/`token1` follow the on-chain
/// canonical ordering (token0 address sorts below token1 address).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    pub token0: Token,
    pub token1: Token,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    pub fee_bps: u32, // Fee in basis points
}

/// Fee model selected per network/protocol version. One price engine
/// serves both protocol families; only the fee resolution differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeModel {
    /// Each pool carries its own fee (Uniswap-style fee tiers).
    PerPool,
    /// One protocol-wide fee applies to every pool (Pangolin-style).
    Flat(u32),
}

impl FeeModel {
    pub fn fee_bps(&self, pool: &Pool) -> u32 {
        match self {
            FeeModel::PerPool => pool.fee_bps,
            FeeModel::Flat(bps) => *bps,
        }
    }
}

/// An ordered walk from a source to a destination token.
/// `tokens` has one more entry than `pools`; hop i trades
/// `tokens[i] -> tokens[i + 1]` through `pools[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TradePath {
    pub tokens: Vec<Token>,
    pub pools: Vec<Pool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Sell,
    Buy,
}

/// Result of one estimation call. A value handed back to the caller,
/// never persisted by the core.
///
/// `output_amount` (sell) and `input_amount` (buy) hold the unadjusted
/// quote; `limit_amount` is the slippage-adjusted bound the caller should
/// enforce downstream (minimum output on a sell, maximum input on a buy).
#[derive(Clone, Debug, PartialEq)]
pub struct Trade {
    pub side: Side,
    pub path: TradePath,
    pub input_amount: TokenAmount,
    pub output_amount: TokenAmount,
    pub limit_amount: TokenAmount,
    pub execution_price_impact_bps: u32,
    pub expires_at: u64,
    pub router_address: String,
}
