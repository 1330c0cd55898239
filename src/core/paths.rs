use super::constants::BPS;
use super::token_graph::PoolGraph;
use super::types::{FeeModel, Pool, Token, TradePath};
use crate::error::{EstimatorError, Result};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// All simple paths from `source` to `destination` crossing at most
/// `max_hops` pools. Each call is a fresh traversal; the result is sorted
/// by hop count and then by the pool-id sequence so downstream exact-tie
/// ranking stays stable across runs.
///
/// `source == destination` is a degenerate request and yields nothing.
pub fn enumerate(
    graph: &PoolGraph,
    source: &Token,
    destination: &Token,
    max_hops: usize,
) -> Vec<TradePath> {
    let mut found = Vec::new();
    if source == destination || max_hops == 0 {
        return found;
    }
    let mut tokens = vec![source.clone()];
    let mut pools: Vec<Pool> = Vec::new();
    dfs(
        graph,
        destination,
        max_hops,
        &mut tokens,
        &mut pools,
        &mut found,
    );
    found.sort_by(|a, b| {
        a.pools
            .len()
            .cmp(&b.pools.len())
            .then_with(|| a.pool_ids().cmp(&b.pool_ids()))
    });
    found
}

fn dfs(
    graph: &PoolGraph,
    destination: &Token,
    max_hops: usize,
    tokens: &mut Vec<Token>,
    pools: &mut Vec<Pool>,
    found: &mut Vec<TradePath>,
) {
    let current = tokens[tokens.len() - 1].clone();
    for &idx in graph.neighbors(&current) {
        let pool = graph.pool(idx);
        let next = match pool.other(&current) {
            Some(next) => next,
            None => continue,
        };
        // Simple paths only: a token already on the walk is never revisited,
        // which also rules out reusing a pool edge.
        if tokens.contains(next) {
            continue;
        }
        tokens.push(next.clone());
        pools.push(pool.clone());
        if next == destination {
            found.push(TradePath {
                tokens: tokens.clone(),
                pools: pools.clone(),
            });
        } else if pools.len() < max_hops {
            dfs(graph, destination, max_hops, tokens, pools, found);
        }
        tokens.pop();
        pools.pop();
    }
}

/// Outcome of pricing one candidate path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathQuote {
    pub amount_in: BigUint,
    pub amount_out: BigUint,
    /// Deviation of the executed amount from the fee-free mid quote, in
    /// basis points.
    pub impact_bps: u32,
}

impl TradePath {
    pub fn hops(&self) -> usize {
        self.pools.len()
    }

    pub fn source(&self) -> &Token {
        &self.tokens[0]
    }

    pub fn destination(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    pub fn pool_ids(&self) -> Vec<&str> {
        self.pools.iter().map(|p| p.id.as_str()).collect()
    }

    /// Walks the hops forward, feeding each hop's output into the next.
    /// A quote that truncates to nothing eliminates the path: a
    /// zero-amount trade is never a market.
    pub fn quote_exact_in(&self, amount_in: &BigUint, fee_model: &FeeModel) -> Result<PathQuote> {
        let mut current = amount_in.clone();
        for (pool, pair) in self.pools.iter().zip(self.tokens.windows(2)) {
            let (reserve_in, reserve_out) = oriented_reserves(pool, &pair[0])?;
            current = pool.get_amount_out(&current, reserve_in, reserve_out, fee_model.fee_bps(pool));
        }
        if current.is_zero() {
            return Err(EstimatorError::InsufficientLiquidity);
        }
        let (prod_in, prod_out) = self.reserve_products()?;
        let mid_out = amount_in * &prod_out / &prod_in;
        // current <= mid_out: truncation preserves the ordering of the
        // real-valued quotes, so the subtraction cannot underflow.
        let impact = (&mid_out - &current) * BigUint::from(BPS) / &mid_out;
        Ok(PathQuote {
            amount_in: amount_in.clone(),
            amount_out: current,
            impact_bps: bps_to_u32(impact),
        })
    }

    /// Walks the hops backward from the requested output, rounding every
    /// hop's required input up. Fails with `InsufficientLiquidity` when
    /// any hop cannot cover its requested output.
    pub fn quote_exact_out(&self, amount_out: &BigUint, fee_model: &FeeModel) -> Result<PathQuote> {
        if amount_out.is_zero() {
            return Err(EstimatorError::InsufficientLiquidity);
        }
        let mut current = amount_out.clone();
        for (pool, pair) in self.pools.iter().zip(self.tokens.windows(2)).rev() {
            let (reserve_in, reserve_out) = oriented_reserves(pool, &pair[0])?;
            current = pool
                .get_amount_in(&current, reserve_in, reserve_out, fee_model.fee_bps(pool))
                .ok_or(EstimatorError::InsufficientLiquidity)?;
        }
        let (prod_in, prod_out) = self.reserve_products()?;
        let mid_in = amount_out * &prod_in / &prod_out;
        // The ceiling walk never undershoots the zero-impact cost; clamp
        // the dust case where the mid quote truncates to nothing.
        let denominator = if mid_in.is_zero() {
            BigUint::one()
        } else {
            mid_in.clone()
        };
        let impact = (&current - &mid_in) * BigUint::from(BPS) / denominator;
        Ok(PathQuote {
            amount_in: current,
            amount_out: amount_out.clone(),
            impact_bps: bps_to_u32(impact),
        })
    }

    /// Products of the oriented reserves across all hops, used for the
    /// zero-impact mid quote with a single truncating division.
    fn reserve_products(&self) -> Result<(BigUint, BigUint)> {
        let mut prod_in = BigUint::one();
        let mut prod_out = BigUint::one();
        for (pool, pair) in self.pools.iter().zip(self.tokens.windows(2)) {
            let (reserve_in, reserve_out) = oriented_reserves(pool, &pair[0])?;
            prod_in *= reserve_in;
            prod_out *= reserve_out;
        }
        Ok((prod_in, prod_out))
    }
}

/// An orientation mismatch means the path was not built from this graph.
/// That is a construction bug, and it fails loudly.
fn oriented_reserves<'a>(pool: &'a Pool, token_in: &Token) -> Result<(&'a BigUint, &'a BigUint)> {
    pool.reserves_for(token_in).ok_or_else(|| {
        EstimatorError::InvalidPoolData(format!("pool {} does not connect {}", pool.id, token_in))
    })
}

fn bps_to_u32(value: BigUint) -> u32 {
    value.to_u32().unwrap_or(u32::MAX)
}
