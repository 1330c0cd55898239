use super::constants::BPS;
use super::types::{Pool, Token};
use crate::error::{EstimatorError, Result};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Call-scoped view of the tradable pool universe: nodes are tokens,
/// edges are pools. Built once per estimation call from a reserve
/// snapshot and never mutated afterwards; a fresh snapshot means a fresh
/// graph.
#[derive(Debug)]
pub struct PoolGraph {
    pools: Vec<Pool>,
    adjacency: HashMap<Token, Vec<usize>>,
}

impl PoolGraph {
    /// Filters the snapshot to the allow-list (an empty list admits
    /// everything) and to tradable pools, then indexes pools by both
    /// endpoint tokens.
    ///
    /// Inconsistent snapshots fail with `InvalidPoolData`: a pool whose
    /// endpoints are the same token, whose token0/token1 violate the
    /// canonical address ordering, whose fee exceeds the basis-point
    /// scale, or whose id appears twice.
    pub fn build(pools: &[Pool], allowlist: &[String]) -> Result<Self> {
        let mut kept: Vec<Pool> = Vec::new();
        let mut seen_ids: HashSet<&str> = HashSet::new();
        let mut skipped_empty = 0usize;

        for pool in pools {
            if !allowlist.is_empty() && !allowlist.iter().any(|id| id == &pool.id) {
                continue;
            }
            if pool.token0 == pool.token1 {
                return Err(EstimatorError::InvalidPoolData(format!(
                    "pool {} has identical endpoint tokens",
                    pool.id
                )));
            }
            if pool.token0.address_key() >= pool.token1.address_key() {
                return Err(EstimatorError::InvalidPoolData(format!(
                    "pool {} violates canonical token ordering",
                    pool.id
                )));
            }
            if pool.fee_bps >= BPS {
                return Err(EstimatorError::InvalidPoolData(format!(
                    "pool {} fee of {} bps exceeds the scale",
                    pool.id, pool.fee_bps
                )));
            }
            if !seen_ids.insert(pool.id.as_str()) {
                return Err(EstimatorError::InvalidPoolData(format!(
                    "duplicate pool id {}",
                    pool.id
                )));
            }
            if !pool.is_tradable() {
                skipped_empty += 1;
                continue;
            }
            kept.push(pool.clone());
        }

        let mut adjacency: HashMap<Token, Vec<usize>> = HashMap::new();
        for (idx, pool) in kept.iter().enumerate() {
            adjacency.entry(pool.token0.clone()).or_default().push(idx);
            adjacency.entry(pool.token1.clone()).or_default().push(idx);
        }
        // Deterministic traversal: neighbours in pool-id order.
        for indices in adjacency.values_mut() {
            indices.sort_by(|a, b| kept[*a].id.cmp(&kept[*b].id));
        }

        if skipped_empty > 0 {
            debug!(skipped_empty, "excluded pools with an empty reserve side");
        }
        info!(
            tokens = adjacency.len(),
            pools = kept.len(),
            "pool graph built"
        );

        Ok(Self {
            pools: kept,
            adjacency,
        })
    }

    /// Indices of the pools touching `token`, in pool-id order.
    pub fn neighbors(&self, token: &Token) -> &[usize] {
        self.adjacency
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn pool(&self, idx: usize) -> &Pool {
        &self.pools[idx]
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    pub fn token_count(&self) -> usize {
        self.adjacency.len()
    }
}
