//! Entry points for trade estimation: fetch the snapshot (the single
//! suspend point), build the call-scoped graph, enumerate and price the
//! candidate paths, and hand the ranked set to the trade builder.

use crate::config::NetworkConfig;
use crate::core::paths;
use crate::core::token_graph::PoolGraph;
use crate::core::trade::{self, RankedQuote};
use crate::core::types::{Pool, Side, Token, TokenAmount, Trade};
use crate::error::{EstimatorError, Result};
use crate::snapshot::PoolProvider;
use num_bigint::BigUint;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Best-route estimate for selling `amount_in` of `token_in` into
/// `token_out`.
pub async fn estimate_sell<P: PoolProvider>(
    provider: &P,
    config: &NetworkConfig,
    token_in: &Token,
    token_out: &Token,
    amount_in: &TokenAmount,
) -> Result<Trade> {
    let pools = fetch_snapshot(provider, config, token_in, token_out).await?;
    estimate_sell_with_pools(config, &pools, token_in, token_out, amount_in)
}

/// Best-route estimate for buying `amount_out` of `token_out` with
/// `token_in`.
pub async fn estimate_buy<P: PoolProvider>(
    provider: &P,
    config: &NetworkConfig,
    token_in: &Token,
    token_out: &Token,
    amount_out: &TokenAmount,
) -> Result<Trade> {
    let pools = fetch_snapshot(provider, config, token_in, token_out).await?;
    estimate_buy_with_pools(config, &pools, token_in, token_out, amount_out)
}

/// Pure sell-side estimation over a materialized snapshot.
pub fn estimate_sell_with_pools(
    config: &NetworkConfig,
    pools: &[Pool],
    token_in: &Token,
    token_out: &Token,
    amount_in: &TokenAmount,
) -> Result<Trade> {
    validate_request(token_in, token_out)?;
    let candidates = collect_candidates(
        config,
        pools,
        token_in,
        token_out,
        Side::Sell,
        &amount_in.raw,
    )?;
    trade::build_trade(
        candidates,
        Side::Sell,
        config.allowed_slippage,
        config.ttl_secs,
        unix_now(),
        &config.router_address,
    )
}

/// Pure buy-side estimation over a materialized snapshot.
pub fn estimate_buy_with_pools(
    config: &NetworkConfig,
    pools: &[Pool],
    token_in: &Token,
    token_out: &Token,
    amount_out: &TokenAmount,
) -> Result<Trade> {
    validate_request(token_in, token_out)?;
    let candidates = collect_candidates(
        config,
        pools,
        token_in,
        token_out,
        Side::Buy,
        &amount_out.raw,
    )?;
    trade::build_trade(
        candidates,
        Side::Buy,
        config.allowed_slippage,
        config.ttl_secs,
        unix_now(),
        &config.router_address,
    )
}

pub fn validate_request(token_in: &Token, token_out: &Token) -> Result<()> {
    if token_in.address.trim().is_empty() || token_out.address.trim().is_empty() {
        return Err(EstimatorError::InvalidPoolData(
            "token address cannot be empty".to_string(),
        ));
    }
    if token_in.chain_id != token_out.chain_id {
        return Err(EstimatorError::InvalidPoolData(format!(
            "cross-chain pair: chain {} vs chain {}",
            token_in.chain_id, token_out.chain_id
        )));
    }
    Ok(())
}

async fn fetch_snapshot<P: PoolProvider>(
    provider: &P,
    config: &NetworkConfig,
    token_in: &Token,
    token_out: &Token,
) -> Result<Vec<Pool>> {
    provider
        .fetch_pools(token_in, token_out, &config.pools)
        .await
        .map_err(EstimatorError::Transport)
}

fn collect_candidates(
    config: &NetworkConfig,
    pools: &[Pool],
    token_in: &Token,
    token_out: &Token,
    side: Side,
    amount: &BigUint,
) -> Result<Vec<RankedQuote>> {
    let graph = PoolGraph::build(pools, &config.pools)?;
    let candidate_paths = paths::enumerate(&graph, token_in, token_out, config.max_hops);
    debug!(
        candidates = candidate_paths.len(),
        max_hops = config.max_hops,
        "enumerated candidate paths"
    );

    let mut candidates = Vec::with_capacity(candidate_paths.len());
    for path in candidate_paths {
        let quoted = match side {
            Side::Sell => path.quote_exact_in(amount, &config.fee_model),
            Side::Buy => path.quote_exact_out(amount, &config.fee_model),
        };
        match quoted {
            Ok(quote) => candidates.push(RankedQuote { path, quote }),
            // Elimination, not failure: this path cannot carry the size.
            Err(EstimatorError::InsufficientLiquidity) => continue,
            Err(other) => return Err(other),
        }
    }
    Ok(candidates)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
