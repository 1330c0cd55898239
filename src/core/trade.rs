use super::paths::PathQuote;
use super::types::{Fraction, Side, TokenAmount, Trade, TradePath};
use crate::error::{EstimatorError, Result};
use num_bigint::BigUint;
use tracing::debug;

/// A candidate path together with its quote, in enumeration order.
#[derive(Clone, Debug)]
pub struct RankedQuote {
    pub path: TradePath,
    pub quote: PathQuote,
}

/// Picks the best candidate: highest output for a sell, lowest input for
/// a buy. Candidates arrive in the enumerator's deterministic order and
/// the comparisons are strict, so an exact numeric tie keeps the earlier
/// candidate (fewer hops, then lexicographic pool ids).
pub fn best_candidate(candidates: Vec<RankedQuote>, side: Side) -> Option<RankedQuote> {
    candidates.into_iter().reduce(|best, next| match side {
        Side::Sell => {
            if next.quote.amount_out > best.quote.amount_out {
                next
            } else {
                best
            }
        }
        Side::Buy => {
            if next.quote.amount_in < best.quote.amount_in {
                next
            } else {
                best
            }
        }
    })
}

/// Builds the final `Trade` from the ranked candidate set: applies the
/// slippage bound, stamps the deadline and annotates the router contract
/// for downstream transaction construction. An empty candidate set is the
/// canonical no-market outcome, distinguished from every internal fault.
pub fn build_trade(
    candidates: Vec<RankedQuote>,
    side: Side,
    slippage: Fraction,
    ttl_secs: u64,
    now: u64,
    router_address: &str,
) -> Result<Trade> {
    let best = best_candidate(candidates, side).ok_or(EstimatorError::PriceUnavailable)?;
    debug!(
        hops = best.path.hops(),
        impact_bps = best.quote.impact_bps,
        "selected best path"
    );

    let token_in = best.path.source().clone();
    let token_out = best.path.destination().clone();
    let limit_amount = match side {
        // Minimum acceptable output after adverse movement: floor.
        Side::Sell => TokenAmount::new(
            token_out.clone(),
            min_amount_with_slippage(&best.quote.amount_out, slippage),
        ),
        // Maximum acceptable input: ceiling, never under-funded.
        Side::Buy => TokenAmount::new(
            token_in.clone(),
            max_amount_with_slippage(&best.quote.amount_in, slippage),
        ),
    };

    Ok(Trade {
        side,
        input_amount: TokenAmount::new(token_in, best.quote.amount_in.clone()),
        output_amount: TokenAmount::new(token_out, best.quote.amount_out.clone()),
        limit_amount,
        execution_price_impact_bps: best.quote.impact_bps,
        expires_at: now + ttl_secs,
        router_address: router_address.to_string(),
        path: best.path,
    })
}

/// quoted * den / (den + num), truncated.
fn min_amount_with_slippage(quoted: &BigUint, slippage: Fraction) -> BigUint {
    let num = BigUint::from(slippage.numerator);
    let den = BigUint::from(slippage.denominator);
    quoted * &den / (&den + &num)
}

/// quoted * (den + num) / den, rounded up.
fn max_amount_with_slippage(quoted: &BigUint, slippage: Fraction) -> BigUint {
    let num = BigUint::from(slippage.numerator);
    let den = BigUint::from(slippage.denominator);
    let scaled = quoted * (&den + &num);
    (&scaled + &den - 1u32) / den
}
