use thiserror::Error;

pub type Result<T, E = EstimatorError> = std::result::Result<T, E>;

/// Failure taxonomy for trade estimation. Callers can tell "no market"
/// (`PriceUnavailable`, legitimately retried with a wider hop count or a
/// different pair) from snapshot bugs (`InvalidPoolData`) and collaborator
/// failures (`Transport`); none of these is ever signalled by a silent
/// zero-amount result.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Malformed or inconsistent pool snapshot. A caller/config bug,
    /// surfaced immediately and not retried.
    #[error("invalid pool data: {0}")]
    InvalidPoolData(String),

    /// One path cannot satisfy the requested amount. Local to path
    /// evaluation: it eliminates the path from the candidate set and is
    /// never returned from the estimate calls.
    #[error("insufficient liquidity on path")]
    InsufficientLiquidity,

    /// No viable path across the whole candidate set.
    #[error("no trade path can price the requested pair")]
    PriceUnavailable,

    /// Pool-data collaborator failure, propagated unchanged.
    #[error("transport: {0}")]
    Transport(anyhow::Error),
}
