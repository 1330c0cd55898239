use super::constants::BPS;
use super::types::{Pool, Token};
use num_bigint::BigUint;
use num_traits::Zero;

impl Pool {
    /// Both reserves strictly positive. Pools with an empty side are
    /// untradable and never enter the graph.
    pub fn is_tradable(&self) -> bool {
        !self.reserve0.is_zero() && !self.reserve1.is_zero()
    }

    /// The opposite endpoint, or None when the pool does not touch `token`.
    pub fn other(&self, token: &Token) -> Option<&Token> {
        if self.token0 == *token {
            Some(&self.token1)
        } else if self.token1 == *token {
            Some(&self.token0)
        } else {
            None
        }
    }

    /// Reserves oriented for a trade entering with `token_in`:
    /// (reserve_in, reserve_out).
    pub fn reserves_for(&self, token_in: &Token) -> Option<(&BigUint, &BigUint)> {
        if self.token0 == *token_in {
            Some((&self.reserve0, &self.reserve1))
        } else if self.token1 == *token_in {
            Some((&self.reserve1, &self.reserve0))
        } else {
            None
        }
    }

    /// Constant-product output for an exact input, fee deducted from the
    /// input side. One final truncating division, exactly as the pair
    /// contract computes it.
    pub fn get_amount_out(
        &self,
        amount_in: &BigUint,
        reserve_in: &BigUint,
        reserve_out: &BigUint,
        fee_bps: u32,
    ) -> BigUint {
        let amount_in_with_fee = amount_in * BigUint::from(BPS - fee_bps);
        let numerator = &amount_in_with_fee * reserve_out;
        let denominator = reserve_in * BigUint::from(BPS) + &amount_in_with_fee;

        if denominator.is_zero() {
            return BigUint::zero();
        }
        numerator / denominator
    }

    /// Constant-product input required for an exact output, rounded up so
    /// the taker always covers the requested amount after truncation on
    /// the forward leg. None when the pool cannot cover `amount_out`.
    pub fn get_amount_in(
        &self,
        amount_out: &BigUint,
        reserve_in: &BigUint,
        reserve_out: &BigUint,
        fee_bps: u32,
    ) -> Option<BigUint> {
        if amount_out >= reserve_out {
            return None;
        }
        let numerator = reserve_in * amount_out * BigUint::from(BPS);
        let denominator = (reserve_out - amount_out) * BigUint::from(BPS - fee_bps);
        Some(numerator / denominator + 1u32)
    }
}
