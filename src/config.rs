use crate::core::constants::BPS;
use crate::core::types::{FeeModel, Fraction};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-network/per-version settings, resolved once at startup; the core
/// never re-reads configuration mid-call. `gas_limit`, the contract
/// addresses and `trading_types` are opaque pass-throughs for callers
/// building transactions downstream.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub network: String,
    pub allowed_slippage: Fraction,
    pub gas_limit: u64,
    pub ttl_secs: u64,
    pub max_hops: usize,
    /// Pool allow-list; an empty list admits the whole snapshot.
    pub pools: Vec<String>,
    pub router_address: String,
    pub factory_address: String,
    pub trading_types: Vec<String>,
    pub fee_model: FeeModel,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: 43114,
            network: "avalanche".to_string(),
            allowed_slippage: Fraction::new(1, 100),
            gas_limit: 150_688,
            ttl_secs: 600,
            max_hops: 3,
            pools: vec![],
            router_address: "0xE54Ca86531e17Ef3616d22Ca28b0D458b6C89106".to_string(),
            factory_address: "0xefa94DE7a4656D787667C749f7E1223D71E9FD88".to_string(),
            trading_types: vec!["EVM_AMM".to_string()],
            fee_model: FeeModel::Flat(30),
        }
    }
}

impl NetworkConfig {
    // Helper method to load from a specific path
    pub fn load_from(path: PathBuf) -> anyhow::Result<Self> {
        let config: Self = confy::load_path(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_hops == 0 {
            bail!("max_hops must be at least 1");
        }
        if self.allowed_slippage.denominator == 0 {
            bail!("allowed_slippage denominator cannot be zero");
        }
        if let FeeModel::Flat(bps) = self.fee_model {
            if bps >= BPS {
                bail!("flat fee of {bps} bps exceeds the scale");
            }
        }
        Ok(())
    }
}
