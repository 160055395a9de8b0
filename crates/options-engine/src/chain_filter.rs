//! Liquidity and price thresholds over a priced chain

use serde::{Deserialize, Serialize};

use crate::types::{OptionChain, OptionContract};

pub const DEFAULT_MIN_VOLUME: u64 = 10;
pub const DEFAULT_MIN_OPEN_INTEREST: u64 = 10;
pub const DEFAULT_MAX_THEORETICAL_PRICE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterThresholds {
    /// Volume must be strictly greater than this
    pub min_volume: u64,
    /// Open interest must be strictly greater than this
    pub min_open_interest: u64,
    /// Theoretical price must be at most this (inclusive)
    pub max_theoretical_price: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            min_volume: DEFAULT_MIN_VOLUME,
            min_open_interest: DEFAULT_MIN_OPEN_INTEREST,
            max_theoretical_price: DEFAULT_MAX_THEORETICAL_PRICE,
        }
    }
}

impl FilterThresholds {
    pub fn is_liquid(&self, contract: &OptionContract) -> bool {
        contract.volume > self.min_volume && contract.open_interest > self.min_open_interest
    }

    /// Unpriced contracts never pass
    pub fn is_within_price_cap(&self, contract: &OptionContract) -> bool {
        contract
            .theoretical_price
            .is_some_and(|p| p <= self.max_theoretical_price)
    }

    pub fn accepts(&self, contract: &OptionContract) -> bool {
        self.is_liquid(contract) && self.is_within_price_cap(contract)
    }
}

/// Keep the contracts passing both stages, in their original order
pub fn filter(contracts: &[OptionContract], thresholds: &FilterThresholds) -> Vec<OptionContract> {
    contracts
        .iter()
        .filter(|c| thresholds.accepts(c))
        .cloned()
        .collect()
}

pub fn filter_chain(chain: &OptionChain, thresholds: &FilterThresholds) -> OptionChain {
    OptionChain {
        calls: filter(&chain.calls, thresholds),
        puts: filter(&chain.puts, thresholds),
    }
}
