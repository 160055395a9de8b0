//! Attaching theoretical prices to a chain
//!
//! Each contract is priced independently with the request's market snapshot.
//! Contracts that cannot be priced (expired, zero volatility, bad strike) are
//! left unpriced and counted; the chain filter drops them afterwards.

use chrono::NaiveDate;
use tracing::debug;

use crate::black_scholes;
use crate::expiry::time_to_expiry;
use crate::types::{MarketSnapshot, OptionChain, OptionContract};
use crate::Result;

/// A chain after pricing, with per-contract outcome counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricedChain {
    pub chain: OptionChain,
    pub priced: usize,
    pub skipped: usize,
}

/// Theoretical price of one contract as of `as_of`
pub fn price_contract(
    contract: &OptionContract,
    snapshot: &MarketSnapshot,
    as_of: NaiveDate,
) -> Result<f64> {
    let time = time_to_expiry(contract.expiration, as_of).ok_or_else(|| {
        crate::EngineError::invalid_input(format!(
            "contract expiring {} is not after {}",
            contract.expiration, as_of
        ))
    })?;

    black_scholes::price(
        snapshot.spot_price,
        contract.strike,
        time,
        snapshot.risk_free_rate,
        snapshot.annualized_volatility,
        contract.option_type,
    )
}

fn price_all(
    contracts: Vec<OptionContract>,
    snapshot: &MarketSnapshot,
    as_of: NaiveDate,
    priced: &mut usize,
    skipped: &mut usize,
) -> Vec<OptionContract> {
    contracts
        .into_iter()
        .map(|contract| match price_contract(&contract, snapshot, as_of) {
            Ok(value) => {
                *priced += 1;
                contract.with_theoretical_price(value)
            }
            Err(e) => {
                *skipped += 1;
                debug!(
                    strike = contract.strike,
                    expiration = %contract.expiration,
                    option_type = %contract.option_type,
                    error = %e,
                    "Skipping unpriceable contract"
                );
                contract
            }
        })
        .collect()
}

/// Price every contract of the chain, keeping chain order
pub fn price_chain(chain: OptionChain, snapshot: &MarketSnapshot, as_of: NaiveDate) -> PricedChain {
    let mut priced = 0;
    let mut skipped = 0;

    let calls = price_all(chain.calls, snapshot, as_of, &mut priced, &mut skipped);
    let puts = price_all(chain.puts, snapshot, as_of, &mut priced, &mut skipped);

    PricedChain {
        chain: OptionChain { calls, puts },
        priced,
        skipped,
    }
}
