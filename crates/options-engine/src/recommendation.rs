//! Recommendation payload

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{MarketSnapshot, OptionContract};

/// Display view of a selected contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub bid: f64,
    pub ask: f64,
    pub last: f64,
    pub strike: f64,
    pub expiration: NaiveDate,
    pub theoretical_price: f64,
    /// e.g. "11/20/26 105.00 Call"
    pub description: String,
}

impl SelectedOption {
    pub fn from_contract(contract: &OptionContract) -> Self {
        Self {
            bid: contract.bid,
            ask: contract.ask,
            last: contract.last_price,
            strike: contract.strike,
            expiration: contract.expiration,
            theoretical_price: contract.theoretical_price.unwrap_or_default(),
            description: describe(contract),
        }
    }
}

/// Outcome for one leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LegSelection {
    Found(SelectedOption),
    NoQualifyingOption,
}

impl LegSelection {
    pub fn from_contract(contract: Option<&OptionContract>) -> Self {
        match contract {
            Some(c) => LegSelection::Found(SelectedOption::from_contract(c)),
            None => LegSelection::NoQualifyingOption,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LegSelection::Found(_))
    }

    pub fn selected(&self) -> Option<&SelectedOption> {
        match self {
            LegSelection::Found(option) => Some(option),
            LegSelection::NoQualifyingOption => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub ticker: String,
    pub call: LegSelection,
    pub put: LegSelection,
    /// Inputs behind the recommendation, present even when both legs are empty
    pub summary: MarketSnapshot,
}

pub fn describe(contract: &OptionContract) -> String {
    format!(
        "{} {:.2} {}",
        contract.expiration.format("%m/%d/%y"),
        contract.strike,
        contract.option_type
    )
}

pub fn assemble(
    ticker: impl Into<String>,
    call: Option<&OptionContract>,
    put: Option<&OptionContract>,
    snapshot: MarketSnapshot,
) -> Recommendation {
    Recommendation {
        ticker: ticker.into(),
        call: LegSelection::from_contract(call),
        put: LegSelection::from_contract(put),
        summary: snapshot,
    }
}
