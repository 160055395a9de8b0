//! Shared types for the options engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(EngineError::invalid_input(format!(
                "option type must be 'call' or 'put', got '{}'",
                other
            ))),
        }
    }
}

/// Market inputs shared by every contract of one recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Current price of the underlying
    pub spot_price: f64,
    /// Risk-free rate (as decimal, e.g., 0.04 = 4%)
    pub risk_free_rate: f64,
    /// Historical volatility, annualized
    pub annualized_volatility: f64,
}

/// A single listed option with its quote and liquidity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Exchange symbol, when the provider supplies one
    #[serde(default)]
    pub contract_symbol: Option<String>,
    pub option_type: OptionType,
    pub strike: f64,
    pub expiration: NaiveDate,
    pub bid: f64,
    pub ask: f64,
    pub last_price: f64,
    pub volume: u64,
    pub open_interest: u64,
    /// Black-Scholes value, attached once by pricing
    #[serde(default)]
    pub theoretical_price: Option<f64>,
}

impl OptionContract {
    /// Create an unquoted contract with zero liquidity
    pub fn new(option_type: OptionType, strike: f64, expiration: NaiveDate) -> Self {
        Self {
            contract_symbol: None,
            option_type,
            strike,
            expiration,
            bid: 0.0,
            ask: 0.0,
            last_price: 0.0,
            volume: 0,
            open_interest: 0,
            theoretical_price: None,
        }
    }

    pub fn call(strike: f64, expiration: NaiveDate) -> Self {
        Self::new(OptionType::Call, strike, expiration)
    }

    pub fn put(strike: f64, expiration: NaiveDate) -> Self {
        Self::new(OptionType::Put, strike, expiration)
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.contract_symbol = Some(symbol.into());
        self
    }

    pub fn with_quote(mut self, bid: f64, ask: f64, last_price: f64) -> Self {
        self.bid = bid;
        self.ask = ask;
        self.last_price = last_price;
        self
    }

    pub fn with_liquidity(mut self, volume: u64, open_interest: u64) -> Self {
        self.volume = volume;
        self.open_interest = open_interest;
        self
    }

    pub fn with_theoretical_price(mut self, price: f64) -> Self {
        self.theoretical_price = Some(price);
        self
    }

    pub fn is_priced(&self) -> bool {
        self.theoretical_price.is_some()
    }

    /// Strictly out of the money: calls above spot, puts below
    pub fn is_otm(&self, spot: f64) -> bool {
        match self.option_type {
            OptionType::Call => self.strike > spot,
            OptionType::Put => self.strike < spot,
        }
    }

    pub fn distance_from_spot(&self, spot: f64) -> f64 {
        (self.strike - spot).abs()
    }
}

/// Calls and puts for one or more expirations, in provider order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

impl OptionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from contracts of either type, keeping their order
    pub fn from_contracts(contracts: impl IntoIterator<Item = OptionContract>) -> Self {
        let mut chain = Self::new();
        for contract in contracts {
            chain.push(contract);
        }
        chain
    }

    pub fn push(&mut self, contract: OptionContract) {
        match contract.option_type {
            OptionType::Call => self.calls.push(contract),
            OptionType::Put => self.puts.push(contract),
        }
    }

    /// Append another chain's contracts after this one's
    pub fn merge(&mut self, other: OptionChain) {
        self.calls.extend(other.calls);
        self.puts.extend(other.puts);
    }

    pub fn len(&self) -> usize {
        self.calls.len() + self.puts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_option_type_parse() {
        assert_eq!("call".parse::<OptionType>(), Ok(OptionType::Call));
        assert_eq!("PUT".parse::<OptionType>(), Ok(OptionType::Put));
        assert!(matches!(
            "straddle".parse::<OptionType>(),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_option_type_display() {
        assert_eq!(OptionType::Call.to_string(), "Call");
        assert_eq!(OptionType::Put.to_string(), "Put");
    }

    #[test]
    fn test_otm_is_strict() {
        let exp = date(2026, 11, 20);
        assert!(OptionContract::call(101.0, exp).is_otm(100.0));
        assert!(!OptionContract::call(100.0, exp).is_otm(100.0));
        assert!(OptionContract::put(99.0, exp).is_otm(100.0));
        assert!(!OptionContract::put(100.0, exp).is_otm(100.0));
    }

    #[test]
    fn test_chain_partitions_and_merges() {
        let first = date(2026, 11, 20);
        let second = date(2026, 12, 18);

        let mut chain = OptionChain::from_contracts(vec![
            OptionContract::call(105.0, first),
            OptionContract::put(95.0, first),
        ]);
        chain.merge(OptionChain::from_contracts(vec![OptionContract::call(
            110.0, second,
        )]));

        assert_eq!(chain.calls.len(), 2);
        assert_eq!(chain.puts.len(), 1);
        assert_eq!(chain.calls[1].strike, 110.0);
        assert_eq!(chain.calls[1].expiration, second);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_contract_serializes_type_lowercase() {
        let contract = OptionContract::put(95.0, date(2026, 11, 20));
        let json = serde_json::to_value(&contract).unwrap();
        assert_eq!(json["option_type"], "put");
        assert_eq!(json["expiration"], "2026-11-20");
    }
}
