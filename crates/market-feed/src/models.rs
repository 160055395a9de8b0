//! Yahoo Finance response structures
//!
//! Only the fields the engine reads are modelled; everything else is ignored.

use chrono::{DateTime, NaiveDate};
use options_engine::{OptionChain, OptionContract, OptionType};
use serde::Deserialize;

use crate::error::FeedError;
use crate::Result;

// === Chart endpoint ===

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteIndicator {
    /// Null entries mark days without a close
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiErrorBody {
    fn into_feed_error(self) -> FeedError {
        FeedError::EmptyResponse(match self.description {
            Some(description) => format!("{}: {}", self.code, description),
            None => self.code,
        })
    }
}

impl ChartResponse {
    pub fn into_result(self) -> Result<ChartResult> {
        if let Some(error) = self.chart.error {
            return Err(error.into_feed_error());
        }
        self.chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| FeedError::EmptyResponse("no chart data returned".into()))
    }
}

impl ChartResult {
    /// Daily closes, oldest first, with null days dropped
    pub fn closes(&self) -> Vec<f64> {
        self.indicators
            .quote
            .first()
            .map(|q| q.close.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Market price if reported, else the latest close
    pub fn spot(&self) -> Option<f64> {
        self.meta
            .regular_market_price
            .or_else(|| self.closes().last().copied())
    }
}

// === Options endpoint ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub option_chain: OptionsBody,
}

#[derive(Debug, Deserialize)]
pub struct OptionsBody {
    #[serde(default)]
    pub result: Vec<OptionsResult>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResult {
    #[serde(default)]
    pub underlying_symbol: Option<String>,
    /// Unix seconds at 00:00 UTC of each expiration day
    #[serde(default)]
    pub expiration_dates: Vec<i64>,
    #[serde(default)]
    pub options: Vec<ExpirationOptions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationOptions {
    #[serde(default)]
    pub expiration_date: Option<i64>,
    #[serde(default)]
    pub calls: Vec<ContractQuote>,
    #[serde(default)]
    pub puts: Vec<ContractQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractQuote {
    #[serde(default)]
    pub contract_symbol: Option<String>,
    pub strike: Option<f64>,
    #[serde(default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub open_interest: Option<u64>,
}

impl ContractQuote {
    /// Contracts without a strike are dropped; missing quote fields become 0
    pub fn to_contract(&self, option_type: OptionType, expiration: NaiveDate) -> Option<OptionContract> {
        let strike = self.strike?;

        let mut contract = OptionContract::new(option_type, strike, expiration)
            .with_quote(
                self.bid.unwrap_or(0.0),
                self.ask.unwrap_or(0.0),
                self.last_price.unwrap_or(0.0),
            )
            .with_liquidity(self.volume.unwrap_or(0), self.open_interest.unwrap_or(0));

        if let Some(symbol) = &self.contract_symbol {
            contract = contract.with_symbol(symbol.clone());
        }
        Some(contract)
    }
}

impl OptionsResponse {
    pub fn into_result(self) -> Result<OptionsResult> {
        if let Some(error) = self.option_chain.error {
            return Err(error.into_feed_error());
        }
        self.option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::EmptyResponse("no options data returned".into()))
    }
}

impl OptionsResult {
    pub fn expirations(&self) -> Vec<NaiveDate> {
        self.expiration_dates
            .iter()
            .filter_map(|ts| timestamp_to_date(*ts))
            .collect()
    }

    /// Chain for `expiration`, tagging every contract with that date
    pub fn chain(&self, expiration: NaiveDate) -> OptionChain {
        let mut chain = OptionChain::new();
        for block in &self.options {
            let block_date = block.expiration_date.and_then(timestamp_to_date);
            if block_date.is_some_and(|d| d != expiration) {
                continue;
            }
            for quote in &block.calls {
                if let Some(contract) = quote.to_contract(OptionType::Call, expiration) {
                    chain.push(contract);
                }
            }
            for quote in &block.puts {
                if let Some(contract) = quote.to_contract(OptionType::Put, expiration) {
                    chain.push(contract);
                }
            }
        }
        chain
    }
}

pub fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

/// Unix seconds at 00:00 UTC of `date`, the form the options endpoint expects
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}
