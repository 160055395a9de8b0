//! Market data provider - trait and in-memory implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::EngineError;
use crate::types::OptionChain;
use crate::Result;

/// Source of spot prices, price history, rates and option chains
///
/// Implementations report fetch failures as [`EngineError::UpstreamData`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest price of the underlying
    async fn spot_price(&self, ticker: &str) -> Result<f64>;

    /// Daily closes over the lookback window, oldest first
    async fn daily_closes(&self, ticker: &str, lookback_days: u32) -> Result<Vec<f64>>;

    /// Annualized risk-free rate as a decimal
    async fn risk_free_rate(&self) -> Result<f64>;

    /// Calls and puts for one expiration
    async fn option_chain(&self, ticker: &str, expiration: NaiveDate) -> Result<OptionChain>;

    /// Listed expiration dates, in provider order
    async fn available_expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>>;
}

/// Per-ticker data held by [`StaticProvider`]
#[derive(Debug, Clone, Default)]
pub struct TickerData {
    pub spot: f64,
    pub closes: Vec<f64>,
    pub chains: Vec<(NaiveDate, OptionChain)>,
}

/// In-memory provider for tests, demos and offline runs
#[derive(Debug, Clone)]
pub struct StaticProvider {
    risk_free_rate: f64,
    tickers: HashMap<String, TickerData>,
}

impl StaticProvider {
    pub fn new(risk_free_rate: f64) -> Self {
        Self {
            risk_free_rate,
            tickers: HashMap::new(),
        }
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>, spot: f64, closes: Vec<f64>) -> Self {
        self.tickers.insert(
            ticker.into().to_uppercase(),
            TickerData {
                spot,
                closes,
                chains: Vec::new(),
            },
        );
        self
    }

    /// Register a chain for an expiration; the ticker must already exist
    pub fn with_chain(mut self, ticker: &str, expiration: NaiveDate, chain: OptionChain) -> Self {
        if let Some(data) = self.tickers.get_mut(&ticker.to_uppercase()) {
            data.chains.push((expiration, chain));
        }
        self
    }

    fn ticker(&self, ticker: &str) -> Result<&TickerData> {
        self.tickers
            .get(&ticker.to_uppercase())
            .ok_or_else(|| EngineError::upstream(format!("no market data for {}", ticker)))
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new(0.01)
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn spot_price(&self, ticker: &str) -> Result<f64> {
        Ok(self.ticker(ticker)?.spot)
    }

    async fn daily_closes(&self, ticker: &str, lookback_days: u32) -> Result<Vec<f64>> {
        let closes = &self.ticker(ticker)?.closes;
        let keep = (lookback_days as usize).min(closes.len());
        Ok(closes[closes.len() - keep..].to_vec())
    }

    async fn risk_free_rate(&self) -> Result<f64> {
        Ok(self.risk_free_rate)
    }

    async fn option_chain(&self, ticker: &str, expiration: NaiveDate) -> Result<OptionChain> {
        self.ticker(ticker)?
            .chains
            .iter()
            .find(|(date, _)| *date == expiration)
            .map(|(_, chain)| chain.clone())
            .ok_or_else(|| {
                EngineError::upstream(format!("no chain for {} expiring {}", ticker, expiration))
            })
    }

    async fn available_expirations(&self, ticker: &str) -> Result<Vec<NaiveDate>> {
        Ok(self.ticker(ticker)?.chains.iter().map(|(date, _)| *date).collect())
    }
}
