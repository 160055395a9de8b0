//! Yahoo Finance client
//!
//! Uses the unofficial chart (`/v8/finance/chart`) and options
//! (`/v7/finance/options`) endpoints. Data is delayed and meant for
//! personal use.

use async_trait::async_trait;
use chrono::NaiveDate;
use options_engine::{MarketDataProvider, OptionChain};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::FeedError;
use crate::models::{date_to_timestamp, ChartResponse, ChartResult, OptionsResponse, OptionsResult};
use crate::Result;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Connection settings for [`YahooClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Quoted in percent, e.g. `^TNX` at 4.25 means 0.0425
    pub risk_free_ticker: String,
    /// Used when the rate lookup fails or returns nothing
    pub fallback_risk_free_rate: f64,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(10),
            risk_free_ticker: "^TNX".to_string(),
            fallback_risk_free_rate: 0.01,
        }
    }
}

#[derive(Debug)]
pub struct YahooClient {
    http: reqwest::Client,
    base_url: Url,
    config: YahooConfig,
}

impl YahooClient {
    pub fn new(config: YahooConfig) -> Result<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| FeedError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FeedError::InvalidUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// `{base}/{segments...}`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FeedError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        debug!(%url, ?query, "GET");

        let response = self.http.get(url.clone()).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FeedError::Parse(e.to_string()))
    }

    /// Daily bars over the last `range_days` days
    pub async fn chart(&self, symbol: &str, range_days: u32) -> Result<ChartResult> {
        let url = self.endpoint(&["v8", "finance", "chart", symbol])?;
        let query = [
            ("range", format!("{}d", range_days.max(1))),
            ("interval", "1d".to_string()),
        ];
        let response: ChartResponse = self.get_json(url, &query).await?;
        response.into_result()
    }

    pub async fn options(
        &self,
        symbol: &str,
        expiration: Option<NaiveDate>,
    ) -> Result<OptionsResult> {
        let url = self.endpoint(&["v7", "finance", "options", symbol])?;
        let query: Vec<(&str, String)> = expiration
            .map(|d| vec![("date", date_to_timestamp(d).to_string())])
            .unwrap_or_default();
        let response: OptionsResponse = self.get_json(url, &query).await?;
        response.into_result()
    }

    async fn fetch_risk_free_rate(&self) -> Result<f64> {
        let chart = self.chart(&self.config.risk_free_ticker, 5).await?;
        let quoted = chart
            .spot()
            .ok_or_else(|| FeedError::EmptyResponse("no treasury yield returned".into()))?;
        Ok(quoted / 100.0)
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    #[instrument(skip(self))]
    async fn spot_price(&self, ticker: &str) -> options_engine::Result<f64> {
        let chart = self.chart(ticker, 5).await?;
        chart.spot().ok_or_else(|| {
            FeedError::EmptyResponse(format!("no price for {}", ticker)).into()
        })
    }

    #[instrument(skip(self))]
    async fn daily_closes(&self, ticker: &str, lookback_days: u32) -> options_engine::Result<Vec<f64>> {
        let closes = self.chart(ticker, lookback_days).await?.closes();
        debug!(count = closes.len(), "Fetched daily closes");
        Ok(closes)
    }

    async fn risk_free_rate(&self) -> options_engine::Result<f64> {
        match self.fetch_risk_free_rate().await {
            Ok(rate) if rate.is_finite() => Ok(rate),
            Ok(rate) => {
                warn!(rate, "Non-finite treasury yield, using fallback rate");
                Ok(self.config.fallback_risk_free_rate)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = self.config.fallback_risk_free_rate,
                    "Error fetching risk-free rate, using fallback"
                );
                Ok(self.config.fallback_risk_free_rate)
            }
        }
    }

    #[instrument(skip(self))]
    async fn option_chain(&self, ticker: &str, expiration: NaiveDate) -> options_engine::Result<OptionChain> {
        let result = self.options(ticker, Some(expiration)).await?;
        Ok(result.chain(expiration))
    }

    #[instrument(skip(self))]
    async fn available_expirations(&self, ticker: &str) -> options_engine::Result<Vec<NaiveDate>> {
        Ok(self.options(ticker, None).await?.expirations())
    }
}
