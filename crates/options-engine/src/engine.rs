use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::chain_filter::{self, FilterThresholds};
use crate::error::EngineError;
use crate::expiry::qualifying_expirations;
use crate::pricing::price_chain;
use crate::provider::MarketDataProvider;
use crate::recommendation::{assemble, Recommendation};
use crate::selector::select_otm;
use crate::types::{MarketSnapshot, OptionChain};
use crate::volatility::{self, TRADING_DAYS_PER_YEAR};
use crate::Result;

pub const DEFAULT_MIN_DAYS_TO_EXPIRY: u32 = 5;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Per-request knobs of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationParams {
    /// Minimum business days between today and expiration
    pub min_days_to_expiry: u32,
    pub thresholds: FilterThresholds,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self {
            min_days_to_expiry: DEFAULT_MIN_DAYS_TO_EXPIRY,
            thresholds: FilterThresholds::default(),
        }
    }
}

impl RecommendationParams {
    pub fn validate(&self) -> Result<()> {
        if !self.thresholds.max_theoretical_price.is_finite() {
            return Err(EngineError::invalid_input(format!(
                "max_theoretical_price must be finite, got {}",
                self.thresholds.max_theoretical_price
            )));
        }
        Ok(())
    }
}

/// Engine-wide settings that do not change between requests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Calendar days of closes used for historical volatility
    pub lookback_days: u32,
    pub trading_days_per_year: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

/// Contract counts through each pipeline stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub expirations: usize,
    pub contracts: usize,
    pub priced: usize,
    pub skipped: usize,
    pub retained: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub recommendation: Recommendation,
    pub stats: PipelineStats,
}

/// Price, filter and select over an already-fetched chain
///
/// This is the pure core of [`RecommendationEngine::recommend`].
pub fn evaluate(
    ticker: &str,
    chain: OptionChain,
    snapshot: MarketSnapshot,
    thresholds: &FilterThresholds,
    as_of: NaiveDate,
) -> Evaluation {
    let contracts = chain.len();
    let priced = price_chain(chain, &snapshot, as_of);
    let filtered = chain_filter::filter_chain(&priced.chain, thresholds);

    debug!(
        contracts,
        priced = priced.priced,
        skipped = priced.skipped,
        retained_calls = filtered.calls.len(),
        retained_puts = filtered.puts.len(),
        "Chain priced and filtered"
    );

    let (call, put) = select_otm(&filtered.calls, &filtered.puts, snapshot.spot_price);

    if call.is_none() {
        warn!(ticker, "No qualifying call options found");
    }
    if put.is_none() {
        warn!(ticker, "No qualifying put options found");
    }

    Evaluation {
        recommendation: assemble(ticker, call.as_ref(), put.as_ref(), snapshot),
        stats: PipelineStats {
            expirations: 0,
            contracts,
            priced: priced.priced,
            skipped: priced.skipped,
            retained: filtered.len(),
        },
    }
}

/// Composes the market data provider with the pricing pipeline
#[derive(Clone)]
pub struct RecommendationEngine {
    provider: Arc<dyn MarketDataProvider>,
    settings: EngineSettings,
}

impl RecommendationEngine {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_settings(provider, EngineSettings::default())
    }

    pub fn with_settings(provider: Arc<dyn MarketDataProvider>, settings: EngineSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Recommend one OTM call and put for `ticker` as of today (UTC)
    pub async fn recommend(&self, ticker: &str, params: &RecommendationParams) -> Result<Recommendation> {
        let today = Utc::now().date_naive();
        Ok(self.evaluate_as_of(ticker, params, today).await?.recommendation)
    }

    #[instrument(skip(self, params), fields(min_days = params.min_days_to_expiry))]
    pub async fn evaluate_as_of(
        &self,
        ticker: &str,
        params: &RecommendationParams,
        today: NaiveDate,
    ) -> Result<Evaluation> {
        let ticker = normalize_ticker(ticker)?;
        params.validate()?;

        info!(ticker = %ticker, "Computing option recommendation");

        let spot = self.provider.spot_price(&ticker).await?;
        if !(spot.is_finite() && spot > 0.0) {
            return Err(EngineError::upstream(format!(
                "invalid spot price for {}: {}",
                ticker, spot
            )));
        }
        debug!(spot, "Current stock price");

        let listed = self.provider.available_expirations(&ticker).await?;
        let expirations = qualifying_expirations(&listed, today, params.min_days_to_expiry);
        if expirations.is_empty() {
            return Err(EngineError::NoExpirationsAvailable {
                ticker,
                min_days: params.min_days_to_expiry,
            });
        }
        info!(count = expirations.len(), first = %expirations[0], "Valid expiration dates");

        let chain = self.fetch_chains(&ticker, &expirations).await;

        let risk_free_rate = self.provider.risk_free_rate().await?;
        let closes = self
            .provider
            .daily_closes(&ticker, self.settings.lookback_days)
            .await?;
        let annualized_volatility =
            volatility::annualized_volatility(&closes, self.settings.trading_days_per_year)?;

        if annualized_volatility <= 0.0 {
            warn!(
                ticker = %ticker,
                "Zero historical volatility; no contract can be priced"
            );
        }

        let snapshot = MarketSnapshot {
            spot_price: spot,
            risk_free_rate,
            annualized_volatility,
        };
        info!(
            spot_price = snapshot.spot_price,
            risk_free_rate = snapshot.risk_free_rate,
            annualized_volatility = snapshot.annualized_volatility,
            "Calculation summary"
        );

        let mut evaluation = evaluate(&ticker, chain, snapshot, &params.thresholds, today);
        evaluation.stats.expirations = expirations.len();
        Ok(evaluation)
    }

    /// Fetch all chains concurrently and merge them in expiration order
    async fn fetch_chains(&self, ticker: &str, expirations: &[NaiveDate]) -> OptionChain {
        let fetches = expirations
            .iter()
            .map(|expiration| self.provider.option_chain(ticker, *expiration));
        let results = join_all(fetches).await;

        let mut merged = OptionChain::new();
        for (expiration, result) in expirations.iter().zip(results) {
            match result {
                Ok(chain) => merged.merge(chain),
                Err(e) => warn!(%expiration, error = %e, "Failed to fetch option chain"),
            }
        }
        merged
    }
}

fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(EngineError::invalid_input("ticker is required"));
    }
    Ok(ticker.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockMarketDataProvider, StaticProvider};
    use crate::recommendation::LegSelection;
    use crate::types::OptionContract;
    use assert_matches::assert_matches;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 14)
    }

    fn closes() -> Vec<f64> {
        vec![100.0, 101.0, 99.5, 102.0, 101.2, 100.4, 99.8, 100.9]
    }

    fn liquid(contract: OptionContract) -> OptionContract {
        contract.with_liquidity(50, 50).with_quote(0.4, 0.5, 0.45)
    }

    fn provider() -> StaticProvider {
        let near = date(2026, 10, 16);
        let nov = date(2026, 11, 20);
        let dec = date(2026, 12, 18);

        StaticProvider::new(0.04)
            .with_ticker("ACME", 100.0, closes())
            .with_chain(
                "ACME",
                near,
                OptionChain::from_contracts(vec![
                    liquid(OptionContract::call(101.0, near)),
                    liquid(OptionContract::put(99.0, near)),
                ]),
            )
            .with_chain(
                "ACME",
                nov,
                OptionChain::from_contracts(vec![
                    liquid(OptionContract::call(95.0, nov)),
                    liquid(OptionContract::call(105.0, nov)),
                    liquid(OptionContract::call(110.0, nov)),
                    OptionContract::call(102.0, nov).with_liquidity(5, 5),
                    liquid(OptionContract::put(90.0, nov)),
                    liquid(OptionContract::put(85.0, nov)),
                ]),
            )
            .with_chain(
                "ACME",
                dec,
                OptionChain::from_contracts(vec![liquid(OptionContract::call(105.0, dec))]),
            )
    }

    fn engine(provider: impl MarketDataProvider + 'static) -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_end_to_end_selection() {
        let evaluation = engine(provider())
            .evaluate_as_of("acme", &RecommendationParams::default(), today())
            .await
            .unwrap();
        let rec = &evaluation.recommendation;

        assert_eq!(rec.ticker, "ACME");

        // 101/99 expire too soon, 102 is illiquid, 95 is ITM with a price above the cap
        let call = rec.call.selected().unwrap();
        assert_eq!(call.strike, 105.0);
        assert_eq!(call.expiration, date(2026, 11, 20));
        assert_eq!(call.description, "11/20/26 105.00 Call");
        assert!(call.theoretical_price <= 2.0);

        let put = rec.put.selected().unwrap();
        assert_eq!(put.strike, 90.0);

        assert_eq!(rec.summary.spot_price, 100.0);
        assert_eq!(rec.summary.risk_free_rate, 0.04);
        assert!(rec.summary.annualized_volatility > 0.0);

        assert_eq!(evaluation.stats.expirations, 2);
        assert_eq!(evaluation.stats.contracts, 7);
        assert_eq!(evaluation.stats.priced, 7);
    }

    #[tokio::test]
    async fn test_price_cap_can_empty_a_leg() {
        let params = RecommendationParams {
            thresholds: FilterThresholds {
                max_theoretical_price: 0.0001,
                ..FilterThresholds::default()
            },
            ..RecommendationParams::default()
        };

        let rec = engine(provider())
            .evaluate_as_of("ACME", &params, today())
            .await
            .unwrap()
            .recommendation;

        assert_eq!(rec.call, LegSelection::NoQualifyingOption);
        assert_eq!(rec.put, LegSelection::NoQualifyingOption);
    }

    #[tokio::test]
    async fn test_empty_chain_returns_absent_legs() {
        let exp = date(2026, 11, 20);
        let provider = StaticProvider::new(0.02)
            .with_ticker("EMPTY", 50.0, closes())
            .with_chain("EMPTY", exp, OptionChain::new());

        let rec = engine(provider)
            .evaluate_as_of("EMPTY", &RecommendationParams::default(), today())
            .await
            .unwrap()
            .recommendation;

        assert!(!rec.call.is_found());
        assert!(!rec.put.is_found());
        assert_eq!(rec.summary.spot_price, 50.0);
        assert_eq!(rec.summary.risk_free_rate, 0.02);
    }

    #[tokio::test]
    async fn test_no_expirations_far_enough() {
        let near = date(2026, 10, 16);
        let provider = StaticProvider::default()
            .with_ticker("SOON", 20.0, closes())
            .with_chain("SOON", near, OptionChain::new());

        let result = engine(provider)
            .evaluate_as_of("SOON", &RecommendationParams::default(), today())
            .await;

        assert_matches!(
            result,
            Err(EngineError::NoExpirationsAvailable { ref ticker, min_days: 5 }) if ticker == "SOON"
        );
    }

    #[tokio::test]
    async fn test_min_days_beyond_calendar_finds_nothing() {
        let params = RecommendationParams {
            min_days_to_expiry: 2_000_000_000,
            ..RecommendationParams::default()
        };

        let result = engine(provider()).evaluate_as_of("ACME", &params, today()).await;

        assert_matches!(
            result,
            Err(EngineError::NoExpirationsAvailable { min_days: 2_000_000_000, .. })
        );
    }

    #[tokio::test]
    async fn test_zero_volatility_yields_no_selection() {
        let exp = date(2026, 11, 20);
        let provider = StaticProvider::default()
            .with_ticker("FLAT", 100.0, vec![100.0; 20])
            .with_chain(
                "FLAT",
                exp,
                OptionChain::from_contracts(vec![liquid(OptionContract::call(105.0, exp))]),
            );

        let evaluation = engine(provider)
            .evaluate_as_of("FLAT", &RecommendationParams::default(), today())
            .await
            .unwrap();

        assert_eq!(evaluation.recommendation.summary.annualized_volatility, 0.0);
        assert!(!evaluation.recommendation.call.is_found());
        assert_eq!(evaluation.stats.skipped, 1);
    }

    #[tokio::test]
    async fn test_insufficient_history_fails_request() {
        let exp = date(2026, 11, 20);
        let provider = StaticProvider::default()
            .with_ticker("NEW", 10.0, vec![10.0])
            .with_chain("NEW", exp, OptionChain::new());

        let result = engine(provider)
            .evaluate_as_of("NEW", &RecommendationParams::default(), today())
            .await;

        assert_matches!(result, Err(EngineError::InsufficientData { actual: 1, .. }));
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_upstream_error() {
        let result = engine(provider())
            .evaluate_as_of("NOPE", &RecommendationParams::default(), today())
            .await;
        assert_matches!(result, Err(EngineError::UpstreamData(_)));
    }

    #[tokio::test]
    async fn test_blank_ticker_rejected() {
        let result = engine(provider())
            .evaluate_as_of("   ", &RecommendationParams::default(), today())
            .await;
        assert_matches!(result, Err(EngineError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_non_positive_spot_stops_before_chains() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_spot_price().returning(|_| Ok(0.0));
        mock.expect_available_expirations().never();
        mock.expect_option_chain().never();

        let result = engine(mock)
            .evaluate_as_of("ZERO", &RecommendationParams::default(), today())
            .await;

        assert_matches!(result, Err(EngineError::UpstreamData(_)));
    }

    #[tokio::test]
    async fn test_failed_chain_fetch_is_skipped() {
        let nov = date(2026, 11, 20);
        let dec = date(2026, 12, 18);

        let mut mock = MockMarketDataProvider::new();
        mock.expect_spot_price().returning(|_| Ok(100.0));
        mock.expect_available_expirations()
            .returning(move |_| Ok(vec![dec, nov]));
        mock.expect_option_chain().times(2).returning(move |_, expiration| {
            if expiration == nov {
                Err(EngineError::upstream("timeout"))
            } else {
                Ok(OptionChain::from_contracts(vec![
                    OptionContract::call(104.0, expiration)
                        .with_liquidity(50, 50)
                        .with_quote(1.0, 1.2, 1.1),
                ]))
            }
        });
        mock.expect_risk_free_rate().returning(|| Ok(0.03));
        mock.expect_daily_closes()
            .withf(|ticker, lookback| ticker.eq_ignore_ascii_case("MIX") && *lookback == DEFAULT_LOOKBACK_DAYS)
            .returning(|_, _| Ok(vec![100.0, 101.0, 99.5, 102.0, 101.2]));

        let evaluation = engine(mock)
            .evaluate_as_of("mix", &RecommendationParams::default(), today())
            .await
            .unwrap();

        let call = evaluation.recommendation.call.selected().unwrap();
        assert_eq!(call.expiration, dec);
        assert_eq!(evaluation.stats.contracts, 1);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let exp = date(2026, 11, 20);
        let chain = OptionChain::from_contracts(vec![
            liquid(OptionContract::call(103.0, exp)),
            liquid(OptionContract::call(106.0, exp)),
            liquid(OptionContract::put(96.0, exp)),
        ]);
        let snapshot = MarketSnapshot {
            spot_price: 100.0,
            risk_free_rate: 0.01,
            annualized_volatility: 0.2,
        };

        let first = evaluate("T", chain.clone(), snapshot, &FilterThresholds::default(), today());
        let second = evaluate("T", chain, snapshot, &FilterThresholds::default(), today());

        assert_eq!(first, second);
    }

    #[test]
    fn test_params_reject_nan_cap() {
        let params = RecommendationParams {
            thresholds: FilterThresholds {
                max_theoretical_price: f64::NAN,
                ..FilterThresholds::default()
            },
            ..RecommendationParams::default()
        };
        assert!(params.validate().is_err());
    }
}
