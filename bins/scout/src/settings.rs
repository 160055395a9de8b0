//! Mapping from the config file onto engine, feed and server settings

use cli::FilterOverrides;
use config::{MarketDataConfig, RecommendationConfig, ScoutConfig};
use market_feed::YahooConfig;
use observability::LogFormat;
use options_engine::{EngineSettings, FilterThresholds, RecommendationParams};
use server::{validate_port_range, ServerConfig};
use std::time::Duration;

pub fn recommendation_params(rec: &RecommendationConfig) -> RecommendationParams {
    RecommendationParams {
        min_days_to_expiry: rec.min_days_to_expiry,
        thresholds: FilterThresholds {
            min_volume: rec.min_volume,
            min_open_interest: rec.min_open_interest,
            max_theoretical_price: rec.max_theoretical_price,
        },
    }
}

pub fn apply_overrides(params: RecommendationParams, overrides: &FilterOverrides) -> RecommendationParams {
    RecommendationParams {
        min_days_to_expiry: overrides.min_days.unwrap_or(params.min_days_to_expiry),
        thresholds: FilterThresholds {
            min_volume: overrides.min_volume.unwrap_or(params.thresholds.min_volume),
            min_open_interest: overrides
                .min_open_interest
                .unwrap_or(params.thresholds.min_open_interest),
            max_theoretical_price: overrides
                .max_price
                .unwrap_or(params.thresholds.max_theoretical_price),
        },
    }
}

pub fn engine_settings(rec: &RecommendationConfig) -> EngineSettings {
    EngineSettings {
        lookback_days: rec.lookback_days,
        trading_days_per_year: rec.trading_days_per_year,
    }
}

pub fn yahoo_config(md: &MarketDataConfig) -> YahooConfig {
    YahooConfig {
        base_url: md.base_url.clone(),
        timeout: Duration::from_secs(md.timeout_seconds),
        risk_free_ticker: md.risk_free_ticker.clone(),
        fallback_risk_free_rate: md.fallback_risk_free_rate,
    }
}

/// Listener settings with CLI overrides applied
///
/// The resulting port, overrides included, must be non-zero.
pub fn server_config(
    config: &ScoutConfig,
    host: Option<String>,
    http: Option<u16>,
) -> server::Result<ServerConfig> {
    let port = http.unwrap_or(config.server.http_port);
    validate_port_range("HTTP listener", port)?;

    Ok(ServerConfig::new(host.unwrap_or_else(|| config.server.host.clone()), port)
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_seconds)))
}

/// CLI flag first, then the config file; unknown values fall back to pretty
pub fn log_format(flag: Option<cli::LogFormatArg>, config: &ScoutConfig) -> LogFormat {
    flag.map(|f| f.as_str())
        .and_then(LogFormat::parse)
        .or_else(|| LogFormat::parse(&config.logging.format))
        .unwrap_or_default()
}
