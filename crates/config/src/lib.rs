//! Configuration for OptionScout
//!
//! A single YAML file with environment variable substitution. Every section
//! and field is optional; omitted values take the defaults in [`defaults`].

use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub market_data: MarketDataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_service_version")]
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            version: default_service_version(),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_enabled")]
    pub cors_enabled: bool,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            cors_enabled: default_enabled(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl ServerSection {
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

/// Defaults for recommendation requests
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecommendationConfig {
    /// Business days
    #[serde(default = "default_min_days_to_expiry")]
    pub min_days_to_expiry: u32,
    #[serde(default = "default_min_volume")]
    pub min_volume: u64,
    #[serde(default = "default_min_open_interest")]
    pub min_open_interest: u64,
    #[serde(default = "default_max_theoretical_price")]
    pub max_theoretical_price: f64,
    /// Calendar days of price history for volatility
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    #[serde(default = "default_trading_days_per_year")]
    pub trading_days_per_year: u32,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            min_days_to_expiry: default_min_days_to_expiry(),
            min_volume: default_min_volume(),
            min_open_interest: default_min_open_interest(),
            max_theoretical_price: default_max_theoretical_price(),
            lookback_days: default_lookback_days(),
            trading_days_per_year: default_trading_days_per_year(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MarketDataConfig {
    /// Only `yahoo` is supported
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_risk_free_ticker")]
    pub risk_free_ticker: String,
    #[serde(default = "default_fallback_risk_free_rate")]
    pub fallback_risk_free_rate: f64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            risk_free_ticker: default_risk_free_ticker(),
            fallback_risk_free_rate: default_fallback_risk_free_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `pretty`, `json` or `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

impl Default for ScoutConfig {
    fn default() -> Self {
        generate_default_config()
    }
}
