use crate::*;
use regex::Regex;
use thiserror::Error;
use url::Url;

pub const SUPPORTED_PROVIDERS: [&str; 1] = ["yahoo"];
pub const SUPPORTED_LOG_FORMATS: [&str; 3] = ["pretty", "json", "compact"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Service name is required")]
    MissingServiceName,

    #[error("Invalid version format: {0}. Must be in format X.Y.Z (e.g., 1.0.0)")]
    InvalidVersionFormat(String),

    #[error("Server host is required")]
    MissingHost,

    #[error("{field} must be a non-zero port")]
    InvalidPort { field: String },

    #[error("server.http_port and metrics.port are both {port}")]
    PortConflict { port: u16 },

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("{field} must be a non-negative number, got {value}")]
    InvalidNonNegativeFloat { field: String, value: f64 },

    #[error("Invalid market data provider: {0}. Supported: yahoo")]
    InvalidProvider(String),

    #[error("Invalid base_url '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Environment variable '{var}' is missing or invalid: {message}")]
    InvalidEnvVar { var: String, message: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

pub fn validate_config(config: &ScoutConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_service(&config.service, &mut report);
    validate_server(&config.server, &mut report);
    validate_recommendation(&config.recommendation, &mut report);
    validate_market_data(&config.market_data, &mut report);
    validate_observability(config, &mut report);

    report
}

/// Like [`validate_config`], also noting which fields were left to defaults
///
/// `raw` is the YAML the config was loaded from.
pub fn validate_config_source(config: &ScoutConfig, raw: &str) -> ValidationReport {
    let mut report = validate_config(config);
    let source: serde_yaml::Value = serde_yaml::from_str(raw).unwrap_or(serde_yaml::Value::Null);

    let defaults = generate_default_config();
    let fields: [(&str, &str, String); 8] = [
        ("server", "http_port", defaults.server.http_port.to_string()),
        ("recommendation", "min_days_to_expiry", defaults.recommendation.min_days_to_expiry.to_string()),
        ("recommendation", "min_volume", defaults.recommendation.min_volume.to_string()),
        ("recommendation", "min_open_interest", defaults.recommendation.min_open_interest.to_string()),
        ("recommendation", "max_theoretical_price", defaults.recommendation.max_theoretical_price.to_string()),
        ("recommendation", "lookback_days", defaults.recommendation.lookback_days.to_string()),
        ("market_data", "provider", defaults.market_data.provider.clone()),
        ("logging", "format", defaults.logging.format.clone()),
    ];

    for (section, key, value) in fields {
        let present = source
            .get(section)
            .and_then(|s| s.get(key))
            .is_some();
        if !present {
            report.add_default(&format!("{}.{}", section, key), &value);
        }
    }

    report
}

fn validate_service(service: &ServiceConfig, report: &mut ValidationReport) {
    if service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingServiceName);
    }

    let version_ok = Regex::new(r"^\d+\.\d+\.\d+$")
        .map(|re| re.is_match(&service.version))
        .unwrap_or(false);
    if !version_ok {
        report.add_error(ValidationError::InvalidVersionFormat(service.version.clone()));
    }
}

fn validate_server(server: &ServerSection, report: &mut ValidationReport) {
    check_env_placeholder("server.host", &server.host, report);

    if server.host.trim().is_empty() {
        report.add_error(ValidationError::MissingHost);
    }

    if server.http_port == 0 {
        report.add_error(ValidationError::InvalidPort {
            field: "server.http_port".to_string(),
        });
    } else if server.http_port < 1024 {
        report.add_warning(
            "server.http_port",
            "Ports below 1024 usually require elevated privileges",
        );
    }

    if server.request_timeout_seconds == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "server.request_timeout_seconds".to_string(),
        });
    }
}

fn validate_recommendation(rec: &RecommendationConfig, report: &mut ValidationReport) {
    if !(rec.max_theoretical_price.is_finite() && rec.max_theoretical_price >= 0.0) {
        report.add_error(ValidationError::InvalidNonNegativeFloat {
            field: "recommendation.max_theoretical_price".to_string(),
            value: rec.max_theoretical_price,
        });
    }

    // one close only yields no return at all
    if rec.lookback_days < 2 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "recommendation.lookback_days (at least 2)".to_string(),
        });
    } else if rec.lookback_days < 10 {
        report.add_warning(
            "recommendation.lookback_days",
            "Short lookback windows give noisy volatility estimates",
        );
    }

    if rec.trading_days_per_year == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "recommendation.trading_days_per_year".to_string(),
        });
    }

    if rec.min_days_to_expiry == 0 {
        report.add_warning(
            "recommendation.min_days_to_expiry",
            "Zero allows options expiring today, which cannot be priced",
        );
    }
}

fn validate_market_data(md: &MarketDataConfig, report: &mut ValidationReport) {
    if !SUPPORTED_PROVIDERS.contains(&md.provider.as_str()) {
        report.add_error(ValidationError::InvalidProvider(md.provider.clone()));
    }

    check_env_placeholder("market_data.base_url", &md.base_url, report);

    if md.provider == "yahoo" {
        match Url::parse(&md.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                if url.scheme() == "http" {
                    report.add_warning("market_data.base_url", "Using plain HTTP for market data");
                }
            }
            Ok(url) => report.add_error(ValidationError::InvalidBaseUrl {
                url: md.base_url.clone(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => report.add_error(ValidationError::InvalidBaseUrl {
                url: md.base_url.clone(),
                message: e.to_string(),
            }),
        }
    }

    if md.timeout_seconds == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "market_data.timeout_seconds".to_string(),
        });
    }

    if md.risk_free_ticker.trim().is_empty() {
        report.add_warning(
            "market_data.risk_free_ticker",
            "No rate ticker; the fallback rate is always used",
        );
    }

    if !(md.fallback_risk_free_rate.is_finite() && md.fallback_risk_free_rate >= 0.0) {
        report.add_error(ValidationError::InvalidNonNegativeFloat {
            field: "market_data.fallback_risk_free_rate".to_string(),
            value: md.fallback_risk_free_rate,
        });
    } else if md.fallback_risk_free_rate > 0.25 {
        report.add_warning(
            "market_data.fallback_risk_free_rate",
            "Rate is a decimal; values above 0.25 look like a percentage",
        );
    }
}

fn validate_observability(config: &ScoutConfig, report: &mut ValidationReport) {
    let format = config.logging.format.to_lowercase();
    if !SUPPORTED_LOG_FORMATS.contains(&format.as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(config.logging.format.clone()));
    }

    if config.metrics.enabled {
        if config.metrics.port == 0 {
            report.add_error(ValidationError::InvalidPort {
                field: "metrics.port".to_string(),
            });
        } else if config.metrics.port == config.server.http_port {
            report.add_error(ValidationError::PortConflict {
                port: config.metrics.port,
            });
        }
    }
}

fn check_env_placeholder(field: &str, value: &str, report: &mut ValidationReport) {
    if has_unresolved_env_vars(value) {
        report.add_error(ValidationError::InvalidEnvVar {
            var: value.to_string(),
            message: format!("{} was not substituted", field),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let report = validate_config(&generate_default_config());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_bad_values_collected() {
        let mut config = generate_default_config();
        config.service.version = "v1".to_string();
        config.server.http_port = 0;
        config.recommendation.max_theoretical_price = -1.0;
        config.market_data.provider = "bloomberg".to_string();
        config.logging.format = "xml".to_string();

        let report = validate_config(&config);

        assert!(!report.is_valid());
        assert!(report.errors.contains(&ValidationError::InvalidVersionFormat("v1".into())));
        assert!(report.errors.contains(&ValidationError::InvalidProvider("bloomberg".into())));
        assert!(report.errors.contains(&ValidationError::InvalidLogFormat("xml".into())));
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidPort { field } if field == "server.http_port")));
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidNonNegativeFloat { .. })));
    }

    #[test]
    fn test_base_url_scheme() {
        let mut config = generate_default_config();
        config.market_data.base_url = "ftp://example.com".to_string();
        assert!(!validate_config(&config).is_valid());

        config.market_data.base_url = "http://localhost:8080".to_string();
        let report = validate_config(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].field, "market_data.base_url");
    }

    #[test]
    fn test_unresolved_placeholder_is_error() {
        let mut config = generate_default_config();
        config.market_data.base_url = "${SCOUT_FEED_URL}".to_string();

        let report = validate_config(&config);

        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidEnvVar { .. })));
    }

    #[test]
    fn test_metrics_port_conflict() {
        let mut config = generate_default_config();
        config.metrics.enabled = true;
        config.metrics.port = config.server.http_port;

        let report = validate_config(&config);
        assert_eq!(report.errors, vec![ValidationError::PortConflict { port: 5000 }]);
    }

    #[test]
    fn test_percentage_rate_warns() {
        let mut config = generate_default_config();
        config.market_data.fallback_risk_free_rate = 4.5;

        let report = validate_config(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].field, "market_data.fallback_risk_free_rate");
    }

    #[test]
    fn test_defaults_applied_reported() {
        let raw = "recommendation:\n  min_volume: 25\n";
        let config = parse_config(raw).unwrap();

        let report = validate_config_source(&config, raw);

        let fields: Vec<&str> = report.defaults_applied.iter().map(|d| d.field.as_str()).collect();
        assert!(fields.contains(&"server.http_port"));
        assert!(fields.contains(&"recommendation.max_theoretical_price"));
        assert!(!fields.contains(&"recommendation.min_volume"));
    }
}
