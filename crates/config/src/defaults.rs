pub fn default_enabled() -> bool {
    true
}

pub fn default_service_name() -> String {
    "scout".to_string()
}

pub fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Server defaults
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_http_port() -> u16 {
    5000
}

pub fn default_request_timeout_seconds() -> u64 {
    30
}

// Recommendation defaults
pub fn default_min_days_to_expiry() -> u32 {
    5
}

pub fn default_min_volume() -> u64 {
    10
}

pub fn default_min_open_interest() -> u64 {
    10
}

pub fn default_max_theoretical_price() -> f64 {
    2.0
}

pub fn default_lookback_days() -> u32 {
    30
}

pub fn default_trading_days_per_year() -> u32 {
    252
}

// Market data defaults
pub fn default_provider() -> String {
    "yahoo".to_string()
}

pub fn default_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

pub fn default_timeout_seconds() -> u64 {
    10
}

pub fn default_risk_free_ticker() -> String {
    "^TNX".to_string()
}

pub fn default_fallback_risk_free_rate() -> f64 {
    0.01
}

// Observability defaults
pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_metrics_port() -> u16 {
    9090
}
