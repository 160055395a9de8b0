use serde::{Deserialize, Serialize};

use crate::chain_filter::FilterThresholds;
use crate::engine::RecommendationParams;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Body of `POST /api/options`; omitted fields fall back to configured defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptionsRequest {
    pub ticker: Option<String>,
    pub min_days: Option<u32>,
    pub min_volume: Option<u64>,
    pub min_open_interest: Option<u64>,
    pub max_theoretical_price: Option<f64>,
}

impl OptionsRequest {
    /// Trimmed ticker, if one was given
    pub fn ticker(&self) -> Option<&str> {
        self.ticker
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn params(&self, defaults: &RecommendationParams) -> RecommendationParams {
        RecommendationParams {
            min_days_to_expiry: self.min_days.unwrap_or(defaults.min_days_to_expiry),
            thresholds: FilterThresholds {
                min_volume: self.min_volume.unwrap_or(defaults.thresholds.min_volume),
                min_open_interest: self
                    .min_open_interest
                    .unwrap_or(defaults.thresholds.min_open_interest),
                max_theoretical_price: self
                    .max_theoretical_price
                    .unwrap_or(defaults.thresholds.max_theoretical_price),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
