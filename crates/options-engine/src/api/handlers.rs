use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ApiError;
use super::models::{HealthResponse, OptionsRequest};
use crate::engine::{RecommendationEngine, RecommendationParams};
use crate::recommendation::Recommendation;
use observability::RecommendationMetrics;

#[derive(Clone)]
pub struct ApiState {
    pub engine: RecommendationEngine,
    /// Used for any field a request leaves out
    pub defaults: RecommendationParams,
    pub service_name: String,
    pub cors_enabled: bool,
    pub metrics: RecommendationMetrics,
}

impl ApiState {
    pub fn new(engine: RecommendationEngine, defaults: RecommendationParams) -> Self {
        Self {
            engine,
            defaults,
            service_name: "scout".to_string(),
            cors_enabled: true,
            metrics: RecommendationMetrics::new("http"),
        }
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors_enabled = enabled;
        self
    }
}

pub async fn health_handler(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.service_name.clone(),
    })
}

pub async fn recommend_options(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<OptionsRequest>, JsonRejection>,
) -> Result<Json<Recommendation>, ApiError> {
    let mut timer = state.metrics.start_request();

    let result = match payload {
        Ok(Json(req)) => run_request(&state, &req).await,
        Err(rejection) => Err(ApiError::from(rejection)),
    };
    match &result {
        Ok(rec) => info!(
            ticker = %rec.ticker,
            call_found = rec.call.is_found(),
            put_found = rec.put.is_found(),
            "Recommendation served"
        ),
        Err(e) => {
            warn!(status = %e.status(), error = %e.message(), "Recommendation failed");
            timer.set_outcome(e.outcome());
        }
    }

    result.map(Json)
}

async fn run_request(state: &ApiState, req: &OptionsRequest) -> Result<Recommendation, ApiError> {
    let ticker = req.ticker().ok_or(ApiError::MissingTicker)?;
    let params = req.params(&state.defaults);

    let today = chrono::Utc::now().date_naive();
    let evaluation = state.engine.evaluate_as_of(ticker, &params, today).await?;

    state
        .metrics
        .record_pricing(evaluation.stats.priced, evaluation.stats.skipped);
    let rec = evaluation.recommendation;
    state.metrics.record_legs(rec.call.is_found(), rec.put.is_found());

    Ok(rec)
}
