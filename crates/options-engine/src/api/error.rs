use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use observability::RequestOutcome;

use super::models::ErrorResponse;
use crate::error::EngineError;

#[derive(Debug)]
pub enum ApiError {
    MissingTicker,
    /// Body is not a JSON object of the expected shape
    InvalidBody(String),
    Engine(EngineError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingTicker | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(e) => match e {
                EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                EngineError::NoExpirationsAvailable { .. } => StatusCode::NOT_FOUND,
                EngineError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                EngineError::UpstreamData(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn outcome(&self) -> RequestOutcome {
        match self.status() {
            StatusCode::BAD_REQUEST => RequestOutcome::InvalidInput,
            StatusCode::NOT_FOUND => RequestOutcome::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => RequestOutcome::InsufficientData,
            _ => RequestOutcome::UpstreamError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MissingTicker => "Ticker is required".to_string(),
            ApiError::InvalidBody(detail) => format!("Invalid request body: {}", detail),
            ApiError::Engine(e) => e.to_string(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        ApiError::Engine(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
