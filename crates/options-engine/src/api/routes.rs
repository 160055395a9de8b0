use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::*;

pub fn create_router(state: Arc<ApiState>) -> Router {
    let cors_enabled = state.cors_enabled;

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/options", post(recommend_options))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RecommendationEngine, RecommendationParams};
    use crate::provider::StaticProvider;
    use crate::types::{OptionChain, OptionContract};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    fn closes() -> Vec<f64> {
        vec![100.0, 101.0, 99.5, 102.0, 101.2, 100.4, 99.8, 100.9]
    }

    fn router() -> Router {
        let today = Utc::now().date_naive();
        let far = today + Duration::days(40);
        let near = today + Duration::days(2);

        let provider = StaticProvider::new(0.04)
            .with_ticker("ACME", 100.0, closes())
            .with_chain(
                "ACME",
                far,
                OptionChain::from_contracts(vec![
                    OptionContract::call(105.0, far)
                        .with_liquidity(50, 50)
                        .with_quote(1.0, 1.2, 1.1),
                    OptionContract::put(90.0, far)
                        .with_liquidity(50, 50)
                        .with_quote(0.1, 0.2, 0.15),
                ]),
            )
            .with_ticker("SOON", 20.0, closes())
            .with_chain("SOON", near, OptionChain::new())
            .with_ticker("THIN", 20.0, vec![20.0])
            .with_chain("THIN", far, OptionChain::new());

        let engine = RecommendationEngine::new(Arc::new(provider));
        let state = ApiState::new(engine, RecommendationParams::default()).with_service_name("scout-test");
        create_router(Arc::new(state))
    }

    async fn post_options(body: &str) -> (StatusCode, Value) {
        post_with_content_type(body, "application/json").await
    }

    async fn post_with_content_type(body: &str, content_type: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/options")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "scout-test");
    }

    #[tokio::test]
    async fn test_recommendation_ok() {
        let (status, body) = post_options(r#"{"ticker":"acme"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ticker"], "ACME");
        assert_eq!(body["call"]["status"], "found");
        assert_eq!(body["call"]["strike"], 105.0);
        assert_eq!(body["put"]["status"], "found");
        assert_eq!(body["put"]["strike"], 90.0);
        assert_eq!(body["summary"]["spot_price"], 100.0);
        assert_eq!(body["summary"]["risk_free_rate"], 0.04);
    }

    #[tokio::test]
    async fn test_request_overrides_thresholds() {
        let (status, body) = post_options(r#"{"ticker":"ACME","min_volume":500}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["call"]["status"], "no_qualifying_option");
        assert_eq!(body["put"]["status"], "no_qualifying_option");
    }

    #[tokio::test]
    async fn test_missing_ticker() {
        let (status, body) = post_options("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Ticker is required");

        let (status, _) = post_options(r#"{"ticker":""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_shape() {
        let (status, body) = post_options("ticker=ACME").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

        let (status, body) = post_options(r#"{"ticker":"ACME","min_days":-3}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = post_with_content_type(r#"{"ticker":"ACME"}"#, "text/plain").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_min_days_past_calendar_is_not_found() {
        let (status, body) = post_options(r#"{"ticker":"ACME","min_days":4000000000}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let (status, _) = post_options(r#"{"ticker":"SOON"}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = post_options(r#"{"ticker":"THIN"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = post_options(r#"{"ticker":"NOPE"}"#).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("NOPE"));
    }
}
