//! Prometheus metrics
//!
//! The exporter is optional; without it every metric call is a no-op.

use metrics::{counter, histogram, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Start the Prometheus exporter on `0.0.0.0:{port}/metrics`
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new().with_http_listener(addr).install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// How a recommendation request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    InvalidInput,
    NotFound,
    InsufficientData,
    UpstreamError,
}

impl RequestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::InsufficientData => "insufficient_data",
            Self::UpstreamError => "upstream_error",
        }
    }
}

/// Metrics for the recommendation pipeline
///
/// # Metrics
///
/// * `recommendation_requests_total{outcome}` - Requests by outcome
/// * `recommendation_duration_seconds` - End-to-end request latency
/// * `contracts_priced_total` / `contracts_skipped_total` - Pricing results
/// * `legs_found_total{leg}` - Legs with a qualifying contract
#[derive(Clone)]
pub struct RecommendationMetrics {
    duration: Histogram,
    source: String,
}

impl RecommendationMetrics {
    /// `source` labels where requests come from, e.g. "http"
    pub fn new(source: &str) -> Self {
        let source = source.to_string();
        Self {
            duration: histogram!("recommendation_duration_seconds", "source" => source.clone()),
            source,
        }
    }

    pub fn record_request(&self, duration: Duration, outcome: RequestOutcome) {
        counter!(
            "recommendation_requests_total",
            "source" => self.source.clone(),
            "outcome" => outcome.as_str()
        )
        .increment(1);
        self.duration.record(duration.as_secs_f64());
    }

    pub fn record_pricing(&self, priced: usize, skipped: usize) {
        counter!("contracts_priced_total").increment(priced as u64);
        counter!("contracts_skipped_total").increment(skipped as u64);
    }

    pub fn record_legs(&self, call_found: bool, put_found: bool) {
        if call_found {
            counter!("legs_found_total", "leg" => "call").increment(1);
        }
        if put_found {
            counter!("legs_found_total", "leg" => "put").increment(1);
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Start timing a request; the outcome is recorded on drop
    pub fn start_request(&self) -> RequestTimer<'_> {
        RequestTimer {
            metrics: self,
            start: Instant::now(),
            outcome: RequestOutcome::Success,
        }
    }
}

/// Records duration and outcome when dropped
///
/// ```ignore
/// let metrics = RecommendationMetrics::new("http");
/// {
///     let mut timer = metrics.start_request();
///     // ... handle request ...
///     timer.set_outcome(RequestOutcome::NotFound);
/// }
/// ```
pub struct RequestTimer<'a> {
    metrics: &'a RecommendationMetrics,
    start: Instant,
    outcome: RequestOutcome,
}

impl RequestTimer<'_> {
    pub fn set_outcome(&mut self, outcome: RequestOutcome) {
        self.outcome = outcome;
    }
}

impl Drop for RequestTimer<'_> {
    fn drop(&mut self) {
        self.metrics
            .record_request(self.start.elapsed(), self.outcome);
    }
}
