//! Observability for OptionScout
//!
//! - Structured logging via tracing
//! - Prometheus metrics for the recommendation pipeline
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("scout", LogFormat::Pretty)?;
//!
//! // optional
//! observability::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::{init_logging, init_logging_with_directive, with_startup_logging, LogFormat};
pub use self::metrics::{init_metrics, RecommendationMetrics, RequestOutcome, RequestTimer};
