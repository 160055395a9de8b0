//! Options engine error types

use thiserror::Error;

/// Errors that can occur while pricing, filtering or recommending options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Numeric input outside the domain of the pricing model
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not enough price history to estimate volatility
    #[error("Insufficient data: need at least {required} price points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// No expiration date is far enough out
    #[error("No expirations available for {ticker} at least {min_days} business days out")]
    NoExpirationsAvailable { ticker: String, min_days: u32 },

    /// Market data collaborator failed or returned unusable data
    #[error("Upstream data error: {0}")]
    UpstreamData(String),
}

impl EngineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamData(message.into())
    }
}
