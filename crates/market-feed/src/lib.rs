//! Market data feeds for OptionScout
//!
//! [`YahooClient`] implements [`options_engine::MarketDataProvider`] against
//! Yahoo Finance's public chart and options endpoints.

pub mod error;
pub mod models;
pub mod yahoo;

pub use error::FeedError;
pub use yahoo::{YahooClient, YahooConfig};

/// Result type for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;
