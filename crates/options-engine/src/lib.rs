//! Option pricing and selection engine for OptionScout
//!
//! Given a ticker, the engine fetches spot, price history, the risk-free rate
//! and the option chain, prices every contract with Black-Scholes, drops
//! illiquid or expensive contracts and picks the nearest out-of-the-money
//! call and put.
//!
//! # Core Components
//!
//! - [`black_scholes`] - European option pricing
//! - [`volatility`] - Historical volatility from daily closes
//! - [`expiry`] - Business-day expiration cutoff and time to expiry
//! - [`pricing`] - Theoretical prices over a whole chain
//! - [`chain_filter`] - Liquidity and price thresholds
//! - [`selector`] - Nearest OTM selection
//! - [`recommendation`] - Output payload
//! - [`engine`] - End-to-end orchestration over a [`MarketDataProvider`]
//!
//! # Key Invariants
//!
//! - A selected call has strike above spot, a selected put strike below spot
//! - Every selected contract passed both the liquidity and price filters
//! - The summary is always reported, even when neither leg qualifies

pub mod black_scholes;
pub mod chain_filter;
pub mod engine;
pub mod error;
pub mod expiry;
pub mod pricing;
pub mod provider;
pub mod recommendation;
pub mod selector;
pub mod types;
pub mod volatility;

#[cfg(feature = "api")]
pub mod api;

pub use chain_filter::FilterThresholds;
pub use engine::{EngineSettings, Evaluation, PipelineStats, RecommendationEngine, RecommendationParams};
pub use error::EngineError;
pub use provider::{MarketDataProvider, StaticProvider};
pub use recommendation::{LegSelection, Recommendation, SelectedOption};
pub use black_scholes::BSInputs;
pub use types::{MarketSnapshot, OptionChain, OptionContract, OptionType};

pub type Result<T> = std::result::Result<T, EngineError>;
