//! HTTP server infrastructure for OptionScout
//!
//! Every listener implements [`Server`]; [`ServerExt`] adds `spawn()` and
//! `run_until_signal()`. Shutdown is coordinated through `CancellationToken`
//! from `tokio_util`, so cancelling a parent token stops every child.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = HttpServer::new(ServerConfig::default(), router);
//!     server.run_until_signal().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

pub use config::{ports, ServerConfig};
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use port_validator::{validate_port_range, validate_ports_available};
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
