//! HTTP API over the recommendation engine

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

pub use error::ApiError;
pub use handlers::ApiState;
pub use routes::create_router;
