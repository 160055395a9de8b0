//! Server configuration

use crate::error::{Result, ServerError};
use std::net::SocketAddr;
use std::time::Duration;

/// Default port assignments
pub mod ports {
    /// Recommendation API
    pub const SCOUT_HTTP: u16 = 5000;
}

/// HTTP listener settings
///
/// # Example
///
/// ```
/// use server::config::ServerConfig;
///
/// let config = ServerConfig::new("127.0.0.1", 5000);
/// assert_eq!(config.http_port, 5000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// 0 binds an ephemeral port
    pub http_port: u16,
    /// Per-request deadline; `None` disables it
    pub request_timeout: Option<Duration>,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, http_port: u16) -> Self {
        Self {
            host: host.into(),
            http_port,
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Ephemeral port on localhost, for tests
    pub fn local_ephemeral() -> Self {
        Self::new("127.0.0.1", 0)
    }

    pub fn http_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.http_port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress {
                host: self.host.clone(),
                port: self.http_port,
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", ports::SCOUT_HTTP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_http_addr() {
        let config = ServerConfig::new("127.0.0.1", 5050);
        assert_eq!(config.http_addr().unwrap().to_string(), "127.0.0.1:5050");

        let config = ServerConfig::new("not a host", 5050);
        assert!(matches!(config.http_addr(), Err(ServerError::InvalidAddress { .. })));
    }

    #[test]
    fn test_with_request_timeout() {
        let config = ServerConfig::local_ephemeral().with_request_timeout(Duration::from_secs(30));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }
}
