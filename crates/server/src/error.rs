//! Server error types

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Found by the pre-start availability check
    #[error("HTTP port {port} is taken: {reason}")]
    PortInUse { port: u16, reason: String },

    #[error("Could not listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Port 0 where a fixed listening port is required
    #[error("Port 0 is not a valid listening port for the {field}")]
    ZeroPort { field: &'static str },

    #[error("'{host}:{port}' is not a socket address")]
    InvalidAddress { host: String, port: u16 },

    /// The listener failed while serving
    #[error("HTTP server stopped: {0}")]
    Serve(#[source] io::Error),
}

impl ServerError {
    pub fn bind(address: impl Into<String>, source: io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn port_in_use(port: u16, reason: impl Into<String>) -> Self {
        Self::PortInUse {
            port,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_listener() {
        assert_eq!(
            ServerError::port_in_use(5000, "address in use").to_string(),
            "HTTP port 5000 is taken: address in use"
        );
        assert_eq!(
            ServerError::ZeroPort { field: "metrics exporter" }.to_string(),
            "Port 0 is not a valid listening port for the metrics exporter"
        );
        assert_eq!(
            ServerError::InvalidAddress {
                host: "not a host".to_string(),
                port: 5000
            }
            .to_string(),
            "'not a host:5000' is not a socket address"
        );
    }
}
