//! Port availability checks
//!
//! A successful check only means the port was free at that moment; the bind
//! in [`HttpServer::run`](crate::http::HttpServer) is authoritative.

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Fail early if the configured HTTP port is taken
pub async fn validate_ports_available(config: &ServerConfig) -> Result<()> {
    if config.http_port == 0 {
        debug!("Ephemeral HTTP port, skipping availability check");
        return Ok(());
    }

    let addr = format!("{}:{}", config.host, config.http_port);
    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            drop(listener);
            info!("HTTP port {} is available", config.http_port);
            Ok(())
        }
        Err(e) => {
            error!("HTTP port {} is NOT available: {}", config.http_port, e);
            Err(ServerError::port_in_use(config.http_port, e.to_string()))
        }
    }
}

/// Rejects port 0 and warns on privileged ports
///
/// `field` names the listener in the error, e.g. "metrics exporter".
pub fn validate_port_range(field: &'static str, port: u16) -> Result<()> {
    if port == 0 {
        return Err(ServerError::ZeroPort { field });
    }
    if port < 1024 {
        warn!(field, "Port {} is a privileged port (requires root/admin privileges)", port);
    }
    Ok(())
}
