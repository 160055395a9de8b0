//! Logging initialization
//!
//! Installs a `tracing` subscriber with one of three output formats. The
//! level comes from `RUST_LOG` when set, otherwise from the default
//! directive passed in.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, with file and line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
    Compact,
}

impl LogFormat {
    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown log format: {}", s))
    }
}

/// Initialize logging at `info` unless `RUST_LOG` says otherwise
///
/// # Example
///
/// ```ignore
/// use observability::{init_logging, LogFormat};
///
/// init_logging("scout", LogFormat::Pretty)?;
/// tracing::info!("Service started");
/// ```
pub fn init_logging(service_name: &str, format: LogFormat) -> anyhow::Result<()> {
    init_logging_with_directive(service_name, format, DEFAULT_DIRECTIVE)
}

/// Initialize logging with an explicit fallback directive
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_directive(
    service_name: &str,
    format: LogFormat,
    directive: &str,
) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive)?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
    }

    tracing::info!(
        service = service_name,
        format = %format,
        "Logging initialized"
    );

    Ok(())
}

/// Run `f` under a temporary subscriber on stderr
///
/// Covers work done before the configured logger exists, such as loading the
/// config file that selects it. The global subscriber is left untouched.
pub fn with_startup_logging<T>(format: LogFormat, f: impl FnOnce() -> T) -> T {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => tracing::subscriber::with_default(
            registry.with(fmt::layer().with_writer(std::io::stderr).with_target(true)),
            f,
        ),
        LogFormat::Json => tracing::subscriber::with_default(
            registry.with(fmt::layer().json().with_writer(std::io::stderr)),
            f,
        ),
        LogFormat::Compact => tracing::subscriber::with_default(
            registry.with(fmt::layer().compact().with_writer(std::io::stderr)),
            f,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse(" JSON "), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("Compact"), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse("verbose"), None);

        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("verbose".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for format in [LogFormat::Pretty, LogFormat::Json, LogFormat::Compact] {
            assert_eq!(LogFormat::parse(&format.to_string()), Some(format));
        }
    }

    #[test]
    fn test_startup_logging_scopes_subscriber() {
        let before = tracing::dispatcher::get_default(|d| d.is::<tracing::subscriber::NoSubscriber>());

        let (value, inside) = with_startup_logging(LogFormat::Compact, || {
            tracing::warn!("startup event");
            let inside = tracing::dispatcher::get_default(|d| d.is::<tracing::subscriber::NoSubscriber>());
            (42, inside)
        });

        assert_eq!(value, 42);
        assert!(!inside);
        let after = tracing::dispatcher::get_default(|d| d.is::<tracing::subscriber::NoSubscriber>());
        assert_eq!(before, after);
    }
}
