//! OptionScout CLI and Server Binary
//!
//! Entry point for the `scout` command. It can serve recommendations over
//! HTTP, print a one-off recommendation, and validate or create the
//! configuration file.

mod settings;

use anyhow::{Context, Result};
use cli::{Cli, Commands, FilterOverrides};
use config::{generate_default_config, load_config, parse_config, save_config, ScoutConfig};
use market_feed::YahooClient;
use observability::{init_logging_with_directive, init_metrics, with_startup_logging, LogFormat};
use options_engine::api::{create_router, ApiState};
use options_engine::RecommendationEngine;
use server::{
    health_routes, validate_port_range, validate_ports_available, HealthState, HttpServer, ServerExt,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = match &cli.command {
        Commands::Start { config, .. } | Commands::Recommend { config, .. } => config.clone(),
        Commands::Validate { .. } | Commands::Init { .. } => None,
    };
    let startup_format = cli
        .log_format
        .and_then(|f| LogFormat::parse(f.as_str()))
        .unwrap_or_default();
    let config = with_startup_logging(startup_format, || {
        load_optional_config(config_path.as_deref())
    })?;

    let format = settings::log_format(cli.log_format, &config);
    init_logging_with_directive(&config.service.name, format, &config.logging.level)?;

    info!("OptionScout starting...");
    debug!(?cli, "CLI arguments parsed");

    match cli.command {
        Commands::Start { host, http, .. } => {
            info!("Executing 'start' command");
            start_service(config, host, http).await
        }
        Commands::Recommend {
            ticker,
            overrides,
            pretty,
            ..
        } => {
            info!("Executing 'recommend' command");
            recommend_command(config, &ticker, &overrides, pretty).await
        }
        Commands::Validate { config } => {
            info!("Executing 'validate' command");
            validate_command(config)
        }
        Commands::Init { output, force } => {
            info!("Executing 'init' command");
            init_command(output, force)
        }
    }
}

fn load_optional_config(path: Option<&Path>) -> Result<ScoutConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(generate_default_config()),
    }
}

fn build_engine(config: &ScoutConfig) -> Result<RecommendationEngine> {
    let client = YahooClient::new(settings::yahoo_config(&config.market_data))
        .context("Failed to create market data client")?;

    Ok(RecommendationEngine::with_settings(
        Arc::new(client),
        settings::engine_settings(&config.recommendation),
    ))
}

async fn start_service(
    config: ScoutConfig,
    host_override: Option<String>,
    http_override: Option<u16>,
) -> Result<()> {
    let report = config::validate_config(&config);

    if !report.warnings.is_empty() {
        warn!("Configuration warnings:");
        for warning in &report.warnings {
            warn!(field = %warning.field, message = %warning.message);
        }
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start service due to configuration errors");
    }

    if http_override.is_none() {
        debug!(port = config.server.http_port, "Using configured HTTP port");
    }
    let server_config = settings::server_config(&config, host_override, http_override)?;

    if config.metrics.enabled {
        validate_port_range("metrics exporter", config.metrics.port)?;
        init_metrics(config.metrics.port)?;
    }

    let engine = build_engine(&config)?;
    let api_state = ApiState::new(engine, settings::recommendation_params(&config.recommendation))
        .with_service_name(config.service.name.clone())
        .with_cors(config.server.cors_enabled);
    let health = HealthState::new(config.service.name.clone(), config.service.version.clone());

    let router = create_router(Arc::new(api_state)).merge(health_routes(Arc::new(health)));

    validate_ports_available(&server_config).await?;

    info!(
        service = %config.service.name,
        host = %server_config.host,
        http_port = server_config.http_port,
        "Starting service"
    );

    let server = HttpServer::new(server_config, router).with_name(config.service.name);
    server.run_until_signal().await?;

    Ok(())
}

async fn recommend_command(
    config: ScoutConfig,
    ticker: &str,
    overrides: &FilterOverrides,
    pretty: bool,
) -> Result<()> {
    let engine = build_engine(&config)?;
    let params = settings::apply_overrides(
        settings::recommendation_params(&config.recommendation),
        overrides,
    );

    let recommendation = engine
        .recommend(ticker, &params)
        .await
        .with_context(|| format!("Failed to build recommendation for {}", ticker))?;

    let json = if pretty {
        serde_json::to_string_pretty(&recommendation)?
    } else {
        serde_json::to_string(&recommendation)?
    };
    println!("{}", json);

    Ok(())
}

fn validate_command(config_path: PathBuf) -> Result<()> {
    info!(path = ?config_path, "Validating configuration");

    let raw = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

    let config = match parse_config(&raw) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = config::validate_config_source(&config, &raw);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service.name);
    println!("Version: {}", config.service.version);
    println!("Listen: {}", config.server.http_address());
    println!("Provider: {}", config.market_data.provider);
    println!(
        "Filters: min_days={} min_volume={} min_open_interest={} max_price={}",
        config.recommendation.min_days_to_expiry,
        config.recommendation.min_volume,
        config.recommendation.min_open_interest,
        config.recommendation.max_theoretical_price
    );

    Ok(())
}

fn init_command(output_path: PathBuf, force: bool) -> Result<()> {
    info!(?output_path, "Initializing new configuration file");

    if output_path.exists() && !force {
        anyhow::bail!(
            "{:?} already exists; pass --force to overwrite it",
            output_path
        );
    }

    let config = generate_default_config();
    save_config(&config, &output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("This configuration includes:");
    println!("  - HTTP listener on {}", config.server.http_address());
    println!("  - Recommendation filter defaults");
    println!("  - Yahoo Finance market data settings");
    println!();
    println!("Next steps:");
    println!("  1. Edit the configuration file to customize settings");
    println!(
        "  2. Run 'scout validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'scout start --config {:?}' to start the service",
        output_path
    );

    Ok(())
}
