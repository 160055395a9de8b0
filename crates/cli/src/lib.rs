use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(about = "OptionScout - nearest OTM option recommendations priced with Black-Scholes")]
#[command(version)]
pub struct Cli {
    /// Log output format; overrides the config file
    #[arg(long, global = true, value_enum, env = "SCOUT_LOG_FORMAT")]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP recommendation service
    Start {
        /// Path to the configuration file; built-in defaults when omitted
        #[arg(short, long, env = "SCOUT_CONFIG")]
        config: Option<PathBuf>,

        /// Override bind host
        #[arg(long)]
        host: Option<String>,

        /// Override HTTP port
        #[arg(long)]
        http: Option<u16>,
    },

    /// Print a one-off recommendation for a ticker as JSON
    Recommend {
        /// Underlying ticker symbol, e.g. AAPL
        ticker: String,

        #[arg(short, long, env = "SCOUT_CONFIG")]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: FilterOverrides,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate configuration without starting the service
    Validate {
        #[arg(short, long, default_value = "scout.yaml")]
        config: PathBuf,
    },

    /// Write a configuration file with all defaults
    Init {
        #[arg(short, long, default_value = "scout.yaml")]
        output: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Per-run overrides of the configured recommendation thresholds
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct FilterOverrides {
    /// Minimum business days to expiration
    #[arg(long)]
    pub min_days: Option<u32>,

    /// Volume must exceed this
    #[arg(long)]
    pub min_volume: Option<u64>,

    /// Open interest must exceed this
    #[arg(long)]
    pub min_open_interest: Option<u64>,

    /// Highest acceptable theoretical price
    #[arg(long)]
    pub max_price: Option<f64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Pretty,
    Json,
    Compact,
}

impl LogFormatArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormatArg::Pretty => "pretty",
            LogFormatArg::Json => "json",
            LogFormatArg::Compact => "compact",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
