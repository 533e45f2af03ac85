//! patterngen - static-site catalog content from catalog patterns
//!
//! Fetches the pattern catalog and writes, for every pattern, its deployment
//! manifest, package descriptor and catalog page.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use patterngen_core::PipelineConfig;

mod generate_cli;

/// Config file picked up from the working directory when `--config` is not given
const DEFAULT_CONFIG_FILE: &str = "patterngen.yaml";

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Log output formats
#[derive(Debug, Clone, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "patterngen",
    about = "Generate static-site catalog content from catalog patterns",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Log output format
    #[clap(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    /// Configuration file (defaults to ./patterngen.yaml when present)
    #[clap(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the catalog and write manifests, package descriptors and pages
    Generate(generate_cli::GenerateArgs),

    /// Print the resolved configuration as YAML
    Config,
}

/// Initialize tracing with CLI flags
///
/// Logs go to stderr so stdout only carries command output.
fn initialize_tracing(log_level: &LogLevel, log_format: &LogFormat) {
    // RUST_LOG, when set, takes precedence over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    match log_format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Load the configuration; only the implicit default file may be absent
fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let path = match path {
        Some(path) if !path.exists() => {
            anyhow::bail!("Config file not found: {}", path.display())
        }
        Some(path) => path,
        None => Path::new(DEFAULT_CONFIG_FILE),
    };
    PipelineConfig::load_from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, &cli.log_format);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => args.execute(config).await,
        Command::Config => {
            let yaml = config.to_yaml().context("Failed to serialize configuration")?;
            print!("{yaml}");
            Ok(())
        }
    }
}
