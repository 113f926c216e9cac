//! Inspector for the HXApi type vocabulary and connection settings.
//!
//! Never opens a controller connection; it only reports what the
//! library would hand to the controller API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hxapi_types::{
    CommMedium, ConnectionConfig, TypeKind, ALIASES, FALSE, TEXT_MAXSIZE, TRUE,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config location, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "config/HXApi.toml";

/// Environment variable naming a config file.
const CONFIG_PATH_ENV: &str = "HXAPI_CONFIG_PATH";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "hxapi-inspect",
    about = "Inspect HXApi primitive types and connection settings",
    version,
    long_about = None
)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the alias table and named constants.
    Types,
    /// Load, validate, and summarise a connection config.
    Config {
        /// Path to a connection configuration file (TOML).
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    match args.command {
        Command::Types => {
            print_types();
            Ok(())
        }
        Command::Config { config } => {
            let env_path = std::env::var(CONFIG_PATH_ENV).ok();
            let config = load_config(
                config.as_deref(),
                env_path.as_deref(),
                Path::new(DEFAULT_CONFIG_PATH),
            )?;
            print_config(&config);
            Ok(())
        }
    }
}

/// Initialize logging with the specified log level.
fn init_logging(level: &str) {
    let filter = format!("hxapi_inspect={level},hxapi_types={level}");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&filter)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration from file or use defaults.
///
/// Resolution priority (first existing file wins):
/// 1. Command-line `--config` argument
/// 2. `HXAPI_CONFIG_PATH` environment variable
/// 3. `config/HXApi.toml`
/// 4. Built-in defaults
///
/// The environment value and local path are passed in so callers decide
/// where they come from.
fn load_config(
    cli_path: Option<&Path>,
    env_path: Option<&str>,
    local_path: &Path,
) -> Result<ConnectionConfig> {
    if let Some(config_path) = cli_path {
        info!(?config_path, "Loading config from command-line argument");
        return ConnectionConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    if let Some(env_path) = env_path {
        let config_path = PathBuf::from(env_path);
        if config_path.exists() {
            info!(?config_path, "Loading config from HXAPI_CONFIG_PATH");
            return ConnectionConfig::from_file(&config_path).with_context(|| {
                format!("Failed to load config from {CONFIG_PATH_ENV}={env_path}")
            });
        }
        warn!(
            path = %env_path,
            "HXAPI_CONFIG_PATH set but file does not exist, checking other locations"
        );
    }

    if local_path.exists() {
        info!(?local_path, "Loading config from working directory");
        return ConnectionConfig::from_file(local_path)
            .with_context(|| format!("Failed to load config from {}", local_path.display()));
    }

    info!("No config file found, using built-in defaults");
    Ok(ConnectionConfig::default())
}

fn print_types() {
    println!(
        "{:<8} {:<8} {:>4}  {:<8} {:>12} {:>12}",
        "ALIAS", "RUST", "BITS", "KIND", "MIN", "MAX",
    );
    for alias in &ALIASES {
        let kind = match alias.kind {
            TypeKind::Signed => "signed",
            TypeKind::Unsigned => "unsigned",
            TypeKind::Float => "float",
        };
        let bound = |v: Option<i64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "{:<8} {:<8} {:>4}  {:<8} {:>12} {:>12}",
            alias.name,
            alias.rust_type,
            alias.bits,
            kind,
            bound(alias.min),
            bound(alias.max),
        );
    }

    println!();
    println!("TEXT_MAXSIZE = {TEXT_MAXSIZE}");
    println!("FALSE = {FALSE}");
    println!("TRUE = {TRUE}");
    for medium in CommMedium::ALL {
        println!("{medium} = {}", medium.as_raw());
    }
}

fn print_config(config: &ConnectionConfig) {
    println!("medium       {} ({})", config.medium, config.medium.as_raw());
    println!("address      {}:{}", config.address, config.port);
    if let Some(channel) = config.channel {
        println!("channel      {channel}");
    }
    println!("timeout      {:?}", config.timeout);
    println!("sample_rate  {} Hz ({:?})", config.sample_rate, config.sample_period());
    println!("init_args    {:?}", config.init_args());
}
