use anyhow::Result;
use clap::Parser;
use paper_convert::config::{find_config_file, load_config, ConfigFile, LogFormat, LoggingConfig};
use paper_convert::Converter;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "Usage: convert <dataset path> <output path>";

/// Convert scientific-paper JSON documents listed in a metadata index into plain-text files
#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert scientific-paper JSON documents into plain-text files", long_about = None)]
struct Cli {
    /// Dataset root: holds the metadata index and, anywhere below it, the JSON documents
    dataset_root: Option<PathBuf>,

    /// Existing directory receiving one .txt file per converted paper
    output_dir: Option<PathBuf>,

    /// Further positional arguments are accepted and ignored
    #[arg(hide = true)]
    extra: Vec<String>,

    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metadata index file name, relative to the dataset root
    #[arg(long)]
    metadata_file: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Initialize tracing based on verbosity and the logging configuration
fn init_tracing(cli: &Cli, logging: &LoggingConfig) {
    let log_level = match cli.verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| format!("paper_convert={0},convert={0}", env_filter)),
    ));

    match cli.log_format.unwrap_or(logging.format) {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&cli, &LoggingConfig::default());
            tracing::error!("{}", e);
            return Ok(());
        }
    };

    init_tracing(&cli, &config.logging);
    // stdout carries the TOML under --print-config
    if let Some(path) = config_path.as_ref().filter(|_| !cli.print_config) {
        tracing::info!("Using config file: {}", path.display());
    }

    config.apply_overrides(
        cli.dataset_root.clone(),
        cli.output_dir.clone(),
        cli.metadata_file.clone(),
    );

    if cli.print_config {
        print_config(&config)?;
        return Ok(());
    }

    let Some(convert_config) = config.convert_config() else {
        println!("{}", USAGE);
        return Ok(());
    };

    if let Err(e) = Converter::new(convert_config).run() {
        tracing::error!("{}", e);
    }

    Ok(())
}

fn print_config(config: &ConfigFile) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
