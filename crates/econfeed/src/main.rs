//! econfeed - inspect and republish encoded feed buffers
//!
//! # Usage
//!
//! ```bash
//! # Render captured buffers as text lines
//! econfeed decode debug/fb_000001.bin
//! econfeed decode debug/
//!
//! # Publish a capture directory in order and report what went through
//! econfeed replay --dir debug
//! econfeed --config econfeed.toml --log-level debug replay
//! ```

mod cmd;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use econfeed_config::{Config, LogConfig, LogFormat, LogLevel, LogOutput};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// econfeed - inspect and republish encoded feed buffers
#[derive(Parser, Debug)]
#[command(name = "econfeed")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify buffers and render them as text lines
    Decode(cmd::decode::DecodeArgs),

    /// Publish replay files in order and report counts
    Replay(cmd::replay::ReplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let level = resolve_log_level(cli.log_level.as_deref(), &config)?;
    init_logging(level, &config.log)?;

    match cli.command {
        Command::Decode(args) => cmd::decode::run(args, &config),
        Command::Replay(args) => cmd::replay::run(args, &config),
    }
}

/// Load the config file if one was given, defaults otherwise
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config: &Config) -> Result<LogLevel> {
    match cli_level {
        Some(level) => level
            .parse()
            .with_context(|| format!("invalid --log-level '{level}'")),
        None => Ok(config.log.level),
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: LogLevel, log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(level.as_str())
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let writer = match &log.output {
        LogOutput::Stdout => BoxMakeWriter::new(io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(io::stderr),
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path}"))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match log.format {
        LogFormat::Console => fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();

    Ok(())
}
