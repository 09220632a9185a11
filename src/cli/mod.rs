//! Command-line interface for taglog
//!
//! Provides `resolve`, `check` and `emit` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod emit;
mod resolve;
mod utils;

/// Per-package logging configuration for the `log` facade
#[derive(Parser)]
#[command(name = "taglog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective configuration for logger names
    Resolve(resolve::ResolveArgs),

    /// Validate a properties file
    Check(check::CheckArgs),

    /// Send one record through the stderr sink
    Emit(emit::EmitArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Resolve(args) => resolve::run(args),
        Commands::Check(args) => check::run(args),
        Commands::Emit(args) => emit::run(args),
    }
}
