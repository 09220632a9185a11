//! Emit command implementation

use anyhow::Result;
use clap::Args;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use taglog::{ConfigResolver, LogAdapter, LogLevel, StderrSink};

use super::utils::load_store;

#[derive(Args)]
pub struct EmitArgs {
    /// Message template; each `{}` takes the next argument
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Values substituted into the template
    #[arg(value_name = "ARG")]
    pub args: Vec<String>,

    /// Logger name the record is attributed to
    #[arg(short, long, value_name = "NAME", default_value = "taglog")]
    pub name: String,

    /// Record level (ERROR, WARN, INFO, DEBUG or VERBOSE)
    #[arg(short, long, value_name = "LEVEL", default_value = "INFO")]
    pub level: LogLevel,

    /// Properties file to resolve against (default: $TAGLOG_CONFIG or ./taglog.properties)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: EmitArgs) -> Result<()> {
    if matches!(args.level, LogLevel::Suppress | LogLevel::Native) {
        anyhow::bail!("Records cannot be emitted at level {}", args.level);
    }

    let resolver = ConfigResolver::new(load_store(args.config.as_deref())?);
    let config = resolver.get(Some(&args.name));
    let adapter = LogAdapter::new(args.name.as_str(), config, Arc::new(StderrSink::stderr()));

    if !adapter.is_enabled(args.level) {
        tracing::warn!("{} is disabled for '{}'", args.level, args.name);
        return Ok(());
    }

    let values: Vec<&dyn Display> = args.args.iter().map(|a| a as &dyn Display).collect();
    adapter.log_template(args.level, &args.template, &values, None);
    Ok(())
}
