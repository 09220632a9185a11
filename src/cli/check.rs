//! Check command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use taglog::ConfigStore;

#[derive(Args)]
pub struct CheckArgs {
    /// Properties file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Fail when values would be ignored or keys are not recognised
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let store = ConfigStore::try_load(&args.file)
        .with_context(|| format!("Failed loading config file: {}", args.file.display()))?;

    println!("{}: {} entries", args.file.display(), store.len());
    for prefix in store.prefixes() {
        let layer = store.entry(prefix);
        let label = if prefix.is_empty() { "<root>" } else { prefix };
        let mut parts = Vec::new();
        if let Some(tag) = &layer.tag {
            parts.push(format!("tag={}", tag));
        }
        if let Some(level) = layer.level {
            parts.push(format!("level={}", level));
        }
        if let Some(show_name) = layer.show_name {
            parts.push(format!("showName={}", show_name));
        }
        if let Some(show_thread) = layer.show_thread {
            parts.push(format!("showThread={}", show_thread));
        }
        println!("  {:<32} {}", label, parts.join(" "));
    }

    let issues = store.issues();
    for issue in &issues {
        println!(
            "warning: {}={} is not a valid {}; it will be ignored",
            issue.key, issue.value, issue.expected
        );
    }
    let unknown = store.unknown_keys();
    for key in &unknown {
        println!("warning: unrecognised key '{}'", key);
    }

    if args.strict && !(issues.is_empty() && unknown.is_empty()) {
        anyhow::bail!(
            "{} invalid value(s) and {} unrecognised key(s) in {}",
            issues.len(),
            unknown.len(),
            args.file.display()
        );
    }
    Ok(())
}
