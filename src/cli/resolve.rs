//! Resolve command implementation

use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use taglog::config::Attribute;
use taglog::{ConfigResolver, Origin, Resolution};

use super::utils::load_store;

#[derive(Args)]
pub struct ResolveArgs {
    /// Logger names (dotted packages or Rust module paths); the root when omitted
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Properties file to resolve against (default: $TAGLOG_CONFIG or ./taglog.properties)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Show which key or table supplied each attribute
    #[arg(long)]
    pub explain: bool,
}

pub fn run(args: ResolveArgs) -> Result<()> {
    let resolver = ConfigResolver::new(load_store(args.config.as_deref())?);

    let resolutions: Vec<Resolution> = if args.names.is_empty() {
        vec![resolver.explain(None)]
    } else {
        args.names.iter().map(|name| resolver.explain(Some(name))).collect()
    };

    if args.json {
        let output = if args.explain {
            serde_json::to_value(&resolutions)?
        } else {
            resolutions
                .iter()
                .map(|r| json!({ "name": r.name, "config": r.config }))
                .collect::<Vec<_>>()
                .into()
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for resolution in &resolutions {
        print_resolution(resolution, args.explain);
    }
    Ok(())
}

fn print_resolution(resolution: &Resolution, explain: bool) {
    let name = if resolution.name.is_empty() { "<root>" } else { resolution.name.as_str() };
    let config = &resolution.config;
    let tag = if config.tag.is_empty() { "(logger name)" } else { config.tag.as_str() };

    println!("{}", name);
    let rows = [
        (Attribute::Tag, tag.to_string(), &resolution.tag),
        (Attribute::Level, config.level.to_string(), &resolution.level),
        (Attribute::ShowName, config.show_name.to_string(), &resolution.show_name),
        (Attribute::ShowThread, config.show_thread.to_string(), &resolution.show_thread),
    ];
    for (attribute, value, origin) in rows {
        if explain {
            println!(
                "  {:<11} {:<14} {}",
                attribute.as_str(),
                value,
                describe_origin(attribute, origin)
            );
        } else {
            println!("  {:<11} {}", attribute.as_str(), value);
        }
    }
}

fn describe_origin(attribute: Attribute, origin: &Origin) -> String {
    match origin {
        Origin::Configured(prefix) => attribute.key(prefix),
        Origin::Builtin(prefix) => format!("built-in ({})", prefix),
        Origin::Default => "default".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::describe_origin;
    use taglog::config::Attribute;
    use taglog::Origin;

    #[test]
    fn describes_each_origin() {
        assert_eq!(
            describe_origin(Attribute::Level, &Origin::Configured("org.apache".into())),
            "level.org.apache"
        );
        assert_eq!(describe_origin(Attribute::Tag, &Origin::Configured(String::new())), "tag");
        assert_eq!(
            describe_origin(Attribute::Tag, &Origin::Builtin("java".into())),
            "built-in (java)"
        );
        assert_eq!(describe_origin(Attribute::ShowThread, &Origin::Default), "default");
    }
}
