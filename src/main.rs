//! taglog: inspect and exercise per-package logging configuration
//!
//! Resolves the effective tag, level and display settings that the `taglog`
//! logger would apply to a given logger name, validates properties files, and
//! sends test records through the stderr sink.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
