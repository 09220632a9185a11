//! taglog: route `log` records to a tagged platform sink
//!
//! Each logger name (a dotted package path, or a Rust module path) is given an
//! effective configuration (tag, minimum level, name display and thread display)
//! resolved from a `.properties` source by walking the name from the most to the
//! least specific prefix. Unset attributes inherit from broader prefixes and finally
//! from built-in defaults, so resolution never fails.

pub mod adapter;
pub mod config;
pub mod error;
pub mod level;
pub mod logger;
pub mod sink;

pub use adapter::{format_template, LogAdapter};
pub use config::{
    ConfigResolver, ConfigStore, EffectiveConfig, LoggerConfig, Origin, Resolution, ShowName,
};
pub use error::ConfigError;
pub use level::LogLevel;
pub use logger::{init, TagLogger, TagLoggerBuilder};
pub use sink::{LogSink, MemorySink, NativeThresholds, StderrSink, StreamSink};
