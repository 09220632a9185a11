//! Platform log sinks
//!
//! A sink receives fully formatted records and answers the enabled check for
//! loggers configured with the `Native` level.

use crate::level::LogLevel;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

pub mod memory;
pub mod stream;

pub use memory::{CapturedRecord, MemorySink};
pub use stream::{StderrSink, StreamSink};

pub trait LogSink: Send + Sync {
    /// The sink's own enabled check for `tag` at `level`.
    fn is_loggable(&self, tag: &str, level: LogLevel) -> bool;

    fn emit(
        &self,
        level: LogLevel,
        tag: &str,
        message: &str,
        cause: Option<&(dyn Error + 'static)>,
    );

    fn flush(&self) {}
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn is_loggable(&self, tag: &str, level: LogLevel) -> bool {
        (**self).is_loggable(tag, level)
    }

    fn emit(
        &self,
        level: LogLevel,
        tag: &str,
        message: &str,
        cause: Option<&(dyn Error + 'static)>,
    ) {
        (**self).emit(level, tag, message, cause)
    }

    fn flush(&self) {
        (**self).flush()
    }
}

/// Per-tag thresholds a sink applies when asked whether a tag is loggable,
/// in the spirit of the platform's `log.tag.<TAG>` properties.
#[derive(Debug, Clone)]
pub struct NativeThresholds {
    default: LogLevel,
    per_tag: HashMap<String, LogLevel>,
}

impl NativeThresholds {
    pub fn new(default: LogLevel) -> Self {
        Self { default, per_tag: HashMap::new() }
    }

    pub fn with_tag(mut self, tag: impl Into<String>, level: LogLevel) -> Self {
        self.per_tag.insert(tag.into(), level);
        self
    }

    pub fn threshold(&self, tag: &str) -> LogLevel {
        self.per_tag.get(tag).copied().unwrap_or(self.default)
    }

    pub fn allows(&self, tag: &str, level: LogLevel) -> bool {
        level.is_enabled_at(self.threshold(tag))
    }
}

impl Default for NativeThresholds {
    /// The platform logs INFO and above unless told otherwise.
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

/// Render an error and its sources, outermost first.
pub(crate) fn cause_chain(cause: &(dyn Error + 'static)) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = Some(cause);
    while let Some(err) = current {
        chain.push(err.to_string());
        current = err.source();
    }
    chain
}
