//! In-memory sink that keeps every record

use super::{cause_chain, LogSink, NativeThresholds};
use crate::level::LogLevel;
use std::error::Error;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: LogLevel,
    pub tag: String,
    pub message: String,
    /// Cause chain joined with `": "`, outermost first.
    pub cause: Option<String>,
}

#[derive(Debug)]
pub struct MemorySink {
    records: Mutex<Vec<CapturedRecord>>,
    thresholds: NativeThresholds,
}

impl MemorySink {
    /// A sink whose native check accepts every concrete level.
    pub fn new() -> Self {
        Self::with_thresholds(NativeThresholds::new(LogLevel::Verbose))
    }

    pub fn with_thresholds(thresholds: NativeThresholds) -> Self {
        Self { records: Mutex::new(Vec::new()), thresholds }
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Remove and return everything captured so far.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn is_loggable(&self, tag: &str, level: LogLevel) -> bool {
        self.thresholds.allows(tag, level)
    }

    fn emit(
        &self,
        level: LogLevel,
        tag: &str,
        message: &str,
        cause: Option<&(dyn Error + 'static)>,
    ) {
        let record = CapturedRecord {
            level,
            tag: tag.to_string(),
            message: message.to_string(),
            cause: cause.map(|c| cause_chain(c).join(": ")),
        };
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record);
    }
}
