//! Logcat-style text output to any writer

use super::{cause_chain, LogSink, NativeThresholds};
use crate::level::LogLevel;
use chrono::{Local, NaiveDateTime};
use std::error::Error;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Writes one line per record:
///
/// ```text
/// 10-19 14:03:27.518  4711 W/Maven: [main] Test1: artifact missing
/// 10-19 14:03:27.518  4711 W/Maven: Caused by: file not found
/// ```
pub struct StreamSink<W: Write + Send> {
    writer: Mutex<W>,
    thresholds: NativeThresholds,
    pid: u32,
}

pub type StderrSink = StreamSink<io::Stderr>;

impl StreamSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Default for StreamSink<io::Stderr> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write + Send> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            thresholds: NativeThresholds::default(),
            pid: std::process::id(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: NativeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lines(&self, lines: &[String]) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            // A sink has nowhere to report its own write failures.
            let _ = writeln!(writer, "{}", line);
        }
    }
}

impl<W: Write + Send> LogSink for StreamSink<W> {
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
        let timestamp = Local::now().naive_local();
        let mut lines = vec![format_line(timestamp, self.pid, level, tag, message)];
        if let Some(cause) = cause {
            for text in cause_chain(cause) {
                let caused_by = format!("Caused by: {}", text);
                lines.push(format_line(timestamp, self.pid, level, tag, &caused_by));
            }
        }
        self.write_lines(&lines);
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}

pub fn format_line(
    timestamp: NaiveDateTime,
    pid: u32,
    level: LogLevel,
    tag: &str,
    message: &str,
) -> String {
    format!(
        "{} {:>5} {}/{}: {}",
        timestamp.format("%m-%d %H:%M:%S%.3f"),
        pid,
        level.label(),
        tag,
        message
    )
}
