//! Per-logger adapter between callers and a sink
//!
//! A [`LogAdapter`] is created once per logger name with its resolved
//! configuration. It answers the enabled check (delegating to the sink for the
//! `Native` level), renders the name/thread decoration and forwards the record.

use crate::config::{normalize_name, EffectiveConfig, ShowName};
use crate::level::LogLevel;
use crate::sink::LogSink;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

pub mod template;

pub use template::format_template;

/// Where a record was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub location: &'a str,
    pub line: Option<u32>,
}

impl<'a> CallSite<'a> {
    fn from_location(location: &'a Location<'a>) -> Self {
        Self { location: location.file(), line: Some(location.line()) }
    }

    fn from_record(record: &'a log::Record<'a>) -> Option<Self> {
        let location = record.module_path().or(record.file())?;
        Some(Self { location, line: record.line() })
    }
}

impl fmt::Display for CallSite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.location, line),
            None => f.write_str(self.location),
        }
    }
}

pub struct LogAdapter {
    name: String,
    short_name: String,
    tag: String,
    config: EffectiveConfig,
    sink: Arc<dyn LogSink>,
}

impl LogAdapter {
    /// When the resolved tag is empty the logger's short name is used instead.
    pub fn new(name: impl Into<String>, config: EffectiveConfig, sink: Arc<dyn LogSink>) -> Self {
        let name = name.into();
        let short_name = short_name(&name);
        let tag = if config.tag.is_empty() { short_name.clone() } else { config.tag.clone() };
        Self { name, short_name, tag, config, sink }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    /// Whether a record at `level` would be emitted.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        if matches!(level, LogLevel::Suppress | LogLevel::Native) {
            return false;
        }
        match self.config.level {
            LogLevel::Native => self.sink.is_loggable(&self.tag, level),
            threshold => level.is_enabled_at(threshold),
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
        if self.is_enabled(level) {
            let caller = CallSite::from_location(Location::caller());
            self.emit(level, message, Some(caller), cause);
        }
    }

    /// Like [`LogAdapter::log`] with `{}` substitution; the template is only
    /// formatted when the level is enabled.
    #[track_caller]
    pub fn log_template(
        &self,
        level: LogLevel,
        template: &str,
        args: &[&dyn fmt::Display],
        cause: Option<&(dyn Error + 'static)>,
    ) {
        if self.is_enabled(level) {
            let caller = CallSite::from_location(Location::caller());
            self.emit(level, &format_template(template, args), Some(caller), cause);
        }
    }

    pub fn log_record(&self, record: &log::Record<'_>) {
        let level = LogLevel::from(record.level());
        if !self.is_enabled(level) {
            return;
        }
        let message = match record.args().as_str() {
            Some(literal) => literal.to_string(),
            None => record.args().to_string(),
        };
        self.emit(level, &message, CallSite::from_record(record), None);
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        caller: Option<CallSite<'_>>,
        cause: Option<&(dyn Error + 'static)>,
    ) {
        let decorated = self.decorate(message, caller);
        self.sink.emit(level, &self.tag, &decorated, cause);
    }

    fn decorate(&self, message: &str, caller: Option<CallSite<'_>>) -> String {
        let mut out = String::with_capacity(message.len() + 32);
        if self.config.show_thread {
            let thread = std::thread::current();
            match thread.name() {
                Some(name) => out.push_str(&format!("[{}] ", name)),
                None => out.push_str(&format!("[{:?}] ", thread.id())),
            }
        }
        match self.config.show_name {
            ShowName::False => {}
            ShowName::Short => out.push_str(&format!("{}: ", self.short_name)),
            ShowName::Long => out.push_str(&format!("{}: ", self.name)),
            ShowName::Caller => match caller {
                Some(site) => out.push_str(&format!("{}: ", site)),
                None => out.push_str(&format!("{}: ", self.name)),
            },
        }
        out.push_str(message);
        out
    }
}

impl fmt::Debug for LogAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogAdapter")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn short_name(name: &str) -> String {
    let normalized = normalize_name(Some(name));
    normalized.rsplit('.').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, NativeThresholds};

    fn config(
        tag: &str,
        level: LogLevel,
        show_name: ShowName,
        show_thread: bool,
    ) -> EffectiveConfig {
        EffectiveConfig { tag: tag.to_string(), level, show_name, show_thread }
    }

    fn named(show_name: ShowName, sink: &Arc<MemorySink>) -> LogAdapter {
        let cfg = config("M", LogLevel::Verbose, show_name, false);
        LogAdapter::new("org.apache.maven.Test1", cfg, sink.clone())
    }

    #[test]
    fn short_name_handles_both_separators() {
        assert_eq!(short_name("org.apache.maven.Test1"), "Test1");
        assert_eq!(short_name("my_app::net::socket"), "socket");
        assert_eq!(short_name("solo"), "solo");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn empty_tag_falls_back_to_short_name() {
        let sink = Arc::new(MemorySink::new());
        let adapter = LogAdapter::new("a.b.Widget", EffectiveConfig::default(), sink);
        assert_eq!(adapter.tag(), "Widget");
    }

    #[test]
    fn long_tags_reach_the_sink_unchanged() {
        let tag = "eu.lp0.slf4j.android.DefaultLoggerTest.testDEBUG_debug_Msg";
        let thresholds =
            NativeThresholds::new(LogLevel::Suppress).with_tag(tag, LogLevel::Debug);
        let sink = Arc::new(MemorySink::with_thresholds(thresholds));
        let cfg = config(tag, LogLevel::Native, ShowName::False, false);
        let adapter = LogAdapter::new("x", cfg, sink.clone());
        assert_eq!(adapter.tag(), tag);
        assert!(adapter.is_enabled(LogLevel::Debug));
        assert!(!adapter.is_enabled(LogLevel::Verbose));

        adapter.log(LogLevel::Debug, "message", None);
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tag, tag);
    }

    #[test]
    fn native_level_defers_to_sink() {
        let sink = Arc::new(MemorySink::with_thresholds(NativeThresholds::new(LogLevel::Warn)));
        let adapter = LogAdapter::new("x", EffectiveConfig::default(), sink);
        assert!(adapter.is_enabled(LogLevel::Error));
        assert!(adapter.is_enabled(LogLevel::Warn));
        assert!(!adapter.is_enabled(LogLevel::Info));
    }

    #[test]
    fn configured_level_ignores_sink() {
        let thresholds = NativeThresholds::new(LogLevel::Suppress);
        let sink = Arc::new(MemorySink::with_thresholds(thresholds));
        let cfg = config("T", LogLevel::Debug, ShowName::False, false);
        let adapter = LogAdapter::new("x", cfg, sink);
        assert!(adapter.is_enabled(LogLevel::Debug));
        assert!(!adapter.is_enabled(LogLevel::Verbose));
        assert!(!adapter.is_enabled(LogLevel::Suppress));
    }

    #[test]
    fn decorates_with_names() {
        let sink = Arc::new(MemorySink::new());
        let short = named(ShowName::Short, &sink);
        let long = named(ShowName::Long, &sink);
        let caller = named(ShowName::Caller, &sink);

        short.log(LogLevel::Info, "hi", None);
        long.log(LogLevel::Info, "hi", None);
        caller.log(LogLevel::Info, "hi", None);

        let messages = sink.messages();
        assert_eq!(messages[0], "Test1: hi");
        assert_eq!(messages[1], "org.apache.maven.Test1: hi");
        assert!(messages[2].starts_with(file!()), "{}", messages[2]);
        assert!(messages[2].ends_with(": hi"));
    }

    #[test]
    fn decorates_with_thread_name() {
        let sink = Arc::new(MemorySink::new());
        let cfg = config("T", LogLevel::Verbose, ShowName::Short, true);
        let adapter = LogAdapter::new("a.B", cfg, sink.clone());
        std::thread::Builder::new()
            .name("worker-7".into())
            .spawn(move || adapter.log(LogLevel::Warn, "busy", None))
            .expect("spawn")
            .join()
            .expect("join");
        assert_eq!(sink.messages(), vec!["[worker-7] B: busy"]);
    }

    #[test]
    fn template_is_only_formatted_when_enabled() {
        struct Panics;
        impl fmt::Display for Panics {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                panic!("formatted a disabled record")
            }
        }

        let sink = Arc::new(MemorySink::new());
        let cfg = config("T", LogLevel::Warn, ShowName::False, false);
        let adapter = LogAdapter::new("x", cfg, sink.clone());
        adapter.log_template(LogLevel::Debug, "value {}", &[&Panics], None);
        adapter.log_template(LogLevel::Warn, "value {}", &[&7], None);
        assert_eq!(sink.messages(), vec!["value 7"]);
    }
}
