//! `log` facade backend

use crate::adapter::LogAdapter;
use crate::config::{ConfigResolver, ConfigStore, EffectiveConfig};
use crate::sink::{LogSink, StderrSink};
use dashmap::DashMap;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::path::PathBuf;
use std::sync::Arc;

/// Records from this crate's own targets are dropped: diagnostics raised while
/// resolving a logger would otherwise re-enter the logger.
const SELF_TARGET: &str = env!("CARGO_CRATE_NAME");

/// A [`log::Log`] implementation that routes each target through its own
/// [`LogAdapter`], created on first use and cached for the logger's lifetime.
pub struct TagLogger {
    resolver: ConfigResolver,
    sink: Arc<dyn LogSink>,
    adapters: DashMap<String, Arc<LogAdapter>>,
}

impl TagLogger {
    pub fn new(resolver: ConfigResolver, sink: Arc<dyn LogSink>) -> Self {
        Self { resolver, sink, adapters: DashMap::new() }
    }

    pub fn builder() -> TagLoggerBuilder {
        TagLoggerBuilder::default()
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// The adapter for `name`, resolving its configuration on first use.
    pub fn adapter(&self, name: &str) -> Arc<LogAdapter> {
        if let Some(adapter) = self.adapters.get(name) {
            return Arc::clone(adapter.value());
        }

        // Resolve outside the map lock; a racing thread may insert first and wins.
        let config = self.resolver.get(Some(name));
        let adapter = Arc::new(LogAdapter::new(name, config, Arc::clone(&self.sink)));
        Arc::clone(self.adapters.entry(name.to_string()).or_insert(adapter).value())
    }

    /// Install as the global `log` backend.
    ///
    /// The global max level is left at `Trace` because loggers using the `Native`
    /// level are filtered by the sink.
    pub fn install(self) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(LevelFilter::Trace);
        tracing::debug!("taglog installed as the global logger");
        Ok(())
    }

    fn is_own_target(target: &str) -> bool {
        target
            .strip_prefix(SELF_TARGET)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }
}

impl log::Log for TagLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !Self::is_own_target(metadata.target())
            && self.adapter(metadata.target()).is_enabled(metadata.level().into())
    }

    fn log(&self, record: &Record<'_>) {
        if Self::is_own_target(record.target()) {
            return;
        }
        self.adapter(record.target()).log_record(record);
    }

    fn flush(&self) {
        self.sink.flush();
    }
}

#[derive(Default)]
pub struct TagLoggerBuilder {
    store: Option<ConfigStore>,
    config_file: Option<PathBuf>,
    defaults: Option<EffectiveConfig>,
    sink: Option<Arc<dyn LogSink>>,
}

impl TagLoggerBuilder {
    /// Use an already loaded store. Takes precedence over `config_file`.
    pub fn config(mut self, store: ConfigStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Load configuration from `path` (fail-open).
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn defaults(mut self, defaults: EffectiveConfig) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Without an explicit store or file the configuration is discovered, see
    /// [`ConfigStore::discover`]; without a sink records go to stderr.
    pub fn build(self) -> TagLogger {
        let store = match (self.store, self.config_file) {
            (Some(store), _) => store,
            (None, Some(path)) => ConfigStore::load(path),
            (None, None) => ConfigStore::discover(),
        };
        let resolver = ConfigResolver::with_defaults(store, self.defaults.unwrap_or_default());
        let sink = self.sink.unwrap_or_else(|| Arc::new(StderrSink::stderr()));
        TagLogger::new(resolver, sink)
    }

    pub fn install(self) -> Result<(), SetLoggerError> {
        self.build().install()
    }
}

/// Install a logger with discovered configuration that writes to stderr.
pub fn init() -> Result<(), SetLoggerError> {
    TagLogger::builder().install()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LogLevel;
    use crate::sink::MemorySink;
    use log::Log;

    fn logger(config: &str, sink: Arc<MemorySink>) -> TagLogger {
        TagLogger::builder()
            .config(ConfigStore::parse(config).expect("parse"))
            .sink(sink)
            .build()
    }

    #[test]
    fn adapters_are_cached_per_target() {
        let sink = Arc::new(MemorySink::new());
        let logger = logger("level=WARN\n", sink);
        let first = logger.adapter("app::net");
        let second = logger.adapter("app::net");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &logger.adapter("app::db")));
    }

    #[test]
    fn concurrent_first_use_caches_one_adapter_per_target() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TagLogger>();

        let sink = Arc::new(MemorySink::new());
        let logger = Arc::new(logger("level=WARN\nlevel.app.net=DEBUG\ntag.app=App\n", sink));
        let targets = ["app::net", "app::db", "app::net::socket", "other"];

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    // Each worker starts at a different target so first uses overlap.
                    let mut seen = Vec::new();
                    for step in 0..targets.len() {
                        let target = targets[(i + step) % targets.len()];
                        let adapter = logger.adapter(target);
                        let config = logger.resolver().get(Some(target));
                        seen.push((target, adapter, config));
                    }
                    seen
                })
            })
            .collect();

        for worker in workers {
            for (target, adapter, config) in worker.join().expect("worker panicked") {
                assert!(Arc::ptr_eq(&adapter, &logger.adapter(target)), "{}", target);
                assert_eq!(adapter.config(), &config);
            }
        }
        assert_eq!(logger.adapters.len(), targets.len());
        assert_eq!(logger.adapter("app::net").config().level, LogLevel::Debug);
        assert_eq!(logger.adapter("app::db").tag(), "App");
    }

    #[test]
    fn routes_records_by_target() {
        let sink = Arc::new(MemorySink::new());
        let logger = logger("level=WARN\nlevel.app.net=DEBUG\ntag.app=App\n", sink.clone());

        logger.log(
            &Record::builder()
                .target("app::net::socket")
                .level(log::Level::Debug)
                .args(format_args!("connected"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .target("app::db")
                .level(log::Level::Debug)
                .args(format_args!("query"))
                .build(),
        );

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tag, "App");
        assert_eq!(records[0].level, LogLevel::Debug);
        assert_eq!(records[0].message, "connected");
    }

    #[test]
    fn enabled_reflects_configuration() {
        let sink = Arc::new(MemorySink::new());
        let logger = logger("level.app=INFO\n", sink);
        let info = Metadata::builder().target("app::x").level(log::Level::Info).build();
        let debug = Metadata::builder().target("app::x").level(log::Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn own_targets_are_dropped() {
        assert!(TagLogger::is_own_target("taglog"));
        assert!(TagLogger::is_own_target("taglog::config::store"));
        assert!(!TagLogger::is_own_target("taglogger"));

        let sink = Arc::new(MemorySink::new());
        let logger = logger("level=VERBOSE\n", sink.clone());
        logger.log(
            &Record::builder()
                .target("taglog::config")
                .level(log::Level::Warn)
                .args(format_args!("ignored"))
                .build(),
        );
        assert!(sink.records().is_empty());
    }
}
