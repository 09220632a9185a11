//! Hierarchical resolution of logger configuration
//!
//! For a logger name such as `org.apache.maven.Test`, the layers configured for
//! `org.apache.maven.Test`, `org.apache.maven`, `org.apache`, `org` and the root are
//! consulted in that order. Each attribute is taken from the first layer that sets
//! it; a tag may also come from the built-in table, and whatever is still unset
//! comes from the injected defaults.

use crate::config::logger_config::{EffectiveConfig, LoggerConfig};
use crate::config::store::ConfigStore;
use crate::config::tags::builtin_tag;
use serde::Serialize;
use std::borrow::Cow;

/// Where a resolved attribute came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "prefix", rename_all = "snake_case")]
pub enum Origin {
    /// A configured layer, identified by its prefix (`""` for the root).
    Configured(String),
    /// The built-in tag table entry for this prefix.
    Builtin(String),
    Default,
}

/// A resolved configuration together with the origin of each attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub name: String,
    pub config: EffectiveConfig,
    pub tag: Origin,
    pub level: Origin,
    pub show_name: Origin,
    pub show_thread: Origin,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    store: ConfigStore,
    defaults: EffectiveConfig,
}

impl ConfigResolver {
    pub fn new(store: ConfigStore) -> Self {
        Self::with_defaults(store, EffectiveConfig::default())
    }

    pub fn with_defaults(store: ConfigStore, defaults: EffectiveConfig) -> Self {
        Self { store, defaults }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn defaults(&self) -> &EffectiveConfig {
        &self.defaults
    }

    /// Effective configuration for `logger_name`. `None` and `""` both mean the
    /// root logger.
    pub fn get(&self, logger_name: Option<&str>) -> EffectiveConfig {
        self.explain(logger_name).config
    }

    pub fn explain(&self, logger_name: Option<&str>) -> Resolution {
        let name = normalize_name(logger_name);

        let mut layered = LoggerConfig::default();
        let mut tag = None;
        let mut level = None;
        let mut show_name = None;
        let mut show_thread = None;

        for prefix in candidate_prefixes(&name) {
            layered.merge(&self.store.entry(prefix));
            claim(&mut tag, layered.tag.is_some(), prefix);
            claim(&mut level, layered.level.is_some(), prefix);
            claim(&mut show_name, layered.show_name.is_some(), prefix);
            claim(&mut show_thread, layered.show_thread.is_some(), prefix);
            if layered.is_complete() {
                break;
            }
        }

        if layered.tag.is_none() {
            if let Some((prefix, builtin)) = builtin_tag(&name) {
                layered.tag = Some(builtin.to_string());
                tag = Some(Origin::Builtin(prefix.to_string()));
            }
        }

        let config = layered.resolve(&self.defaults);
        tracing::trace!("Resolved logger '{}' to {:?}", name, config);

        Resolution {
            name: name.into_owned(),
            config,
            tag: tag.unwrap_or(Origin::Default),
            level: level.unwrap_or(Origin::Default),
            show_name: show_name.unwrap_or(Origin::Default),
            show_thread: show_thread.unwrap_or(Origin::Default),
        }
    }
}

fn claim(origin: &mut Option<Origin>, is_set: bool, prefix: &str) {
    if origin.is_none() && is_set {
        *origin = Some(Origin::Configured(prefix.to_string()));
    }
}

/// Canonical dotted form of a logger name: `None` becomes the root and Rust
/// module paths (`a::b`) become `a.b`.
pub fn normalize_name(logger_name: Option<&str>) -> Cow<'_, str> {
    match logger_name {
        None => Cow::Borrowed(""),
        Some(name) if name.contains("::") => Cow::Owned(name.replace("::", ".")),
        Some(name) => Cow::Borrowed(name),
    }
}

/// Prefixes of a dotted name from most to least specific, ending with the root
/// `""`.
pub fn candidate_prefixes(name: &str) -> CandidatePrefixes<'_> {
    CandidatePrefixes { remaining: Some(name) }
}

#[derive(Debug, Clone)]
pub struct CandidatePrefixes<'a> {
    remaining: Option<&'a str>,
}

impl<'a> Iterator for CandidatePrefixes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let current = self.remaining?;
        self.remaining = if current.is_empty() {
            None
        } else {
            Some(current.rfind('.').map_or("", |dot| &current[..dot]))
        };
        Some(current)
    }
}
