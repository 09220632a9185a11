//! Properties-backed configuration store
//!
//! The store is filled once and is read-only afterwards. Loading is fail-open:
//! a missing or unreadable source produces an empty store and a warning, never an
//! error, so logging configuration cannot take the host application down.

use crate::config::logger_config::{LoggerConfig, ShowName};
use crate::config::properties;
use crate::error::ConfigError;
use crate::level::LogLevel;
use std::collections::{BTreeSet, HashMap};
use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable naming an explicit properties file.
pub const CONFIG_ENV_VAR: &str = "TAGLOG_CONFIG";

const DISCOVERY_CANDIDATES: [&str; 2] = ["taglog.properties", ".taglog.properties"];

/// The four per-logger attributes and their key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Tag,
    Level,
    ShowName,
    ShowThread,
}

impl Attribute {
    pub const ALL: [Attribute; 4] =
        [Attribute::Tag, Attribute::Level, Attribute::ShowName, Attribute::ShowThread];

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Tag => "tag",
            Attribute::Level => "level",
            Attribute::ShowName => "showName",
            Attribute::ShowThread => "showThread",
        }
    }

    /// Key for this attribute at `prefix`: the bare attribute name for the root
    /// layer, `<attribute>.<prefix>` otherwise.
    pub fn key(self, prefix: &str) -> String {
        if prefix.is_empty() {
            self.as_str().to_string()
        } else {
            format!("{}.{}", self.as_str(), prefix)
        }
    }

    /// Split a key back into its attribute and prefix.
    pub fn parse_key(key: &str) -> Option<(Attribute, &str)> {
        Attribute::ALL.into_iter().find_map(|attribute| {
            let rest = key.strip_prefix(attribute.as_str())?;
            if rest.is_empty() {
                Some((attribute, ""))
            } else {
                rest.strip_prefix('.').filter(|p| !p.is_empty()).map(|p| (attribute, p))
            }
        })
    }
}

/// A configured value that does not parse as its attribute's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueIssue {
    pub key: String,
    pub value: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    entries: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl ConfigStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `path`, falling back to an empty store on any failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Ignoring logging config {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Strict variant of [`ConfigStore::load`].
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ConfigError::io(path, e))?;
        let entries = properties::parse(&properties::decode(&bytes))?;
        tracing::debug!("Loaded {} logging config entries from {}", entries.len(), path.display());
        Ok(Self { entries, source: Some(path.to_path_buf()) })
    }

    /// Load the config named by `$TAGLOG_CONFIG`, or the first of
    /// `taglog.properties` / `.taglog.properties` in the current directory.
    ///
    /// No config at all is not an error: the store is simply empty.
    pub fn discover() -> Self {
        match discover_config_path(Path::new("."), std::env::var_os(CONFIG_ENV_VAR)) {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No logging config found, using built-in defaults");
                Self::empty()
            }
        }
    }

    /// Parse a properties byte stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ConfigError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse(&properties::decode(&bytes))
    }

    /// Parse properties text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(Self { entries: properties::parse(text)?, source: None })
    }

    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries, source: None }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw value for `key`, if present and non-empty.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn get<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.value(key).unwrap_or(fallback)
    }

    pub fn level(&self, key: &str) -> Option<LogLevel> {
        self.parsed(key, "log level")
    }

    pub fn get_level(&self, key: &str, fallback: LogLevel) -> LogLevel {
        self.level(key).unwrap_or(fallback)
    }

    pub fn show_name(&self, key: &str) -> Option<ShowName> {
        self.parsed(key, "name display mode")
    }

    pub fn get_show_name(&self, key: &str, fallback: ShowName) -> ShowName {
        self.show_name(key).unwrap_or(fallback)
    }

    pub fn boolean(&self, key: &str) -> Option<bool> {
        let raw = self.value(key)?;
        match parse_bool(raw) {
            Some(value) => Some(value),
            None => {
                tracing::warn!("Ignoring {}={}: expected a boolean", key, raw);
                None
            }
        }
    }

    pub fn get_boolean(&self, key: &str, fallback: bool) -> bool {
        self.boolean(key).unwrap_or(fallback)
    }

    /// The layer configured for exactly `prefix` (empty for the root).
    pub fn entry(&self, prefix: &str) -> LoggerConfig {
        LoggerConfig {
            tag: self.value(&Attribute::Tag.key(prefix)).map(str::to_string),
            level: self.level(&Attribute::Level.key(prefix)),
            show_name: self.show_name(&Attribute::ShowName.key(prefix)),
            show_thread: self.boolean(&Attribute::ShowThread.key(prefix)),
        }
    }

    /// Every prefix with at least one attribute key, sorted; the root is `""`.
    pub fn prefixes(&self) -> BTreeSet<&str> {
        self.entries.keys().filter_map(|key| Attribute::parse_key(key)).map(|(_, p)| p).collect()
    }

    /// Keys that do not name an attribute, sorted.
    pub fn unknown_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .entries
            .keys()
            .map(String::as_str)
            .filter(|key| Attribute::parse_key(key).is_none())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Attribute values that would be ignored because they do not parse.
    pub fn issues(&self) -> Vec<ValueIssue> {
        let mut issues: Vec<ValueIssue> = self
            .entries
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .filter_map(|(key, value)| {
                let (attribute, _) = Attribute::parse_key(key)?;
                let expected = match attribute {
                    Attribute::Tag => return None,
                    Attribute::Level if value.parse::<LogLevel>().is_err() => "log level",
                    Attribute::ShowName if value.parse::<ShowName>().is_err() => {
                        "name display mode"
                    }
                    Attribute::ShowThread if parse_bool(value).is_none() => "boolean",
                    _ => return None,
                };
                Some(ValueIssue { key: key.clone(), value: value.clone(), expected })
            })
            .collect();
        issues.sort_by(|a, b| a.key.cmp(&b.key));
        issues
    }

    fn parsed<T: FromStr>(&self, key: &str, expected: &str) -> Option<T> {
        let raw = self.value(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring {}={}: expected a {}", key, raw, expected);
                None
            }
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn discover_config_path(dir: &Path, explicit: Option<OsString>) -> Option<PathBuf> {
    if let Some(explicit) = explicit.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(explicit));
    }

    DISCOVERY_CANDIDATES.iter().map(|candidate| dir.join(candidate)).find(|path| path.exists())
}
