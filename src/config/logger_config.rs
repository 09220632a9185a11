//! Per-logger configuration layers

use crate::level::LogLevel;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the logger name is rendered in front of each message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShowName {
    /// Omit the name.
    False,
    /// Last segment of the logger name.
    Short,
    /// The full logger name.
    Long,
    /// The call site that produced the record.
    Caller,
}

impl ShowName {
    pub fn as_str(self) -> &'static str {
        match self {
            ShowName::False => "FALSE",
            ShowName::Short => "SHORT",
            ShowName::Long => "LONG",
            ShowName::Caller => "CALLER",
        }
    }
}

impl fmt::Display for ShowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShowName {
    type Err = String;

    /// Accepts the variant names case-insensitively, plus the older boolean
    /// spelling where `true` meant the full name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "false" => Ok(ShowName::False),
            "short" => Ok(ShowName::Short),
            "long" | "true" => Ok(ShowName::Long),
            "caller" => Ok(ShowName::Caller),
            _ => Err(format!("unknown name display mode '{s}'")),
        }
    }
}

/// One configuration layer. `None` means this layer leaves the attribute to a
/// broader layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerConfig {
    pub tag: Option<String>,
    pub level: Option<LogLevel>,
    pub show_name: Option<ShowName>,
    pub show_thread: Option<bool>,
}

impl LoggerConfig {
    /// Fill attributes still unset from `other`. Attributes already set are
    /// never overwritten.
    pub fn merge(&mut self, other: &LoggerConfig) {
        if self.tag.is_none() {
            self.tag.clone_from(&other.tag);
        }
        if self.level.is_none() {
            self.level = other.level;
        }
        if self.show_name.is_none() {
            self.show_name = other.show_name;
        }
        if self.show_thread.is_none() {
            self.show_thread = other.show_thread;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.tag.is_some()
            && self.level.is_some()
            && self.show_name.is_some()
            && self.show_thread.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.level.is_none()
            && self.show_name.is_none()
            && self.show_thread.is_none()
    }

    /// Fill the remaining gaps from `defaults`.
    pub fn resolve(self, defaults: &EffectiveConfig) -> EffectiveConfig {
        EffectiveConfig {
            tag: self.tag.unwrap_or_else(|| defaults.tag.clone()),
            level: self.level.unwrap_or(defaults.level),
            show_name: self.show_name.unwrap_or(defaults.show_name),
            show_thread: self.show_thread.unwrap_or(defaults.show_thread),
        }
    }
}

impl From<EffectiveConfig> for LoggerConfig {
    fn from(config: EffectiveConfig) -> Self {
        Self {
            tag: Some(config.tag),
            level: Some(config.level),
            show_name: Some(config.show_name),
            show_thread: Some(config.show_thread),
        }
    }
}

/// Fully resolved configuration for one logger.
///
/// `Default` is the built-in baseline: empty tag, `Native` level, no name, no
/// thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub tag: String,
    pub level: LogLevel,
    pub show_name: ShowName,
    pub show_thread: bool,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            tag: String::new(),
            level: LogLevel::Native,
            show_name: ShowName::False,
            show_thread: false,
        }
    }
}
