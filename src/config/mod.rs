//! Logger configuration: properties loading and hierarchical resolution
//!
//! Precedence for each attribute: most specific configured prefix > broader
//! prefixes > root layer > built-in tag table (tag only) > defaults.

pub mod logger_config;
pub mod properties;
pub mod resolver;
pub mod store;
pub mod tags;

pub use logger_config::{EffectiveConfig, LoggerConfig, ShowName};
pub use resolver::{candidate_prefixes, normalize_name, ConfigResolver, Origin, Resolution};
pub use store::{Attribute, ConfigStore, ValueIssue, CONFIG_ENV_VAR};
