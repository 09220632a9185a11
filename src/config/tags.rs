//! Built-in short tags for well-known root packages
//!
//! Consulted only when no configured layer supplies a tag.

use crate::config::resolver::candidate_prefixes;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const BUILTIN_TAGS: &[(&str, &str)] =
    &[("java.lang", "JavaLang"), ("java.util", "JavaUtil"), ("java", "JavaApp")];

static TAG_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BUILTIN_TAGS.iter().copied().collect());

/// Find the built-in tag for a normalized logger name.
///
/// Returns the matched prefix and its tag, most specific prefix first.
pub fn builtin_tag(name: &str) -> Option<(&'static str, &'static str)> {
    candidate_prefixes(name)
        .find_map(|prefix| TAG_TABLE.get_key_value(prefix).map(|(p, tag)| (*p, *tag)))
}

#[cfg(test)]
mod tests {
    use super::builtin_tag;

    #[test]
    fn most_specific_entry_wins() {
        assert_eq!(builtin_tag("java.lang.Void"), Some(("java.lang", "JavaLang")));
        assert_eq!(
            builtin_tag("java.util.concurrent.locks.ReentrantReadWriteLock"),
            Some(("java.util", "JavaUtil"))
        );
        assert_eq!(builtin_tag("java.sql.Driver"), Some(("java", "JavaApp")));
        assert_eq!(builtin_tag("java"), Some(("java", "JavaApp")));
    }

    #[test]
    fn matches_whole_segments_only() {
        assert_eq!(builtin_tag("javax.swing.JFrame"), None);
        assert_eq!(builtin_tag("java.language.Thing"), Some(("java", "JavaApp")));
        assert_eq!(builtin_tag(""), None);
    }
}
