//! `.properties` text parsing
//!
//! Supports the usual grammar: `key=value`, `key: value` and `key value`
//! separators, `#` and `!` comment lines, backslash line continuations and the
//! `\t \n \r \f \uXXXX` escapes. Later duplicate keys replace earlier ones.

use crate::error::ConfigError;
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::collections::HashMap;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse properties text into a key/value table.
pub fn parse(text: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut entries = HashMap::new();
    let mut lines = physical_lines(text).enumerate();

    while let Some((index, line)) = lines.next() {
        let line_no = index + 1;
        let trimmed = line.trim_start_matches(WHITESPACE);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        entries.insert(unescape(key, line_no)?, unescape(value, line_no)?);
    }

    Ok(entries)
}

/// Decode a properties byte stream.
///
/// UTF-8 is tried first (a leading BOM is dropped). Anything else is read as
/// Windows-1252, the Latin-1 superset traditionally used for properties files.
pub fn decode(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// Lines end at `\r\n`, `\r` or `\n`.
fn physical_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(|c| c == '\r' || c == '\n') {
            Some(i) => {
                let skip = if current[i..].starts_with("\r\n") { 2 } else { 1 };
                let tail = &current[i + skip..];
                rest = if tail.is_empty() { None } else { Some(tail) };
                Some(&current[..i])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

fn has_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut explicit_separator = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                explicit_separator = true;
                break;
            }
            ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = if explicit_separator {
        line[key_end + 1..].trim_start_matches(WHITESPACE)
    } else {
        let rest = line[key_end..].trim_start_matches(WHITESPACE);
        match rest.strip_prefix(['=', ':']) {
            Some(after) => after.trim_start_matches(WHITESPACE),
            None => rest,
        }
    };
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, ConfigError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars, line)?;
                if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate: the low half must follow as another escape.
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(ConfigError::MalformedEscape { line });
                    }
                    let low = read_code_unit(&mut chars, line)?;
                    let decoded = char::decode_utf16([unit, low])
                        .next()
                        .and_then(Result::ok)
                        .ok_or(ConfigError::MalformedEscape { line })?;
                    out.push(decoded);
                } else {
                    let decoded = char::from_u32(u32::from(unit))
                        .ok_or(ConfigError::MalformedEscape { line })?;
                    out.push(decoded);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u16, ConfigError> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::MalformedEscape { line });
    }
    u16::from_str_radix(&hex, 16).map_err(|_| ConfigError::MalformedEscape { line })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_separator_forms() {
        let entries = parse("a=1\nb: 2\nc 3\nd   =   4\ne\n").expect("parse");
        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");
        assert_eq!(entries["c"], "3");
        assert_eq!(entries["d"], "4");
        assert_eq!(entries["e"], "");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let entries = parse("# comment\n! also comment\n\n   \nkey=value\n").expect("parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["key"], "value");
    }

    #[test]
    fn joins_continuation_lines() {
        let entries = parse("fruits = apple, \\\n         banana\nnext=1\n").expect("parse");
        assert_eq!(entries["fruits"], "apple, banana");
        assert_eq!(entries["next"], "1");
    }

    #[test]
    fn even_backslashes_do_not_continue() {
        let entries = parse("path=C:\\\\\nother=x\n").expect("parse");
        assert_eq!(entries["path"], "C:\\");
        assert_eq!(entries["other"], "x");
    }

    #[test]
    fn handles_escapes_in_keys_and_values() {
        let entries = parse("key\\=with\\:seps = tab\\there\nuni=\\u0041\\u00e9\n").expect("parse");
        assert_eq!(entries["key=with:seps"], "tab\there");
        assert_eq!(entries["uni"], "A\u{e9}");
    }

    #[test]
    fn decodes_surrogate_pairs() {
        let entries = parse("emoji=\\ud83d\\ude00\n").expect("parse");
        assert_eq!(entries["emoji"], "\u{1F600}");
    }

    #[test]
    fn malformed_unicode_escape_reports_line() {
        let err = parse("ok=1\nbad=\\u12g4\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedEscape { line: 2 }));
    }

    #[test]
    fn later_duplicates_win() {
        let entries = parse("level=WARN\nlevel=DEBUG\n").expect("parse");
        assert_eq!(entries["level"], "DEBUG");
    }

    #[test]
    fn windows_line_endings() {
        let entries = parse("a=1\r\nb=2\r\n").expect("parse");
        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");

        let entries = parse("a=1\rb=2\r# note\rc=3\\\r  4\n").expect("parse");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");
        assert_eq!(entries["c"], "34");
    }

    #[test]
    fn decode_prefers_utf8_and_falls_back_to_latin1() {
        assert_eq!(decode("tag=caf\u{e9}".as_bytes()), "tag=caf\u{e9}");
        assert_eq!(decode(b"\xef\xbb\xbftag=x"), "tag=x");
        assert_eq!(decode(b"tag=caf\xe9"), "tag=caf\u{e9}");
    }
}
