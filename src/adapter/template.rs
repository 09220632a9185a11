//! `{}` message templates

use std::fmt::{self, Write};

/// Substitute `args` into the `{}` placeholders of `template`, left to right.
///
/// `\{}` produces a literal `{}` without consuming an argument, and `\\{}` produces
/// a literal backslash followed by the next argument. Placeholders without an
/// argument are left as they are and surplus arguments are ignored.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut rest = template;
    let mut next_arg = 0;

    while next_arg < args.len() {
        let Some(pos) = rest.find("{}") else { break };
        let escapes = rest[..pos].bytes().rev().take_while(|&b| b == b'\\').count();
        out.push_str(&rest[..if escapes == 0 { pos } else { pos - 1 }]);
        if escapes % 2 == 1 {
            out.push_str("{}");
        } else {
            let _ = write!(out, "{}", args[next_arg]);
            next_arg += 1;
        }
        rest = &rest[pos + 2..];
    }

    out.push_str(rest);
    out
}
