//! `${name}` expansion for command templates such as `${cwd}/bin/run`.

use std::collections::HashMap;

/// Expand `${name}` references in `template`.
///
/// - Unknown names expand to the empty string.
/// - `\$` yields a literal `$`, `\\` a literal `\`; any other backslash is kept.
/// - A `$` not followed by `{`, or a `${` that is never closed, is copied verbatim.
pub fn expand_template(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.peek().copied() {
                Some(escaped @ ('$' | '\\')) => {
                    chars.next();
                    out.push(escaped);
                }
                _ => out.push('\\'),
            },
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }

                if closed {
                    if let Some(value) = values.get(&name) {
                        out.push_str(value);
                    }
                } else {
                    out.push_str("${");
                    out.push_str(&name);
                }
            }
            _ => out.push(ch),
        }
    }

    out
}
