//! Path-shaped input helpers.
//!
//! Paths are plain `/`-separated strings here; they come straight from the input line and
//! are only handed to the filesystem by the completion crate.

use std::borrow::Cow;

use crate::tokenizer::is_space;

/// Whether the value should be completed as a path: `/...`, `./...`, or `../...`.
pub fn is_path(value: &str) -> bool {
    value.starts_with('/') || value.starts_with("./") || value.starts_with("../")
}

/// Splits at the last `/` into `(dirname, basename)`.
///
/// `"/usr/bi"` → `("/usr", "bi")`, `"/us"` → `("/", "us")`, `"./"` → `(".", "")`.
/// A value without any separator is treated as relative to `.`.
pub fn split_path(value: &str) -> (&str, &str) {
    match value.rfind('/') {
        Some(0) => ("/", &value[1..]),
        Some(idx) => (&value[..idx], &value[idx + 1..]),
        None => (".", value),
    }
}

pub fn dirname(value: &str) -> &str {
    split_path(value).0
}

/// Joins `child` onto `parent` and folds `.` and `..` segments.
///
/// Leading `./` or `../` on a relative result is kept, so `join_path("./a", "../b")` is `./b`
/// and `join_path("..", "x")` is `../x`.
pub fn join_path(parent: &str, child: &str) -> String {
    let joined = if child.starts_with('/') || parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), child)
    };

    let absolute = joined.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    let mut dot_lead = false;
    for (i, part) in joined.split('/').enumerate() {
        match part {
            "" => {}
            "." if i == 0 => dot_lead = true,
            "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let body = parts.join("/");
    if absolute {
        format!("/{body}")
    } else if parts.first() == Some(&"..") {
        body
    } else if dot_lead || body.is_empty() {
        format!("./{body}")
    } else {
        body
    }
}

/// Wraps `value` in double quotes when it contains whitespace, escaping embedded quotes.
///
/// Empty, all-whitespace, and already-quoted values are returned unchanged.
pub fn quote_if_needed(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    let all_space = bytes.iter().all(|&b| is_space(b));
    let has_space = bytes.iter().any(|&b| is_space(b));
    if value.starts_with('"') || all_space || !has_space {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    Cow::Owned(out)
}
