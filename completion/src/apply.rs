//! Writes a picked candidate back into the input line.

use input::{dirname, is_path, join_path, quote_if_needed, tokenize};

use crate::candidate::Candidate;

/// Returns the new line and cursor after picking `candidate` with the cursor at `cursor`.
///
/// In history search the line becomes the candidate itself with the cursor at `0`.
/// Otherwise only the cursor token is replaced (joined onto its directory when it is a
/// path, quoted when it contains whitespace); a cursor on a delimiter keeps the delimiter
/// and inserts after it. The cursor lands after the replacement, or just inside a closing
/// quote.
pub fn apply_completion(
    line: &str,
    cursor: usize,
    candidate: &Candidate,
    history_search: bool,
) -> (String, usize) {
    if history_search {
        return (candidate.complete_value().to_string(), 0);
    }

    let tokenized = tokenize(line);
    let cursor_index = tokenized.cursor_token_index(cursor);
    let mut buf = String::with_capacity(line.len() + candidate.complete_value().len());
    let mut position = 0;

    if tokenized.uses_current_directory() {
        buf.push('!');
    }
    for (idx, token) in tokenized.tokens().iter().enumerate() {
        if idx != cursor_index {
            buf.push_str(&token.raw);
            continue;
        }

        if !token.is_value() {
            buf.push_str(&token.value);
        }
        if is_path(&token.value) {
            let joined = join_path(dirname(&token.value), candidate.complete_value());
            buf.push_str(&quote_if_needed(&joined));
        } else {
            buf.push_str(&quote_if_needed(candidate.complete_value()));
        }

        position = buf.len();
        if buf.ends_with('"') {
            position -= 1;
        }
    }

    (buf, position)
}
