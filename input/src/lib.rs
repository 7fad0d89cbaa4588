//! Launcher input line handling.
//!
//! Pipeline: tokenize → locate cursor token → completion (in the `completion` crate).
//! All spans are UTF-8 byte offsets into the original line, using `[start, end)`.

mod path;
mod template;
mod tests;
mod tokenizer;

pub use path::{dirname, is_path, join_path, quote_if_needed, split_path};
pub use template::expand_template;
pub use tokenizer::{
    NULL_TOKEN, Span, Token, TokenKind, TokenizedLine, is_space, tokenize, utf8_len,
};
