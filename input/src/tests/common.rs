use crate::{Token, TokenKind, tokenize};

pub fn tokens(input: &str) -> Vec<Token> {
    tokenize(input).tokens().to_vec()
}

pub fn kinds(input: &str) -> Vec<TokenKind> {
    tokens(input).into_iter().map(|t| t.kind).collect()
}

pub fn spans(input: &str) -> Vec<(u32, u32)> {
    tokens(input)
        .into_iter()
        .map(|t| (t.span.start, t.span.end))
        .collect()
}

pub fn values(input: &str) -> Vec<String> {
    tokens(input).into_iter().map(|t| t.value).collect()
}

/// Kind/raw/value triples, ignoring offsets.
pub fn shapes(input: &str) -> Vec<(TokenKind, String, String)> {
    tokens(input)
        .into_iter()
        .map(|t| (t.kind, t.raw, t.value))
        .collect()
}
