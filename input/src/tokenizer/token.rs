//! Input tokens and spans.
//!
//! [`Span`] uses UTF-8 byte offsets into the original line and is half-open `[start, end)`.
//! Unlike a source lexer there is no EOF token; "no token" is expressed with [`NULL_TOKEN`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Half-open byte span into the input line: `[start, end)`.
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: u32::try_from(start).unwrap_or(u32::MAX),
            end: u32::try_from(end).unwrap_or(u32::MAX),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Inclusive on both ends: a cursor sitting right after the last byte still touches the span.
    pub fn touches(&self, cursor: u32) -> bool {
        self.start <= cursor && self.end >= cursor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare word, ends at whitespace or an unescaped `"`.
    Value,
    /// Run of whitespace between values.
    Delimiter,
    /// `"..."`; `value` has the quotes removed.
    QuotedString,
    /// `"...` reaching end of input; `value` has the opening quote removed.
    UnterminatedString,
    /// Placeholder for "no token".
    Null,
}

impl TokenKind {
    /// Whether the token carries a parameter value.
    ///
    /// Quoted strings count: `run "a b"` passes `a b` as a parameter.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::Value | TokenKind::QuotedString | TokenKind::UnterminatedString
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A classified slice of the input line.
///
/// `raw` is the literal text (quotes and whitespace included, escaped quotes unescaped);
/// `value` is its semantic content. `span.end == span.start + raw.len()` always holds.
///
/// Since `\"` in a quoted string loses its backslash in `raw`, such a token's span ends one
/// byte early per escape. `span.start` of every token is still its true offset, so only a
/// cursor on the last bytes of that token misses it.
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub raw: String,
    pub value: String,
}

/// Shared sentinel returned when there is no real token (e.g. empty input).
pub static NULL_TOKEN: Token = Token {
    kind: TokenKind::Null,
    span: Span { start: 0, end: 0 },
    raw: String::new(),
    value: String::new(),
};

impl Token {
    pub(crate) fn new(kind: TokenKind, start: usize, raw: String) -> Self {
        let value = match kind {
            TokenKind::QuotedString => raw
                .get(1..raw.len().saturating_sub(1))
                .unwrap_or_default()
                .to_string(),
            TokenKind::UnterminatedString => raw.get(1..).unwrap_or_default().to_string(),
            TokenKind::Value | TokenKind::Delimiter | TokenKind::Null => raw.clone(),
        };
        Token {
            kind,
            span: Span::new(start, start + raw.len()),
            raw,
            value,
        }
    }

    pub fn is_null(&self) -> bool {
        self.kind == TokenKind::Null
    }

    pub fn is_value(&self) -> bool {
        self.kind.is_value()
    }
}

const UTF8_SKIP: [u8; 256] = {
    let mut table = [1u8; 256];
    let mut i = 0xC0;
    while i < 0x100 {
        table[i] = match i {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            0xF8..=0xFB => 5,
            0xFC..=0xFD => 6,
            _ => 1,
        };
        i += 1;
    }
    table
};

/// Byte length of the character introduced by `lead`, judged from the leading byte alone.
///
/// Continuation and invalid bytes count as 1 so a scan always makes progress.
pub fn utf8_len(lead: u8) -> usize {
    UTF8_SKIP[lead as usize] as usize
}
