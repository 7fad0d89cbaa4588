mod token;

pub use token::{NULL_TOKEN, Span, Token, TokenKind, utf8_len};

/// A tokenized input line.
///
/// Tokens cover the line contiguously except for a leading `!` sigil, which is consumed
/// and reported through [`TokenizedLine::uses_current_directory`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedLine {
    tokens: Vec<Token>,
    parameter_values: Vec<String>,
    uses_current_directory: bool,
}

impl TokenizedLine {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Values of every value-like token after the first.
    pub fn parameter_values(&self) -> &[String] {
        &self.parameter_values
    }

    pub fn uses_current_directory(&self) -> bool {
        self.uses_current_directory
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Value of the first token (the command name), or `""` for an empty line.
    pub fn first_value(&self) -> &str {
        self.tokens.first().map_or("", |t| t.value.as_str())
    }

    /// Index of the token the cursor is editing.
    ///
    /// A cursor on a delimiter belongs to the value before it, except when the delimiter is
    /// the last token: then the delimiter itself is returned so completion targets a new
    /// parameter.
    pub fn cursor_token_index(&self, cursor: usize) -> usize {
        let cursor = u32::try_from(cursor).unwrap_or(u32::MAX);
        let mut index = 0;
        let Some(last) = self.tokens.len().checked_sub(1) else {
            return index;
        };

        for (i, token) in self.tokens.iter().enumerate() {
            if !token.span.touches(cursor) {
                continue;
            }
            if token.is_value() {
                index = i;
            } else if i > 0 {
                index = i - 1;
            }
            if i == last {
                index = i;
            }
            break;
        }
        index
    }

    /// The token under the cursor, or [`NULL_TOKEN`] for an empty line.
    pub fn cursor_token(&self, cursor: usize) -> &Token {
        self.tokens
            .get(self.cursor_token_index(cursor))
            .unwrap_or(&NULL_TOKEN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InQuotedString,
    InDelimiterRun,
    InBareValue,
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Leading byte of the previously read character (`0` before the first one).
    prev: u8,
    state: State,
    start: usize,
    buf: String,
    tokens: Vec<Token>,
    uses_current_directory: bool,
}

/// Tokenize a launcher input line.
///
/// - A leading `!` is consumed and sets `uses_current_directory`.
/// - Whitespace runs become `Delimiter` tokens; everything else is a `Value`, a
///   `QuotedString`, or (at end of input) an `UnterminatedString`.
/// - `\"` inside a quoted string is unescaped to `"`; in a bare value it is kept verbatim.
///
/// Never fails: any line, including an empty one, produces a (possibly empty) token list.
pub fn tokenize(line: &str) -> TokenizedLine {
    Tokenizer {
        input: line,
        pos: 0,
        prev: 0,
        state: State::Start,
        start: 0,
        buf: String::new(),
        tokens: Vec::new(),
        uses_current_directory: false,
    }
    .run()
}

impl Tokenizer<'_> {
    fn run(mut self) -> TokenizedLine {
        let input = self.input;
        let bytes = input.as_bytes();
        while self.pos < bytes.len() {
            let c = bytes[self.pos];
            let len = utf8_len(c).min(bytes.len() - self.pos);
            self.read_char(c, len);
            self.prev = c;
        }
        self.finish()
    }

    fn read_char(&mut self, c: u8, len: usize) {
        if self.pos == 0 && c == b'!' {
            self.uses_current_directory = true;
            self.pos += 1;
            return;
        }

        match self.state {
            State::Start => {
                self.buf.clear();
                self.buf.push_str(char_at(self.input, self.pos, len));
                self.start = self.pos;
                self.state = if c == b'"' && self.prev != b'\\' {
                    State::InQuotedString
                } else if is_space(c) {
                    State::InDelimiterRun
                } else {
                    State::InBareValue
                };
                self.pos += len;
            }
            State::InQuotedString => {
                if c == b'"' && self.prev != b'\\' {
                    self.buf.push('"');
                    self.emit(TokenKind::QuotedString);
                    self.pos += 1;
                    self.state = State::Start;
                    return;
                }
                if c == b'"' {
                    // `\"`: drop the backslash, keep the quote.
                    self.buf.pop();
                }
                self.buf.push_str(char_at(self.input, self.pos, len));
                self.pos += len;
            }
            State::InDelimiterRun => {
                if is_space(c) {
                    self.buf.push_str(char_at(self.input, self.pos, len));
                    self.pos += len;
                } else {
                    // Not consumed: the character is re-read from `Start`.
                    self.emit(TokenKind::Delimiter);
                    self.state = State::Start;
                }
            }
            State::InBareValue => {
                if is_space(c) || (c == b'"' && self.prev != b'\\') {
                    self.emit(TokenKind::Value);
                    self.state = State::Start;
                } else {
                    self.buf.push_str(char_at(self.input, self.pos, len));
                    self.pos += len;
                }
            }
        }
    }

    fn emit(&mut self, kind: TokenKind) {
        let raw = std::mem::take(&mut self.buf);
        self.tokens.push(Token::new(kind, self.start, raw));
    }

    fn finish(mut self) -> TokenizedLine {
        match self.state {
            State::Start => {}
            State::InQuotedString => self.emit(TokenKind::UnterminatedString),
            State::InDelimiterRun => self.emit(TokenKind::Delimiter),
            State::InBareValue => self.emit(TokenKind::Value),
        }

        let parameter_values = self
            .tokens
            .iter()
            .skip(1)
            .filter(|t| t.is_value())
            .map(|t| t.value.clone())
            .collect();

        TokenizedLine {
            tokens: self.tokens,
            parameter_values,
            uses_current_directory: self.uses_current_directory,
        }
    }
}

fn char_at(input: &str, pos: usize, len: usize) -> &str {
    input.get(pos..pos + len).unwrap_or_default()
}

/// C-locale `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
