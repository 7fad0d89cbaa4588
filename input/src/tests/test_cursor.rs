use crate::TokenKind;
use crate::tokenize;

#[test]
fn test_cursor_inside_first_value() {
    let line = tokenize("firefox");
    assert_eq!(line.cursor_token_index(3), 0);
    assert_eq!(line.cursor_token_index(7), 0);
}

#[test]
fn test_cursor_at_value_boundary_prefers_left_value() {
    let line = tokenize("cmd arg");
    assert_eq!(line.cursor_token_index(3), 0);
    // Right after the space: the delimiter touches first and maps back to `cmd`.
    assert_eq!(line.cursor_token_index(4), 0);
    assert_eq!(line.cursor_token_index(5), 2);
    assert_eq!(line.cursor_token_index(7), 2);
    assert_eq!(line.cursor_token(5).value, "arg");
}

#[test]
fn test_cursor_inside_delimiter_maps_to_previous_value() {
    let line = tokenize("cmd   arg");
    assert_eq!(line.cursor_token_index(4), 0);
}

#[test]
fn test_cursor_on_trailing_delimiter_targets_new_parameter() {
    let line = tokenize("cmd ");
    assert_eq!(line.cursor_token_index(4), 1);
    assert_eq!(line.cursor_token(4).kind, TokenKind::Delimiter);
}

#[test]
fn test_cursor_past_end_falls_back_to_first() {
    let line = tokenize("cmd");
    assert_eq!(line.cursor_token_index(42), 0);
}

#[test]
fn test_cursor_on_empty_line() {
    let line = tokenize("");
    assert_eq!(line.cursor_token_index(0), 0);
    assert!(line.cursor_token(0).is_null());
}

#[test]
fn test_escaped_quote_shortens_its_token_span() {
    let input = r#"x "a\"b""#;
    let line = tokenize(input);
    let quoted = &line.tokens()[2];
    assert_eq!(quoted.kind, TokenKind::QuotedString);
    assert_eq!(quoted.raw, r#""a"b""#);
    assert_eq!(quoted.value, r#"a"b"#);
    assert_eq!((quoted.span.start, quoted.span.end), (2, 7));
    assert_eq!(input.len(), 8);

    assert_eq!(line.cursor_token_index(7), 2);
    // One past the shortened span: no token touches it.
    assert_eq!(line.cursor_token_index(8), 0);

    let line = tokenize(r#"run "a\"b" next"#);
    let next = &line.tokens()[4];
    assert_eq!(next.value, "next");
    assert_eq!((next.span.start, next.span.end), (11, 15));
}
