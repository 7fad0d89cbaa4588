use input::{TokenKind, tokenize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn raw_text_round_trips_without_quotes(line in "[^\"]{0,48}") {
        prop_assume!(!line.starts_with('!'));
        let tokenized = tokenize(&line);
        let joined: String = tokenized.tokens().iter().map(|t| t.raw.as_str()).collect();
        prop_assert_eq!(joined, line);
    }

    #[test]
    fn spans_are_contiguous_and_match_raw(line in "[a-z \t\"é日]{0,48}") {
        let tokenized = tokenize(&line);
        let mut expected_start = u32::from(tokenized.uses_current_directory());
        for t in tokenized.tokens() {
            prop_assert_eq!(t.span.start, expected_start);
            prop_assert_eq!(t.span.end - t.span.start, t.raw.len() as u32);
            prop_assert!(t.kind != TokenKind::Null);
            expected_start = t.span.end;
        }
    }

    #[test]
    fn delimiters_and_values_alternate(line in "[a-z \t]{0,48}") {
        let tokenized = tokenize(&line);
        for pair in tokenized.tokens().windows(2) {
            prop_assert_ne!(pair[0].kind, pair[1].kind);
        }
    }
}
