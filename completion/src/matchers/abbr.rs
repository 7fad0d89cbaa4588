use input::{is_space, utf8_len};

use super::NO_MATCH;

const FIRST_CHAR: f64 = 1.5;
const NEXT_CHAR: f64 = 0.9;
const GAP_AFTER_INPUT: f64 = 0.8;
const GAP: f64 = 0.75;
const BOUNDARY: f64 = 0.1;

/// Abbreviation score of `input` against `candidate`, in `(0, 1]`, or [`NO_MATCH`].
///
/// Walks `candidate` one character at a time; characters are compared by byte length first,
/// then ASCII-case-insensitively (one byte) or byte-exactly (multi-byte). A match adds `1.5`
/// on the first character and `0.9` elsewhere, plus `0.1` after a lower→upper or `_`/space
/// boundary. Once anything matched, every unmatched character still adds `0.75` (or `0.8`
/// after the input is used up). The total is divided by the candidate's byte length.
pub fn abbreviation_score(candidate: &str, input: &str) -> f64 {
    let (name, input) = (candidate.as_bytes(), input.as_bytes());
    if name.is_empty() || input.is_empty() || input.len() > name.len() {
        return NO_MATCH;
    }

    let mut score = 0.0;
    let mut pos = 0;
    let mut input_pos = 0;
    let mut prev_len = 0;

    while pos < name.len() {
        let c = name[pos];
        let len = utf8_len(c);
        let matched = match input.get(input_pos) {
            Some(&ic) if utf8_len(ic) == len => {
                if len == 1 {
                    c.eq_ignore_ascii_case(&ic)
                } else {
                    name.get(pos..pos + len)
                        .is_some_and(|ch| input.get(input_pos..input_pos + len) == Some(ch))
                }
            }
            _ => false,
        };

        if matched {
            score += if pos == 0 { FIRST_CHAR } else { NEXT_CHAR };
            input_pos += len;
            if prev_len != 0 && len == 1 {
                let prev = name[pos - prev_len];
                if (prev.is_ascii_lowercase() && c.is_ascii_uppercase())
                    || prev == b'_'
                    || is_space(prev)
                {
                    score += BOUNDARY;
                }
            }
        } else if score != 0.0 {
            score += if input_pos == input.len() {
                GAP_AFTER_INPUT
            } else {
                GAP
            };
        }

        pos += len;
        prev_len = len;
    }

    if input_pos == input.len() {
        f64::min(1.0, score / name.len() as f64)
    } else {
        NO_MATCH
    }
}
