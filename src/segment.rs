//! Splits raw input into text, directive and line-break segments.

use crate::directive::{self, StyleDirective};
use crate::error::TextError;

pub const LINE_SEPARATOR: char = '\n';
pub const DIRECTIVE_DELIMITER: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Directive(StyleDirective),
    LineBreak,
}

/// Tokenizes `input`, decoding every directive payload.
///
/// Within a line, runs alternate text / payload / text / ... between
/// delimiters. Empty text runs are kept so segment order matches the input.
pub fn tokenize(input: &str) -> Result<Vec<Segment>, TextError> {
    let mut segments = Vec::new();
    for (index, line) in input.split(LINE_SEPARATOR).enumerate() {
        if index > 0 {
            segments.push(Segment::LineBreak);
        }
        for (run, part) in line.split(DIRECTIVE_DELIMITER).enumerate() {
            if run % 2 == 1 {
                segments.push(Segment::Directive(directive::decode(part)?));
            } else {
                segments.push(Segment::Text(part.to_string()));
            }
        }
    }
    Ok(segments)
}

/// Returns `input` with directive payloads and their delimiters removed.
///
/// Uses the same run splitting as [`tokenize`] but does not decode payloads.
pub fn strip_directives(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (index, line) in input.split(LINE_SEPARATOR).enumerate() {
        if index > 0 {
            out.push(LINE_SEPARATOR);
        }
        for part in line.split(DIRECTIVE_DELIMITER).step_by(2) {
            out.push_str(part);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_one_segment() {
        assert_eq!(tokenize("hello").unwrap(), vec![text("hello")]);
    }

    #[test]
    fn lines_are_separated_by_breaks() {
        assert_eq!(
            tokenize("a\nb\n").unwrap(),
            vec![text("a"), Segment::LineBreak, text("b"), Segment::LineBreak, text("")]
        );
    }

    #[test]
    fn directives_alternate_with_text() {
        let segs = tokenize(r#"AB\{"reset":true}\CD"#).unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], text("AB"));
        assert!(matches!(&segs[1], Segment::Directive(d) if d.reset));
        assert_eq!(segs[2], text("CD"));
    }

    #[test]
    fn leading_directive_keeps_empty_text_run() {
        let segs = tokenize(r#"\{}\x"#).unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], text(""));
        assert_eq!(segs[2], text("x"));
    }

    #[test]
    fn malformed_payload_fails_the_call() {
        assert!(matches!(
            tokenize("ok\nbad\\{nope}\\"),
            Err(TextError::MalformedDirective { .. })
        ));
    }

    #[test]
    fn unmatched_delimiter_decodes_the_tail() {
        assert!(tokenize("abc\\").is_err());
        assert!(tokenize("abc\\{}").is_ok());
    }

    #[test]
    fn strip_matches_tokenizer_text_runs() {
        let input = "ほげ\\{\"color\":{\"push\":true}}\\ABC\n\\{\"reset\":true}\\end";
        assert_eq!(strip_directives(input), "ほげABC\nend");
        let from_tokens: String = tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| match s {
                Segment::Text(t) => t,
                Segment::LineBreak => "\n".to_string(),
                Segment::Directive(_) => String::new(),
            })
            .collect();
        assert_eq!(from_tokens, strip_directives(input));
    }
}
