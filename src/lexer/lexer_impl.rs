//! Span-preserving tokenization
//!
//! The actual tokenization is handled entirely by logos; this module pairs each token with
//! its byte range and turns the first unlexable character into a syntax error.

use std::ops::Range;

use logos::Logos;

use crate::error::ParseError;
use crate::lexer::tokens::Token;
use crate::position::SourceLocation;

/// Type alias for token with its byte range in the source
pub type TokenSpan = (Token, Range<usize>);

/// Tokenize a string, collecting tokens with their spans.
pub fn tokenize(source: &str) -> Result<Vec<TokenSpan>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                let position = SourceLocation::new(source).byte_to_position(span.start);
                let slice = lexer.slice();
                let message = if slice.starts_with('"') {
                    "unterminated string literal".to_string()
                } else if slice.starts_with('<') {
                    "malformed reference".to_string()
                } else {
                    format!("unexpected input '{}'", slice.escape_debug())
                };
                return Err(ParseError::syntax(position, message));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_tokenize_with_spans() {
        let tokens = tokenize("hp = 10").unwrap();
        assert_eq!(
            tokens,
            vec![
                (Token::Word, 0..2),
                (Token::Equals, 3..4),
                (Token::Integer, 5..7),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize("  // only a comment\n").unwrap(), vec![]);
    }

    #[test]
    fn test_unexpected_character_reports_position() {
        let err = tokenize("scene v1\nnode a b {\n  x = /\n}").unwrap_err();
        match err {
            ParseError::Syntax { position, message } => {
                assert_eq!(position, Position::new(3, 7));
                assert!(message.contains('/'), "message: {message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_float_lexes_as_name() {
        // Rejected later by the grammar, which reports the whole literal
        assert_eq!(
            tokenize("x = 10.").unwrap(),
            vec![(Token::Word, 0..1), (Token::Equals, 2..3), (Token::Name, 4..7)]
        );
    }

    #[test]
    fn test_malformed_reference() {
        let err = tokenize("r = <Mesh>").unwrap_err();
        match err {
            ParseError::Syntax { position, message } => {
                assert_eq!(position, Position::new(1, 5));
                assert_eq!(message, "malformed reference");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("x = \"open").unwrap_err();
        assert_eq!(err.position(), Position::new(1, 5));
    }
}
