//! Parser combinator functions for STDL values.
//!
//! Value alternatives are tried in a fixed order: float, integer, boolean, string, list,
//! local reference, global reference. The first one that matches wins.

use chumsky::prelude::*;
use std::ops::Range;
use std::sync::Arc;

use crate::lexer::{Token, TokenSpan};
use crate::scene::{Ref, Value};

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenSpan>;

/// A value together with the byte range it was parsed from
pub(crate) type SpannedValue = (Value, Range<usize>);

/// Helper: match a specific token type, yielding its byte range
pub(crate) fn token(t: Token) -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).map(|(_, span)| span)
}

/// Helper: match a word token, yielding its text and byte range
pub(crate) fn word(
    source: Arc<String>,
) -> impl Parser<TokenSpan, (String, Range<usize>), Error = ParserError> + Clone {
    token(Token::Word).map(move |span| (source[span.clone()].to_string(), span))
}

/// Helper: match a node type or name. Anything without whitespace or structural characters
/// qualifies, so numbers and non-word names are accepted here.
pub(crate) fn name(
    source: Arc<String>,
) -> impl Parser<TokenSpan, (String, Range<usize>), Error = ParserError> + Clone {
    filter(|(tok, _): &TokenSpan| {
        matches!(tok, Token::Word | Token::Name | Token::Integer | Token::Float)
    })
    .map(move |(_, span)| (source[span.clone()].to_string(), span))
}

/// Helper: match a word token with exactly the given text
pub(crate) fn keyword(
    source: Arc<String>,
    keyword: &'static str,
) -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(move |(tok, span): &TokenSpan| {
        *tok == Token::Word && source.get(span.clone()) == Some(keyword)
    })
    .map(|(_, span)| span)
}

/// Helper: parse the digits of an `@12` / `#3` style identifier
pub(crate) fn parse_id(digits: &str) -> Option<i64> {
    digits.parse::<i64>().ok()
}

fn float(source: Arc<String>) -> impl Parser<TokenSpan, SpannedValue, Error = ParserError> + Clone {
    token(Token::Float).try_map(move |range, span| {
        source[range.clone()]
            .parse::<f64>()
            .map(|v| (Value::Float(v), range))
            .map_err(|_| Simple::custom(span, "invalid float literal"))
    })
}

fn integer(source: Arc<String>) -> impl Parser<TokenSpan, SpannedValue, Error = ParserError> + Clone {
    token(Token::Integer).try_map(move |range, span| {
        let text = &source[range.clone()];
        text.parse::<i64>()
            .map(|v| (Value::Integer(v), range))
            .map_err(|_| Simple::custom(span, format!("integer literal {} is out of range", text)))
    })
}

fn boolean(source: Arc<String>) -> impl Parser<TokenSpan, SpannedValue, Error = ParserError> + Clone {
    let t = keyword(source.clone(), "true").map(|span| (Value::Bool(true), span));
    let f = keyword(source, "false").map(|span| (Value::Bool(false), span));
    t.or(f)
}

fn string(source: Arc<String>) -> impl Parser<TokenSpan, SpannedValue, Error = ParserError> + Clone {
    token(Token::String).map(move |range| {
        // The token always includes both quotes
        let inner = &source[range.start + 1..range.end - 1];
        (Value::String(unescape(inner)), range)
    })
}

fn local_ref(source: Arc<String>) -> impl Parser<TokenSpan, SpannedValue, Error = ParserError> + Clone {
    token(Token::LocalRef).try_map(move |range, span| {
        let inner = &source[range.start + 1..range.end - 1];
        let parsed = inner
            .rsplit_once('#')
            .and_then(|(node_type, id)| Some(Ref::local(segment(node_type), parse_id(id)?)));
        match parsed {
            Some(r) => Ok((Value::Reference(r), range)),
            None => Err(Simple::custom(span, "local reference id is out of range")),
        }
    })
}

fn global_ref(source: Arc<String>) -> impl Parser<TokenSpan, SpannedValue, Error = ParserError> + Clone {
    token(Token::GlobalRef).try_map(move |range, span| {
        let inner = &source[range.start + 1..range.end - 1];
        let parsed = inner.split_once(':').and_then(|(node_type, rest)| {
            let (name, id) = rest.rsplit_once('@')?;
            Some(Ref::global(segment(node_type), segment(name), parse_id(id)?))
        });
        match parsed {
            Some(r) => Ok((Value::Reference(r), range)),
            None => Err(Simple::custom(span, "global reference id is out of range")),
        }
    })
}

/// Trimmed reference segment; blank segments are absent
fn segment(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parse any value, lists nested to any depth
pub(crate) fn value(
    source: Arc<String>,
) -> impl Parser<TokenSpan, SpannedValue, Error = ParserError> + Clone {
    recursive(move |value| {
        let list = token(Token::OpenBracket)
            .then(value.separated_by(token(Token::Comma)))
            .then(token(Token::CloseBracket))
            .map(|((open, items), close): ((Range<usize>, Vec<SpannedValue>), Range<usize>)| {
                let items = items.into_iter().map(|(v, _)| v).collect();
                (Value::List(items), open.start..close.end)
            });

        choice((
            float(source.clone()),
            integer(source.clone()),
            boolean(source.clone()),
            string(source.clone()),
            list,
            local_ref(source.clone()),
            global_ref(source.clone()),
        ))
    })
    .labelled("value")
}

/// Resolve `\n \t \r \" \\`; any other escaped character stands for itself.
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_value(source: &str) -> Option<Value> {
        let tokens = tokenize(source).expect("lexing failed");
        value(Arc::new(source.to_string()))
            .then_ignore(end())
            .parse(tokens)
            .ok()
            .map(|(v, _)| v)
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"line1\nline2"), "line1\nline2");
        assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape(r"a\\b\tc\rd"), "a\\b\tc\rd");
        assert_eq!(unescape(r"\q"), "q");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse_value("10"), Some(Value::Integer(10)));
        assert_eq!(parse_value("-4"), Some(Value::Integer(-4)));
        assert_eq!(parse_value("10.0"), Some(Value::Float(10.0)));
        assert_eq!(parse_value("true"), Some(Value::Bool(true)));
        assert_eq!(parse_value("false"), Some(Value::Bool(false)));
        assert_eq!(parse_value(r#""hi""#), Some(Value::String("hi".into())));
    }

    #[test]
    fn test_bare_word_is_not_a_value() {
        assert_eq!(parse_value("maybe"), None);
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        assert_eq!(parse_value("99999999999999999999"), None);
        assert_eq!(parse_value("<Mesh#99999999999999999999>"), None);
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            parse_value("[1, [2.5, \"x\"], []]"),
            Some(Value::List(vec![
                Value::Integer(1),
                Value::List(vec![Value::Float(2.5), Value::String("x".into())]),
                Value::List(vec![]),
            ]))
        );
    }

    #[test]
    fn test_trailing_comma_is_rejected() {
        assert_eq!(parse_value("[1, 2,]"), None);
    }

    #[test]
    fn test_references() {
        assert_eq!(
            parse_value("<Mesh#3>"),
            Some(Value::Reference(Ref::local(Some("Mesh"), 3)))
        );
        assert_eq!(parse_value("<#3>"), Some(Value::Reference(Ref::local(None, 3))));
        assert_eq!(
            parse_value("<Mesh:Cube@12>"),
            Some(Value::Reference(Ref::global(Some("Mesh"), Some("Cube"), 12)))
        );
        assert_eq!(
            parse_value("< Mesh : Cube @12>"),
            Some(Value::Reference(Ref::global(Some("Mesh"), Some("Cube"), 12)))
        );
        assert_eq!(
            parse_value("< : @12>"),
            Some(Value::Reference(Ref::global(None, None, 12)))
        );
    }
}
