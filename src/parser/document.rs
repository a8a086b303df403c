//! Document-level grammar: scene header, nodes and properties.
//!
//! Every rule flattens into [`Event`]s so the builder sees the document in the order the
//! rules complete, not as a nested syntax tree.

use chumsky::prelude::*;
use std::ops::Range;
use std::sync::Arc;

use crate::lexer::{Token, TokenSpan};
use crate::parser::combinators::{keyword, name, parse_id, token, value, word, ParserError};
use crate::parser::events::{Event, Header};

/// Property keys are a letter followed by letters, digits or underscores
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Node types and names are non-empty and free of whitespace and structural characters
pub(crate) fn is_name(text: &str) -> bool {
    !text.is_empty()
        && !text
            .chars()
            .any(|c| matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0c') || "{}[]@#=,<>\"/".contains(c))
}

/// `node <type> <name> [@<globalID>] [#<localID>]`
pub(crate) fn header(
    source: Arc<String>,
) -> impl Parser<TokenSpan, Header, Error = ParserError> + Clone {
    let id = |kind: Token| token(kind).map(move |range| (kind, range));

    keyword(source.clone(), "node")
        .then(name(source.clone()))
        .then(name(source.clone()))
        .then(id(Token::GlobalId).or(id(Token::LocalId)).repeated())
        .try_map(move |(((start, (node_type, _)), (node_name, name_span)), ids), span: Range<usize>| {
            let mut global_id = None;
            let mut local_id = None;
            let mut end = name_span.end;

            for (i, (kind, range)) in ids.into_iter().enumerate() {
                // `node`, type and name come first
                let at = span.start + 3 + i;
                let error = |message: String| -> ParserError { Simple::custom(at..at + 1, message) };

                // Skip the leading `@` / `#`
                let id = parse_id(&source[range.start + 1..range.end])
                    .ok_or_else(|| error(format!("{} is out of range", kind)))?;
                match kind {
                    Token::GlobalId if local_id.is_some() => {
                        return Err(error("global id must precede local id".to_string()))
                    }
                    Token::GlobalId if global_id.is_some() => {
                        return Err(error("node has more than one global id".to_string()))
                    }
                    Token::GlobalId => global_id = Some(id),
                    _ if local_id.is_some() => {
                        return Err(error("node has more than one local id".to_string()))
                    }
                    _ => local_id = Some(id),
                }
                end = range.end;
            }

            Ok(Header {
                node_type,
                name: node_name,
                global_id,
                local_id,
                span: start.start..end,
            })
        })
        .labelled("node header")
}

/// `key = value`, emitted as the value followed by the completed property
pub(crate) fn property(
    source: Arc<String>,
) -> impl Parser<TokenSpan, Vec<Event>, Error = ParserError> + Clone {
    word(source.clone())
        .try_map(|(key, range), span| {
            if is_identifier(&key) {
                Ok((key, range))
            } else {
                Err(Simple::custom(span, format!("invalid property key '{}'", key)))
            }
        })
        .then_ignore(token(Token::Equals))
        .then(value(source))
        .map(|((key, key_span), (value, value_span))| {
            let span = key_span.start..value_span.end;
            vec![
                Event::Value(value, value_span),
                Event::Property {
                    key: key.trim().to_string(),
                    span,
                },
            ]
        })
        .labelled("property")
}

/// A node with its brace-delimited body of child nodes and properties
pub(crate) fn node(
    source: Arc<String>,
) -> impl Parser<TokenSpan, Vec<Event>, Error = ParserError> + Clone {
    recursive(move |node| {
        let item = node.or(property(source.clone()));

        header(source.clone())
            .then_ignore(token(Token::OpenBrace))
            .then(item.repeated())
            .then(token(Token::CloseBrace))
            .map(|((header, items), close): ((Header, Vec<Vec<Event>>), Range<usize>)| {
                let mut events = vec![Event::Open(header)];
                events.extend(items.into_iter().flatten());
                events.push(Event::Close(close));
                events
            })
    })
}

/// Parse a whole document: `scene v1` followed by any number of root nodes
pub fn document(
    source: Arc<String>,
) -> impl Parser<TokenSpan, Vec<Event>, Error = ParserError> + Clone {
    keyword(source.clone(), "scene")
        .then(keyword(source.clone(), "v1"))
        .labelled("scene header")
        .ignore_then(node(source).repeated())
        .then_ignore(end())
        .map(|nodes| nodes.into_iter().flatten().collect())
}
