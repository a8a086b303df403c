//! Public API for the parser.

use std::sync::Arc;

use chumsky::error::SimpleReason;
use chumsky::Parser;
use log::debug;

use crate::error::ParseError;
use crate::lexer::{tokenize, Token, TokenSpan};
use crate::parser::builder::Builder;
use crate::parser::combinators::ParserError;
use crate::parser::document::document;
use crate::position::SourceLocation;
use crate::scene::Scene;

/// Deepest nesting of nodes and lists accepted. The grammar recurses once per level.
pub const MAX_DEPTH: usize = 256;

/// Parse STDL text into a [`Scene`].
///
/// The call is atomic: on a syntax error or a circular reference no scene is returned,
/// only the first failure with its position.
pub fn parse_document(source: &str) -> Result<Scene, ParseError> {
    let tokens = tokenize(source)?;
    debug!("lexed {} tokens", tokens.len());
    check_depth(source, &tokens)?;

    let events = document(Arc::new(source.to_string()))
        .parse(tokens.clone())
        .map_err(|errors| convert_errors(source, &tokens, errors))?;

    let mut builder = Builder::new(source);
    for event in events {
        builder.apply(event)?;
    }
    let edges = builder.edge_count();
    let scene = builder.finish()?;

    debug!(
        "parsed scene with {} roots, {} nodes, {} reference edges",
        scene.roots.len(),
        scene.node_count(),
        edges
    );
    Ok(scene)
}

/// Reject nesting the grammar could not descend into without exhausting the stack
fn check_depth(source: &str, tokens: &[TokenSpan]) -> Result<(), ParseError> {
    let mut depth = 0usize;
    for (token, range) in tokens {
        match token {
            Token::OpenBrace | Token::OpenBracket => {
                depth += 1;
                if depth > MAX_DEPTH {
                    let position = SourceLocation::new(source).byte_to_position(range.start);
                    return Err(ParseError::syntax(
                        position,
                        format!("nesting is deeper than {} levels", MAX_DEPTH),
                    ));
                }
            }
            Token::CloseBrace | Token::CloseBracket => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Pick the earliest grammar error and render it against the source
fn convert_errors(source: &str, tokens: &[TokenSpan], errors: Vec<ParserError>) -> ParseError {
    let location = SourceLocation::new(source);
    let Some(error) = errors.into_iter().min_by_key(|e| e.span().start) else {
        return ParseError::syntax(location.byte_to_position(source.len()), "invalid document");
    };

    // Chumsky spans index into the token list; map them back to bytes
    let offset = tokens
        .get(error.span().start)
        .map_or(source.len(), |(_, range)| range.start);

    ParseError::syntax(location.byte_to_position(offset), describe(source, &error))
}

fn describe(source: &str, error: &ParserError) -> String {
    let found = match error.found() {
        Some((Token::Name, range)) if looks_numeric(&source[range.clone()]) => format!(
            "number '{}' (floats need digits on both sides)",
            &source[range.clone()]
        ),
        Some((token, range)) if token.is_literal() || matches!(token, Token::Word | Token::Name) => {
            format!("{} '{}'", token, &source[range.clone()])
        }
        Some((token, _)) => token.to_string(),
        None => "end of input".to_string(),
    };

    let message = match error.reason() {
        SimpleReason::Custom(message) => return message.clone(),
        SimpleReason::Unclosed { delimiter, .. } => {
            format!("unclosed {}, found {}", delimiter.0, found)
        }
        SimpleReason::Unexpected => format!("unexpected {}", found),
    };

    match error.label() {
        Some(label) => format!("{} in {}", message, label),
        None => message,
    }
}

fn looks_numeric(text: &str) -> bool {
    text.contains('.')
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
}
