//! Token definitions for the STDL format
//!
//! Logos resolves overlaps by longest match, then by priority. `10.0` is a float and `10`
//! an integer. Any other run of characters outside the structural set (`1st`, `Héro`,
//! `10.`) is a `Name`, which only node headers accept.
use std::fmt;

use logos::Logos;

/// All possible tokens in the STDL format
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // Structure
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("=")]
    Equals,
    #[token(",")]
    Comma,

    // Header identifiers: `@12`, `#3`
    #[regex(r"@[0-9]+")]
    GlobalId,
    #[regex(r"#[0-9]+")]
    LocalId,

    // Literals
    #[regex(r"[+-]?[0-9]+\.[0-9]+", priority = 3)]
    Float,
    #[regex(r"[+-]?[0-9]+", priority = 3)]
    Integer,
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    String,
    // `<Type#id>`, type optional
    #[regex(r"<[^#>,\r\n]*#[0-9]+>")]
    LocalRef,
    // `<Type:Name@id>`
    #[regex(r"<[^:>,\r\n]+:[^@>,\r\n]+@[0-9]+>")]
    GlobalRef,

    // Keywords, node types, node names and property keys
    #[regex(r"[A-Za-z_][A-Za-z0-9_.\-]*", priority = 3)]
    Word,

    // Node types and names that are not words: anything up to whitespace or structure
    #[regex(r#"[^ \t\r\n\f{}\[\]@#=,<>"/]+"#, priority = 1)]
    Name,
}

impl Token {
    /// Check if this token is a value literal (lists excluded)
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::Float | Token::Integer | Token::String | Token::LocalRef | Token::GlobalRef
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::OpenBrace => "'{'",
            Token::CloseBrace => "'}'",
            Token::OpenBracket => "'['",
            Token::CloseBracket => "']'",
            Token::Equals => "'='",
            Token::Comma => "','",
            Token::GlobalId => "global id",
            Token::LocalId => "local id",
            Token::Float => "float",
            Token::Integer => "integer",
            Token::String => "string",
            Token::LocalRef => "local reference",
            Token::GlobalRef => "global reference",
            Token::Word => "word",
            Token::Name => "name",
        };
        f.write_str(text)
    }
}
