//! Lexer module for the STDL format
//!
//! Tokenization is handled entirely by logos. Whitespace and `//` comments never reach the
//! grammar; every other character either starts a token or is reported as a syntax error.
//!
//! Literal tokens carry no payload. The grammar recovers their text from the source through
//! the byte range paired with each token, which keeps `Token` `Eq + Hash` as chumsky's error
//! type requires.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, TokenSpan};
pub use tokens::Token;
