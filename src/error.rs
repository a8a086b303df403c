//! Error types for parsing and loading STDL documents

use std::fmt;

use thiserror::Error;

use crate::position::Position;

/// Which identifier namespace a reference goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Local,
    Global,
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefKind::Local => write!(f, "local"),
            RefKind::Global => write!(f, "global"),
        }
    }
}

/// Why a call to [`parse_document`](crate::parse_document) failed.
///
/// A failed parse never yields a partial scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text does not match the grammar
    #[error("syntax error at {position}: {message}")]
    Syntax { position: Position, message: String },

    /// A reference would close a cycle in the reference graph
    #[error("circular {kind} reference at {position}: '{from}' -> '{to}'")]
    CircularReference {
        position: Position,
        /// Node holding the offending property
        from: String,
        /// Node the reference points to
        to: String,
        kind: RefKind,
    },
}

impl ParseError {
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            position,
            message: message.into(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Syntax { position, .. } | ParseError::CircularReference { position, .. } => {
                *position
            }
        }
    }

    pub fn is_circular_reference(&self) -> bool {
        matches!(self, ParseError::CircularReference { .. })
    }
}

/// Errors from the file helpers in [`io`](crate::io)
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
