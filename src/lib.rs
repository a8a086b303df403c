//! # stdl
//!
//! Parser, reference resolver and canonical serializer for STDL, a text format for
//! hierarchical scene descriptions.
//!
//! ```text
//! scene v1
//! node world main @1 {
//!   gravity = -9.81
//!   node camera cam #1 { target = <world:main @1> }
//! }
//! ```
//!
//! [`parse_document`] turns text into an owned [`Scene`] tree, rejecting circular
//! references as it goes. [`serialize_document`] writes a scene back out in canonical
//! form: sorted properties, fixed indentation, no comments.
//!
//! ## Modules
//!
//! - `lexer` - logos token definitions and span-preserving tokenization
//! - `parser` - chumsky grammar, scene builder and the public parse entry point
//! - `resolver` - identifier maps and incremental cycle detection used while parsing
//! - `scene` - the document model
//! - `serializer` - canonical text output
//! - `io` - load/save helpers
//! - `error`, `position` - diagnostics

pub mod error;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod resolver;
pub mod scene;
pub mod serializer;

pub use error::{LoadError, ParseError, RefKind};
pub use parser::parse_document;
pub use position::Position;
pub use scene::{FromValue, Node, Ref, Scene, Value};
pub use serializer::serialize_document;
