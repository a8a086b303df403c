//! Build events emitted by the grammar
//!
//! The grammar flattens a document into events in the order its rules complete: a node's
//! header completes before its body, a property's value completes before the property
//! itself, and a closing brace completes the node. The builder replays them in that order.

use std::ops::Range;

use crate::scene::Value;

/// A fully parsed `node <type> <name> [@g] [#l]` header
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub node_type: String,
    pub name: String,
    pub global_id: Option<i64>,
    pub local_id: Option<i64>,
    /// Byte range of the header in the source
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A node header was recognized; its body follows
    Open(Header),
    /// A property value was recognized
    Value(Value, Range<usize>),
    /// A `key = value` property was completed
    Property { key: String, span: Range<usize> },
    /// The closing brace of the innermost open node
    Close(Range<usize>),
}
