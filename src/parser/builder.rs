//! Scene builder
//!
//! Replays grammar [`Event`]s into a [`Scene`]. The builder is the parser's mutable state:
//!
//! - an arena of nodes, addressed by [`NodeId`], so that the open-node stack and the
//!   resolver can point at nodes without owning them
//! - the stack of currently open nodes, innermost last, each with its own pending-value
//!   slot
//! - the [`Resolver`] with the identifier maps and the reference graph
//!
//! The owned tree is only assembled in [`Builder::finish`], after every event has been
//! accepted.

use std::ops::Range;

use log::{debug, warn};

use crate::error::{ParseError, RefKind};
use crate::parser::events::{Event, Header};
use crate::position::SourceLocation;
use crate::resolver::{Cycle, Link, NodeId, Resolver};
use crate::scene::{Node, Scene, Value};

/// A node in the arena. Children are kept as ids until the tree is assembled.
struct Slot {
    node: Node,
    children: Vec<NodeId>,
}

struct OpenNode {
    id: NodeId,
    /// Byte range of the node's header
    span: Range<usize>,
    /// Last value parsed inside this node, waiting for its property to complete
    pending: Option<Value>,
}

pub struct Builder<'a> {
    location: SourceLocation<'a>,
    arena: Vec<Slot>,
    roots: Vec<NodeId>,
    stack: Vec<OpenNode>,
    resolver: Resolver,
}

impl<'a> Builder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            location: SourceLocation::new(source),
            arena: Vec::new(),
            roots: Vec::new(),
            stack: Vec::new(),
            resolver: Resolver::new(),
        }
    }

    pub fn apply(&mut self, event: Event) -> Result<(), ParseError> {
        match event {
            Event::Open(header) => {
                self.open(header);
                Ok(())
            }
            Event::Value(value, span) => self.value(value, span),
            Event::Property { key, span } => self.property(key, span),
            Event::Close(span) => self.close(span),
        }
    }

    /// Create the node, register its ids, attach it to its parent and make it current
    fn open(&mut self, header: Header) {
        let id = NodeId(self.arena.len());
        let mut node = Node::new(header.node_type, header.name);
        node.global_id = header.global_id;
        node.local_id = header.local_id;

        if let Some(previous) = self.resolver.register(id, node.local_id, node.global_id) {
            warn!(
                "{}: global id @{} of '{}' replaces '{}'",
                self.location.byte_to_position(header.span.start),
                node.global_id.unwrap_or_default(),
                node.label(),
                self.label(previous)
            );
        }

        match self.stack.last() {
            Some(parent) => self.arena[parent.id.0].children.push(id),
            None => self.roots.push(id),
        }
        self.arena.push(Slot {
            node,
            children: Vec::new(),
        });
        self.stack.push(OpenNode {
            id,
            span: header.span,
            pending: None,
        });
    }

    fn close(&mut self, span: Range<usize>) -> Result<(), ParseError> {
        match self.stack.pop() {
            Some(_) => Ok(()),
            None => Err(self.syntax(span, "unbalanced '}'")),
        }
    }

    /// Check every reference in the value against the graph, then hold it for the property
    fn value(&mut self, value: Value, span: Range<usize>) -> Result<(), ParseError> {
        let Some(current) = self.stack.last().map(|open| open.id) else {
            return Err(self.syntax(span, "value outside of a node"));
        };

        for reference in value.references() {
            let Some(kind) = reference.kind() else {
                continue;
            };
            let id = match kind {
                RefKind::Local => reference.local_id,
                RefKind::Global => reference.global_id,
            }
            .unwrap_or_default();

            match self.resolver.link(current, kind, id) {
                Ok(Link::Edge(_)) => {}
                Ok(Link::Forward) => debug!(
                    "{}: {} reference to unresolved id {} from '{}'",
                    self.location.byte_to_position(span.start),
                    kind,
                    id,
                    self.label(current)
                ),
                Err(Cycle { target }) => {
                    return Err(ParseError::CircularReference {
                        position: self.location.byte_to_position(span.start),
                        from: self.label(current),
                        to: self.label(target),
                        kind,
                    })
                }
            }
        }

        if let Some(open) = self.stack.last_mut() {
            open.pending = Some(value);
        }
        Ok(())
    }

    /// Consume the pending value into the current node's property map
    fn property(&mut self, key: String, span: Range<usize>) -> Result<(), ParseError> {
        let Some(open) = self.stack.last_mut() else {
            return Err(self.syntax(span, "property outside of a node"));
        };
        let id = open.id;
        let Some(value) = open.pending.take() else {
            return Err(self.syntax(span, format!("property '{}' has no value", key)));
        };

        self.arena[id.0]
            .node
            .properties
            .insert(key.trim().to_string(), value);
        Ok(())
    }

    /// Assemble the owned tree. Fails if a node was left open.
    pub fn finish(mut self) -> Result<Scene, ParseError> {
        if let Some(open) = self.stack.last() {
            let message = format!("node '{}' is never closed", self.label(open.id));
            return Err(self.syntax(open.span.clone(), message));
        }

        let roots = std::mem::take(&mut self.roots);
        let roots = roots
            .into_iter()
            .map(|id| assemble(&mut self.arena, id))
            .collect();
        Ok(Scene { roots })
    }

    pub fn edge_count(&self) -> usize {
        self.resolver.edge_count()
    }

    fn label(&self, id: NodeId) -> String {
        self.arena[id.0].node.label()
    }

    fn syntax(&self, span: Range<usize>, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.location.byte_to_position(span.start), message)
    }
}

fn assemble(arena: &mut [Slot], id: NodeId) -> Node {
    let slot = &mut arena[id.0];
    let children = std::mem::take(&mut slot.children);
    let mut node = std::mem::replace(&mut slot.node, Node::new("", ""));
    node.children = children
        .into_iter()
        .map(|child| assemble(arena, child))
        .collect();
    node
}
