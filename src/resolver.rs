//! Parse-time reference resolution and cycle detection
//!
//! The resolver lives only for one parse session. It indexes nodes by local and global id
//! as their headers are parsed, and keeps a directed graph of `source -> target` edges,
//! one per resolvable reference. Each new edge is checked on its own against the graph
//! built so far: an edge closes a cycle when its source is already reachable from its
//! target. The graph is never scanned as a whole.
//!
//! Identifiers only become resolvable once their header has been parsed, so a reference to
//! a node declared later in the document resolves to nothing here. Such forward references
//! are accepted and never become edges, which leaves them invisible to cycle detection.
//!
//! Nodes are addressed by [`NodeId`], an index into the builder's arena. Neither the maps
//! nor the graph own anything.

use std::collections::{HashMap, HashSet};

use crate::error::RefKind;

/// Index of a node in the builder's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Outcome of a successful [`Resolver::link`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// The id resolved and the edge is part of the graph
    Edge(NodeId),
    /// The id is not registered (yet); nothing was recorded
    Forward,
}

/// Adding the edge would close a cycle through `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub target: NodeId,
}

#[derive(Debug, Default)]
pub struct Resolver {
    local_ids: HashMap<i64, NodeId>,
    global_ids: HashMap<i64, NodeId>,
    edges: HashMap<NodeId, Vec<NodeId>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a freshly parsed node under its declared ids. The last registration of an id
    /// wins; the replaced global entry, if any, is returned.
    pub fn register(
        &mut self,
        node: NodeId,
        local_id: Option<i64>,
        global_id: Option<i64>,
    ) -> Option<NodeId> {
        if let Some(id) = local_id {
            self.local_ids.insert(id, node);
        }
        global_id.and_then(|id| self.global_ids.insert(id, node))
    }

    pub fn lookup(&self, kind: RefKind, id: i64) -> Option<NodeId> {
        match kind {
            RefKind::Local => self.local_ids.get(&id).copied(),
            RefKind::Global => self.global_ids.get(&id).copied(),
        }
    }

    /// Record that `source` references the node currently registered under `id`.
    pub fn link(&mut self, source: NodeId, kind: RefKind, id: i64) -> Result<Link, Cycle> {
        let Some(target) = self.lookup(kind, id) else {
            return Ok(Link::Forward);
        };

        if self.reachable(target, source) {
            return Err(Cycle { target });
        }

        let targets = self.edges.entry(source).or_default();
        if !targets.contains(&target) {
            targets.push(target);
        }
        Ok(Link::Edge(target))
    }

    /// Depth-first search over recorded edges. A node always reaches itself.
    pub fn reachable(&self, from: NodeId, to: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![from];

        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(next) = self.edges.get(&current) {
                stack.extend(next.iter().copied().filter(|n| !visited.contains(n)));
            }
        }
        false
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}
