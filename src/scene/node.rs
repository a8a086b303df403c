//! Scene node definition

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::value::{FromValue, Ref, Value};
use super::Scene;

/// A typed, named entity with keyed properties and owned child nodes.
///
/// Properties live in a `BTreeMap`, so iteration (and therefore serialization) is always
/// lexicographic by key regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_id: Option<i64>,
    pub properties: BTreeMap<String, Value>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(node_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            name: name.into(),
            local_id: None,
            global_id: None,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Ids must be non-negative for the node to read back after serialization.
    pub fn with_global_id(mut self, id: i64) -> Self {
        self.global_id = Some(id);
        self
    }

    pub fn with_local_id(mut self, id: i64) -> Self {
        self.local_id = Some(id);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }

    /// `type name`, used in diagnostics
    pub fn label(&self) -> String {
        format!("{} {}", self.node_type, self.name)
    }

    /// First direct child with the given name
    pub fn get_child_by_name(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn get_child_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Depth-first search of this node's descendants for a node of this node's own type
    /// carrying `local_id`.
    pub fn get_child_by_local_id(&self, local_id: i64) -> Option<&Node> {
        find_by_local_id(&self.children, local_id, &self.node_type)
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Raw access to a property value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Typed property access. `None` if the key is absent or holds another variant.
    pub fn get_property<T: FromValue>(&self, key: &str) -> Option<T> {
        self.properties.get(key).and_then(T::from_value)
    }

    /// Insert or overwrite a property, returning the previous value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn get_ref(&self, key: &str) -> Option<&Ref> {
        match self.properties.get(key) {
            Some(Value::Reference(r)) => Some(r),
            _ => None,
        }
    }

    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        match self.properties.get(key) {
            Some(Value::List(items)) => Some(items),
            _ => None,
        }
    }

    /// Typed access to one list element; `None` when out of range or of another variant.
    pub fn get_list_element<T: FromValue>(&self, key: &str, index: usize) -> Option<T> {
        self.get_list(key)?.get(index).and_then(T::from_value)
    }

    /// Post-parse lookup of the node a reference points to.
    ///
    /// Local references search this node's own subtree for a descendant of this node's
    /// type; global references search the whole scene. Every call re-traverses the tree.
    pub fn resolve_reference<'a>(&'a self, reference: &Ref, scene: &'a Scene) -> Option<&'a Node> {
        if let Some(local_id) = reference.local_id {
            self.get_child_by_local_id(local_id)
        } else {
            reference
                .global_id
                .and_then(|global_id| scene.get_root_by_global_id(global_id))
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())?;
        if let Some(id) = self.global_id {
            write!(f, " @{}", id)?;
        }
        if let Some(id) = self.local_id {
            write!(f, " #{}", id)?;
        }
        Ok(())
    }
}

fn find_by_local_id<'a>(nodes: &'a [Node], local_id: i64, node_type: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.node_type == node_type && node.local_id == Some(local_id) {
            return Some(node);
        }
        if let Some(found) = find_by_local_id(&node.children, local_id, node_type) {
            return Some(found);
        }
    }
    None
}

pub(super) fn find_by_global_id(nodes: &[Node], global_id: i64) -> Option<&Node> {
    for node in nodes {
        if node.global_id == Some(global_id) {
            return Some(node);
        }
        if let Some(found) = find_by_global_id(&node.children, global_id) {
            return Some(found);
        }
    }
    None
}
