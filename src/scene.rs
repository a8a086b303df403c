//! Document model for STDL scenes
//!
//! A [`Scene`] owns its root [`Node`]s and every node owns its children, so the whole
//! document is a strict tree. References between nodes are stored as [`Ref`] values that
//! name an identifier; they are looked up on demand and never hold on to the target.
//!
//! ## Modules
//!
//! - `node` - Node type, property accessors and post-parse reference lookup
//! - `value` - Property values, references and typed extraction

pub mod node;
pub mod value;

use std::fmt;

use serde::Serialize;

pub use node::Node;
pub use value::{FromValue, Ref, Value};

/// Top-level ordered collection of root nodes
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scene {
    pub roots: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn add_root(&mut self, node: Node) {
        self.roots.push(node);
    }

    /// First root with the given name. Children are not searched.
    pub fn get_root_by_name(&self, name: &str) -> Option<&Node> {
        self.roots.iter().find(|n| n.name == name)
    }

    pub fn get_root_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.roots.iter_mut().find(|n| n.name == name)
    }

    /// Depth-first search of the entire scene for a node with the given global id
    pub fn get_root_by_global_id(&self, global_id: i64) -> Option<&Node> {
        node::find_by_global_id(&self.roots, global_id)
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serializer::serialize_document(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        let mut scene = Scene::new();
        let mut world = Node::new("world", "main").with_global_id(1);
        world.add_child(Node::new("mesh", "cube").with_global_id(2));
        scene.add_root(world);
        scene.add_root(Node::new("camera", "cam").with_global_id(3));
        scene
    }

    #[test]
    fn test_root_by_name() {
        let scene = scene();
        assert_eq!(scene.get_root_by_name("cam").map(|n| n.global_id), Some(Some(3)));
        assert!(scene.get_root_by_name("cube").is_none());
    }

    #[test]
    fn test_global_id_searches_whole_tree() {
        let scene = scene();
        assert_eq!(
            scene.get_root_by_global_id(2).map(|n| n.name.as_str()),
            Some("cube")
        );
        assert!(scene.get_root_by_global_id(42).is_none());
    }

    #[test]
    fn test_resolve_reference() {
        let scene = scene();
        let cam = scene.get_root_by_name("cam").unwrap();

        let hit = cam.resolve_reference(&Ref::global(Some("mesh"), Some("cube"), 2), &scene);
        assert_eq!(hit.map(|n| n.name.as_str()), Some("cube"));

        assert!(cam.resolve_reference(&Ref::global(None, None, 99), &scene).is_none());
        assert!(cam.resolve_reference(&Ref::local(None, 1), &scene).is_none());
        assert!(cam.resolve_reference(&Ref::default(), &scene).is_none());
    }

    #[test]
    fn test_mutation_through_lookup() {
        let mut scene = scene();
        scene
            .get_root_by_name_mut("main")
            .unwrap()
            .set_property("gravity", -9.81);
        assert_eq!(
            scene.get_root_by_name("main").unwrap().get_property::<f64>("gravity"),
            Some(-9.81)
        );
        assert_eq!(scene.node_count(), 3);
    }
}
