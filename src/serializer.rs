//! Canonical STDL serialization
//!
//! A read-only tree walk. Output is deterministic: properties come out sorted by key,
//! children in document order, two spaces of indentation per level.
//!
//! ## Format
//!
//! ```text
//! scene v1
//! node world main @1
//! {
//!   gravity = -9.81
//!   node mesh cube #2
//!   {
//!     mesh = <Mesh:Cube @7>
//!   }
//! }
//! ```
//!
//! Comments and source layout are not preserved.
//!
//! The model accepts values the grammar cannot read back: negative ids, names with
//! whitespace or structural characters, keys that are not identifiers. They are written as
//! given and logged with `warn!`.

use log::warn;

use crate::parser::document::{is_identifier, is_name};
use crate::scene::{Node, Ref, Scene, Value};

/// Serialize a scene to canonical STDL text
pub fn serialize_document(scene: &Scene) -> String {
    let mut result = String::from("scene v1\n");
    for node in &scene.roots {
        serialize_node(node, 0, &mut result);
    }
    result
}

/// Serialize a node (recursive)
fn serialize_node(node: &Node, indent_level: usize, output: &mut String) {
    let indent = " ".repeat(indent_level);
    if let Some(problem) = unreadable(node) {
        warn!("'{}' will not parse back: {}", node.label(), problem);
    }

    output.push_str(&format!("{}node {} {}", indent, node.node_type, node.name));
    if let Some(id) = node.global_id {
        output.push_str(&format!(" @{}", id));
    }
    if let Some(id) = node.local_id {
        output.push_str(&format!(" #{}", id));
    }
    output.push('\n');
    output.push_str(&format!("{}{{\n", indent));

    // BTreeMap iteration is already sorted by key
    for (key, value) in &node.properties {
        output.push_str(&format!("{}  {} = {}\n", indent, key, format_value(value)));
    }

    for child in &node.children {
        serialize_node(child, indent_level + 2, output);
    }

    output.push_str(&format!("{}}}\n", indent));
}

/// Why the node's own header or keys would not parse back, if they would not
fn unreadable(node: &Node) -> Option<String> {
    if !is_name(&node.node_type) {
        return Some(format!("type '{}' is not a name", node.node_type));
    }
    if !is_name(&node.name) {
        return Some(format!("name '{}' is not a name", node.name));
    }
    if let Some(id) = node.global_id.filter(|id| *id < 0) {
        return Some(format!("global id {} is negative", id));
    }
    if let Some(id) = node.local_id.filter(|id| *id < 0) {
        return Some(format!("local id {} is negative", id));
    }
    node.properties
        .keys()
        .find(|key| !is_identifier(key))
        .map(|key| format!("key '{}' is not an identifier", key))
}

/// Render a single value as it would appear on the right of `=`
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Integer(v) => v.to_string(),
        Value::Float(v) => format_float(*v),
        Value::Bool(v) => v.to_string(),
        Value::String(s) => format!("\"{}\"", escape(s)),
        Value::Reference(r) => format_ref(r),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

/// Shortest text that reads back as the same float. Whole numbers keep a `.0` so they
/// are not read back as integers.
fn format_float(v: f64) -> String {
    let text = v.to_string();
    if v.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

fn format_ref(r: &Ref) -> String {
    let node_type = r.node_type.as_deref().unwrap_or("");
    if let Some(id) = r.local_id {
        return format!("<{}#{}>", node_type, id);
    }
    // Both segments are required by the grammar; a blank one reads back as absent
    let node_type = if node_type.is_empty() { " " } else { node_type };
    let name = r.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(" ");
    format!("<{}:{} @{}>", node_type, name, r.global_id.unwrap_or_default())
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            c => escaped.push(c),
        }
    }
    escaped
}
