//! Property values and cross-references

use serde::Serialize;

use crate::error::RefKind;

/// A cross-reference to another node, by identifier.
///
/// Parsed references populate exactly one of the two ids. Local references may carry a
/// type; global references may carry a type and a name. Neither owns the node it points to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Ref {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Ref {
    /// `<Type#id>`
    pub fn local(node_type: Option<&str>, local_id: i64) -> Self {
        Self {
            local_id: Some(local_id),
            node_type: node_type.map(str::to_string),
            ..Self::default()
        }
    }

    /// `<Type:Name@id>`
    pub fn global(node_type: Option<&str>, name: Option<&str>, global_id: i64) -> Self {
        Self {
            global_id: Some(global_id),
            node_type: node_type.map(str::to_string),
            name: name.map(str::to_string),
            ..Self::default()
        }
    }

    /// The namespace this reference resolves through; local wins when both ids are set.
    pub fn kind(&self) -> Option<RefKind> {
        if self.local_id.is_some() {
            Some(RefKind::Local)
        } else if self.global_id.is_some() {
            Some(RefKind::Global)
        } else {
            None
        }
    }
}

/// A property value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Reference(Ref),
    List(Vec<Value>),
}

impl Value {
    /// Every reference in this value, lists searched depth-first in order.
    pub fn references(&self) -> Vec<&Ref> {
        let mut refs = Vec::new();
        collect_references(self, &mut refs);
        refs
    }
}

fn collect_references<'a>(value: &'a Value, out: &mut Vec<&'a Ref>) {
    match value {
        Value::Reference(r) => out.push(r),
        Value::List(items) => {
            for item in items {
                collect_references(item, out);
            }
        }
        _ => {}
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Ref> for Value {
    fn from(v: Ref) -> Self {
        Value::Reference(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

/// Typed extraction from a [`Value`]; `None` when the variant does not match.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for Ref {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Reference(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(v) => Some(v.clone()),
            _ => None,
        }
    }
}
