//! Conversions between jsonode trees and serde_json values.

use jsonode_core::Node;
use serde_json::Value;

pub fn to_serde(node: &Node) -> Value {
    match node {
        Node::None | Node::Null => Value::Null,
        Node::Boolean(b) => Value::Bool(*b),
        Node::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
        Node::String(s) => Value::String(s.clone()),
        Node::Array(items) => Value::Array(items.iter().map(to_serde).collect()),
        Node::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), to_serde(v)))
                .collect(),
        ),
    }
}

pub fn from_serde(value: &Value) -> Node {
    match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Boolean(*b),
        Value::Number(n) => Node::Number(n.as_f64().unwrap_or_default()),
        Value::String(s) => Node::String(s.clone()),
        Value::Array(items) => Node::Array(items.iter().map(from_serde).collect()),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), from_serde(v)))
            .collect(),
    }
}
