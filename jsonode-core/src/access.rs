//! Type-coercing accessors and child lookup.
//!
//! Nothing here fails. A read that cannot be satisfied falls back to a
//! per-type default, a lookup that misses yields the absence value, and a
//! write aimed at the wrong variant is dropped.
//!
//! ```
//! use jsonode_core::parse;
//!
//! let doc = parse(r#"{"main": {"temp": 11.5}, "name": "Amesbury"}"#).unwrap();
//! assert_eq!(doc["main"]["temp"].as_float(), 11.5);
//! assert_eq!(doc["main"]["humidity"].as_int(), 0);
//! assert_eq!(doc["name"][0].value(), "");
//! ```

use std::ops::Index;

use crate::node::{format_number, parse_number, Node, ABSENT};

impl Node {
    // ------------------------------------------------------------------------
    // Coercing reads
    // ------------------------------------------------------------------------

    /// Read as a boolean.
    ///
    /// `true`/`false` text reads as itself, any other non-empty text reads
    /// as `true`. Null and the absence value read as `false`.
    pub fn as_bool(&self) -> bool {
        match self {
            Node::Boolean(b) => *b,
            Node::Null | Node::None => false,
            _ => {
                let text = self.value();
                parse_bool(&text).unwrap_or(!text.is_empty())
            }
        }
    }

    /// Read as an `f32`, 0 when the text is not a number.
    pub fn as_float(&self) -> f32 {
        match self {
            Node::Number(n) => *n as f32,
            _ => coerce_number(&self.value()) as f32,
        }
    }

    /// Read as an `f64`, 0 when the text is not a number.
    pub fn as_double(&self) -> f64 {
        match self {
            Node::Number(n) => *n,
            _ => coerce_number(&self.value()),
        }
    }

    /// Read as an `i32`.
    ///
    /// Numbers truncate toward zero. Text must be an integer literal,
    /// anything else reads as 0.
    pub fn as_int(&self) -> i32 {
        match self {
            Node::Number(n) => *n as i32,
            _ => self.value().trim().parse().unwrap_or(0),
        }
    }

    /// Read as an `i64`, same rules as [`Node::as_int`].
    pub fn as_long(&self) -> i64 {
        match self {
            Node::Number(n) => *n as i64,
            _ => self.value().trim().parse().unwrap_or(0),
        }
    }

    // ------------------------------------------------------------------------
    // Coercing writes
    // ------------------------------------------------------------------------

    /// Store a boolean; other scalars receive its text.
    pub fn set_bool(&mut self, b: bool) {
        match self {
            Node::Boolean(slot) => *slot = b,
            _ => self.set_value(if b { "true" } else { "false" }),
        }
    }

    pub fn set_float(&mut self, n: f32) {
        match self {
            Node::Number(slot) => *slot = f64::from(n),
            _ => self.set_value(n.to_string()),
        }
    }

    pub fn set_double(&mut self, n: f64) {
        match self {
            Node::Number(slot) => *slot = n,
            _ => self.set_value(format_number(n)),
        }
    }

    pub fn set_int(&mut self, n: i32) {
        match self {
            Node::Number(slot) => *slot = f64::from(n),
            _ => self.set_value(n.to_string()),
        }
    }

    pub fn set_long(&mut self, n: i64) {
        match self {
            Node::Number(slot) => *slot = n as f64,
            _ => self.set_value(n.to_string()),
        }
    }

    // ------------------------------------------------------------------------
    // Child lookup
    // ------------------------------------------------------------------------

    /// Array element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.as_array().and_then(|items| items.get(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.as_array_mut().and_then(|items| items.get_mut(index))
    }

    /// Object child under `key`, if any.
    pub fn get_key(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|map| map.get(key))
    }

    pub fn get_key_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.as_object_mut().and_then(|map| map.get_mut(key))
    }

    /// Assign an array element.
    ///
    /// Replaces the element at `index`, or appends when `index` is past the
    /// end. Ignored on every other variant.
    pub fn set_index(&mut self, index: usize, node: impl Into<Node>) {
        if let Node::Array(items) = self {
            let node = node.into().stored();
            match items.get_mut(index) {
                Some(slot) => *slot = node,
                None => items.push(node),
            }
        }
    }

    /// Assign an object child, inserting the key if it is new.
    ///
    /// Ignored on every other variant.
    pub fn set_key(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        if let Node::Object(map) = self {
            map.insert(key.into(), node.into().stored());
        }
    }
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        self.get(index).unwrap_or(&ABSENT)
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        self.get_key(key).unwrap_or(&ABSENT)
    }
}

impl Index<&String> for Node {
    type Output = Node;

    fn index(&self, key: &String) -> &Node {
        &self[key.as_str()]
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn coerce_number(text: &str) -> f64 {
    parse_number(text.trim()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut root = Node::object();
        root.set_key("n", 2.75);
        root.set_key("s", "12");
        root.set_key("b", true);
        root.set_key("list", vec![Node::from(1), Node::from("two")]);
        root
    }

    #[test]
    fn test_bool_coercion() {
        assert!(Node::from(true).as_bool());
        assert!(!Node::from(false).as_bool());
        assert!(Node::from("TRUE").as_bool());
        assert!(!Node::from(" false ").as_bool());
        assert!(Node::from("anything").as_bool());
        assert!(!Node::from("").as_bool());
        assert!(Node::from(0).as_bool());
        assert!(!Node::Null.as_bool());
        assert!(!Node::None.as_bool());
        assert!(!Node::array().as_bool());
    }

    #[test]
    fn test_numeric_coercion() {
        let n = Node::from(-7.5);
        assert_eq!(n.as_double(), -7.5);
        assert_eq!(n.as_float(), -7.5f32);
        assert_eq!(n.as_int(), -7);
        assert_eq!(n.as_long(), -7);

        let s = Node::from(" 42 ");
        assert_eq!(s.as_int(), 42);
        assert_eq!(s.as_long(), 42);
        assert_eq!(s.as_double(), 42.0);

        let frac = Node::from("4.5");
        assert_eq!(frac.as_int(), 0);
        assert_eq!(frac.as_float(), 4.5);

        assert_eq!(Node::from("abc").as_double(), 0.0);
        assert_eq!(Node::from(true).as_double(), 0.0);
        assert_eq!(Node::Null.as_float(), 0.0);
        assert_eq!(Node::None.as_long(), 0);
        assert_eq!(Node::object().as_int(), 0);
    }

    #[test]
    fn test_coercing_writes() {
        let mut s = Node::from("x");
        s.set_double(1.5);
        assert_eq!(s, Node::from("1.5"));
        s.set_int(-3);
        assert_eq!(s, Node::from("-3"));
        s.set_bool(true);
        assert_eq!(s, Node::from("true"));
        s.set_float(0.1);
        assert_eq!(s, Node::from("0.1"));

        let mut n = Node::from(0);
        n.set_long(1 << 40);
        assert_eq!(n, Node::Number((1u64 << 40) as f64));
        n.set_bool(true);
        assert_eq!(n, Node::Number(0.0));

        let mut b = Node::from(true);
        b.set_double(1.0);
        assert_eq!(b, Node::Boolean(false));
        b.set_bool(true);
        assert_eq!(b, Node::Boolean(true));

        let mut null = Node::Null;
        null.set_int(5);
        assert_eq!(null, Node::Null);
    }

    #[test]
    fn test_index_lookup() {
        let root = sample();
        assert_eq!(root["n"].as_double(), 2.75);
        assert_eq!(root["s"].as_int(), 12);
        assert!(root["b"].as_bool());
        assert_eq!(root["list"][1].value(), "two");
        assert_eq!(root[&"n".to_string()].as_double(), 2.75);
    }

    #[test]
    fn test_absent_lookups() {
        let root = sample();
        assert!(root["missing"].is_none());
        assert!(root["list"][9].is_none());
        assert!(root["n"]["deeper"][0].is_none());
        assert!(root[0].is_none());
        assert!(root["list"]["key"].is_none());
        assert_eq!(root["missing"]["more"].as_int(), 0);
        assert!(root.get(0).is_none());
        assert!(root.get_key("list").is_some());
    }

    #[test]
    fn test_set_index_appends() {
        let mut arr = Node::array();
        arr.set_index(5, 1);
        arr.set_index(0, 2);
        arr.set_index(1, "x");
        assert_eq!(arr, Node::Array(vec![Node::from(2), Node::from("x")]));

        arr.set_index(0, Node::None);
        assert!(arr[0].is_null());
    }

    #[test]
    fn test_set_key_last_write_wins() {
        let mut obj = Node::object();
        obj.set_key("k", 1);
        obj.set_key("other", 0);
        obj.set_key("k", 2);
        assert_eq!(obj.count(), 2);
        assert_eq!(obj["k"].as_int(), 2);
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["k", "other"]);
    }

    #[test]
    fn test_writes_ignored_on_scalars() {
        let mut s = Node::from("scalar");
        s.set_index(0, 1);
        s.set_key("k", 1);
        assert_eq!(s, Node::from("scalar"));
        assert!(s.get_mut(0).is_none());
        assert!(s.get_key_mut("k").is_none());
    }

    #[test]
    fn test_mutation_through_lookup() {
        let mut root = sample();
        if let Some(list) = root.get_key_mut("list") {
            list.push(3);
            if let Some(first) = list.get_mut(0) {
                first.set_double(10.0);
            }
        }
        assert_eq!(root["list"].count(), 3);
        assert_eq!(root["list"][0].as_int(), 10);
    }

    #[test]
    fn test_move_subtree_between_containers() {
        let mut root = sample();
        let list = root.remove_key("list").unwrap_or_default();
        let mut other = Node::array();
        other.push(list);
        assert!(!root.contains_key("list"));
        assert_eq!(other[0][1].value(), "two");
    }
}
