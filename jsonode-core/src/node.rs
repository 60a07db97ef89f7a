//! The JSON node model.
//!
//! A document is a tree of [`Node`]s. Containers own their children outright,
//! there are no parent pointers, and a subtree moves between containers by
//! plain reassignment.

use std::borrow::Cow;
use std::mem;

use indexmap::IndexMap;

/// Key/child storage of an object node. Iterates in first-insertion order.
pub type Map = IndexMap<String, Node>;

/// Variant discriminator reported by [`Node::tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Array = 1,
    Object = 2,
    String = 3,
    Number = 4,
    Boolean = 5,
    NullValue = 6,
    /// The absence sentinel.
    None = 7,
}

/// A single element of a JSON document.
#[derive(Debug, Clone, Default)]
pub enum Node {
    /// Absence value: what lookups return when there is nothing to return.
    #[default]
    None,
    /// String literal.
    String(String),
    /// Number, always stored as `f64`.
    Number(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`.
    Null,
    /// Ordered list of children.
    Array(Vec<Node>),
    /// Keyed children, unique keys.
    Object(Map),
}

/// Shared absence value handed out by read-only lookups.
pub(crate) static ABSENT: Node = Node::None;

impl Node {
    /// An empty array.
    pub fn array() -> Node {
        Node::Array(Vec::new())
    }

    /// An empty object.
    pub fn object() -> Node {
        Node::Object(Map::new())
    }

    /// Resolve a raw token into a scalar node.
    ///
    /// Resolution order is null, boolean, number, string; the literal words
    /// match case-insensitively. An empty token resolves to nothing.
    pub fn from_literal(token: &str) -> Option<Node> {
        if token.is_empty() {
            return None;
        }
        if token.eq_ignore_ascii_case("null") {
            return Some(Node::Null);
        }
        if token.eq_ignore_ascii_case("true") {
            return Some(Node::Boolean(true));
        }
        if token.eq_ignore_ascii_case("false") {
            return Some(Node::Boolean(false));
        }
        if let Some(n) = parse_number(token) {
            return Some(Node::Number(n));
        }
        Some(Node::String(token.to_owned()))
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        match self {
            Node::None => Tag::None,
            Node::String(_) => Tag::String,
            Node::Number(_) => Tag::Number,
            Node::Boolean(_) => Tag::Boolean,
            Node::Null => Tag::NullValue,
            Node::Array(_) => Tag::Array,
            Node::Object(_) => Tag::Object,
        }
    }

    /// Scalar text of this node.
    ///
    /// Numbers render in invariant decimal form. Containers and the absence
    /// value have no text and return `""`.
    pub fn value(&self) -> Cow<'_, str> {
        match self {
            Node::String(s) => Cow::Borrowed(s),
            Node::Number(n) => Cow::Owned(format_number(*n)),
            Node::Boolean(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Node::Null => Cow::Borrowed("null"),
            Node::None | Node::Array(_) | Node::Object(_) => Cow::Borrowed(""),
        }
    }

    /// Overwrite the scalar text of this node.
    ///
    /// A number re-parses the text and stores 0 when it does not parse. A
    /// boolean stores whether the text is `true`. Null, containers and the
    /// absence value ignore the write.
    pub fn set_value(&mut self, text: impl Into<String>) {
        match self {
            Node::String(s) => *s = text.into(),
            Node::Number(n) => *n = parse_number(text.into().trim()).unwrap_or(0.0),
            Node::Boolean(b) => *b = text.into().eq_ignore_ascii_case("true"),
            Node::None | Node::Null | Node::Array(_) | Node::Object(_) => {}
        }
    }

    /// Number of children; 0 for scalars.
    #[inline]
    pub fn count(&self) -> usize {
        match self {
            Node::Array(items) => items.len(),
            Node::Object(map) => map.len(),
            _ => 0,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Node::Number(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Node::Boolean(_))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    /// True for the absence value.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Node::None)
    }

    /// True for arrays and objects.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }

    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Iterate over child nodes: array order, or object insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Node> + '_ {
        let items = match self {
            Node::Array(items) => items.as_slice(),
            _ => &[],
        };
        items
            .iter()
            .chain(self.as_object().into_iter().flat_map(|map| map.values()))
    }

    /// Iterate over the `(key, child)` pairs of an object.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.as_object()
            .into_iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Iterate over the keys of an object.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries().map(|(k, _)| k)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.as_object().is_some_and(|map| map.contains_key(key))
    }

    /// Append to an array. Ignored on every other variant.
    pub fn push(&mut self, node: impl Into<Node>) {
        if let Node::Array(items) = self {
            items.push(node.into().stored());
        }
    }

    /// Containers never hold the absence value; it is stored as null.
    pub(crate) fn stored(self) -> Node {
        match self {
            Node::None => Node::Null,
            node => node,
        }
    }

    /// Remove and return the element at `index` of an array.
    pub fn remove_index(&mut self, index: usize) -> Option<Node> {
        match self {
            Node::Array(items) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }

    /// Remove and return the child stored under `key` of an object.
    ///
    /// Remaining keys keep their relative order.
    pub fn remove_key(&mut self, key: &str) -> Option<Node> {
        self.as_object_mut().and_then(|map| map.shift_remove(key))
    }
}

/// Parse text under the invariant number grammar.
///
/// Only digits, signs, `.` and exponent markers are accepted, so words such
/// as `inf` or `NaN` stay strings.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty()
        || !text
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    text.parse().ok()
}

/// Invariant decimal text of a number.
pub(crate) fn format_number(n: f64) -> String {
    n.to_string()
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Boolean(b)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Number(n)
    }
}

impl From<f32> for Node {
    fn from(n: f32) -> Self {
        Node::Number(f64::from(n))
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Number(f64::from(n))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n as f64)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_owned())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Node::Object(map)
    }
}

impl FromIterator<Node> for Node {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Node::Array(iter.into_iter().map(Node::stored).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        Node::Object(iter.into_iter().map(|(k, v)| (k.into(), v.stored())).collect())
    }
}

// ============================================================================
// Equality and Teardown
// ============================================================================
//
// Both walk the tree with an explicit work list so that nesting depth never
// becomes call-stack depth.

impl PartialEq for Node {
    /// Structural equality. Object children compare by key, ignoring order.
    fn eq(&self, other: &Node) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Node::Array(x), Node::Array(y)) if x.len() == y.len() => {
                    pending.extend(x.iter().zip(y));
                }
                (Node::Object(x), Node::Object(y)) if x.len() == y.len() => {
                    for (key, value) in x {
                        match y.get(key) {
                            Some(theirs) => pending.push((value, theirs)),
                            None => return false,
                        }
                    }
                }
                (Node::String(x), Node::String(y)) if x == y => {}
                (Node::Number(x), Node::Number(y)) if x == y => {}
                (Node::Boolean(x), Node::Boolean(y)) if x == y => {}
                (Node::Null, Node::Null) | (Node::None, Node::None) => {}
                _ => return false,
            }
        }
        true
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = match self {
            Node::Array(items) if !items.is_empty() => mem::take(items),
            Node::Object(map) if !map.is_empty() => map.drain(..).map(|(_, v)| v).collect(),
            _ => return,
        };
        // Each popped node is emptied before it goes out of scope, so its own
        // drop returns immediately.
        while let Some(mut node) = pending.pop() {
            match &mut node {
                Node::Array(items) => pending.append(items),
                Node::Object(map) => pending.extend(map.drain(..).map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}
